/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Elliptic curve scalars, points, and constants.
//!
//! Every operator is total: instead of returning errors, results carry a
//! validity flag which propagates through arithmetic. Callers check
//! `is_valid()` at the boundary of a protocol step; inside the loops
//! invalidity flows silently.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use k256::{
    elliptic_curve::{ff::PrimeField, ops::Reduce, sec1::ToEncodedPoint},
    FieldBytes, ProjectivePoint, PublicKey, U256,
};
use rand::{thread_rng, CryptoRng, RngCore};
use serde::{
    de::{Error as DeError, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use zeroize::Zeroize;

///Length of a scalar encoding: 32 big-endian bytes.
pub const SCALAR_SIZE: usize = 32;
///Length of a SEC1 compressed point encoding: a parity prefix plus the X coordinate.
pub const POINT_SIZE: usize = 33;

///SEC1 prefix of a compressed point with even Y.
pub const COMPRESSED_EVEN: u8 = 0x02;
///SEC1 prefix of a compressed point with odd Y.
pub const COMPRESSED_ODD: u8 = 0x03;
//prefix marking a point as invalid
const INVALID_PREFIX: u8 = 0x00;

//the secp256k1 base point, SEC1 compressed
const LITERAL_G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

//a uniform draw misses [1, n) with probability below 2^-127, so hitting this
//bound means the randomness source is broken
const RANDOM_SCALAR_RETRIES: usize = 128;

lazy_static! {
    ///The secp256k1 base point `G`.
    pub static ref G: Point = Point::from_hex(LITERAL_G);
}

///An integer modulo the secp256k1 group order, stored as 32 big-endian bytes
///plus a validity flag.
///
///Zero is a valid scalar (it is the accumulator identity) but is rejected
///wherever a secret key is expected. Arithmetic that lands outside `[1, n)`
///invalidates its result, mirroring the behavior of the underlying
///tweak primitives.
#[derive(Debug, Clone, Copy)]
pub struct Scalar {
    bytes: [u8; SCALAR_SIZE],
    valid: bool,
}

impl Scalar {
    ///The zero scalar. Valid, but not usable as a secret.
    pub const ZERO: Scalar = Scalar {
        bytes: [0u8; SCALAR_SIZE],
        valid: true,
    };

    ///Interpret 32 big-endian bytes as a scalar.
    ///Bytes at or above the group order yield an invalid scalar.
    pub fn from_bytes(bytes: [u8; SCALAR_SIZE]) -> Self {
        let valid = Option::<k256::Scalar>::from(k256::Scalar::from_repr(bytes.into())).is_some();
        return Scalar { bytes, valid };
    }

    ///Interpret 32 bytes as a scalar, reducing modulo the group order.
    pub fn reduce_from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Self {
        let reduced = <k256::Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(bytes));
        return Scalar::from_inner(reduced);
    }

    pub(crate) fn invalid() -> Self {
        return Scalar {
            bytes: [0u8; SCALAR_SIZE],
            valid: false,
        };
    }

    pub fn is_valid(&self) -> bool {
        return self.valid;
    }

    pub fn is_zero(&self) -> bool {
        return self.bytes == [0u8; SCALAR_SIZE];
    }

    ///The canonical big-endian encoding.
    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        return &self.bytes;
    }

    //bridge into the field arithmetic; None when this scalar is invalid
    fn lift(&self) -> Option<k256::Scalar> {
        if !self.valid {
            return None;
        }
        return k256::Scalar::from_repr(self.bytes.into()).into();
    }

    fn from_inner(inner: k256::Scalar) -> Self {
        return Scalar {
            bytes: inner.to_repr().into(),
            valid: true,
        };
    }
}

impl From<u64> for Scalar {
    ///A `u64` embeds into the last 8 bytes, big-endian; the rest are zero.
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; SCALAR_SIZE];
        bytes[SCALAR_SIZE - 8..].copy_from_slice(&value.to_be_bytes());
        return Scalar { bytes, valid: true };
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        return match self.lift() {
            Some(inner) => Scalar::from_inner(-inner),
            None => Scalar::invalid(),
        };
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        let (Some(left), Some(right)) = (self.lift(), rhs.lift()) else {
            return Scalar::invalid();
        };
        let sum = Scalar::from_inner(left + right);
        //a sum landing on zero is a tweak-add failure
        if sum.is_zero() {
            return Scalar::invalid();
        }
        return sum;
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        return self + (-rhs);
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        let (Some(left), Some(right)) = (self.lift(), rhs.lift()) else {
            return Scalar::invalid();
        };
        //the tweak-mul primitive rejects the zero operand
        if self.is_zero() || rhs.is_zero() {
            return Scalar::invalid();
        }
        return Scalar::from_inner(left * right);
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = *self + rhs;
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = *self - rhs;
    }
}

impl PartialEq for Scalar {
    ///Byte equality, gated on validity: an invalid scalar equals nothing,
    ///itself included.
    fn eq(&self, other: &Self) -> bool {
        return self.valid && other.valid && self.bytes == other.bytes;
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
        self.valid = false;
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_bytes(&self.bytes);
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        return write!(formatter, "{SCALAR_SIZE} scalar bytes");
    }

    fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Scalar, E> {
        let bytes: [u8; SCALAR_SIZE] = v
            .try_into()
            .map_err(|_| E::invalid_length(v.len(), &self))?;
        //validity is re-derived, never trusted from the wire
        return Ok(Scalar::from_bytes(bytes));
    }

    fn visit_byte_buf<E: DeError>(self, v: Vec<u8>) -> Result<Scalar, E> {
        return self.visit_bytes(&v);
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Scalar, D::Error> {
        return deserializer.deserialize_bytes(ScalarVisitor);
    }
}

///A point on secp256k1, stored as its 33-byte SEC1 compressed encoding.
///
///A point is valid iff its prefix byte is `0x02` or `0x03` and the encoding
///decompresses onto the curve. Invalidation overwrites the prefix byte with
///zero. The group identity has no compressed encoding and therefore surfaces
///as an invalid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    bytes: [u8; POINT_SIZE],
}

impl Point {
    ///Interpret 33 bytes as a compressed point, checking curve membership.
    pub fn from_bytes(bytes: [u8; POINT_SIZE]) -> Self {
        let mut point = Point { bytes };
        let prefixed = bytes[0] == COMPRESSED_EVEN || bytes[0] == COMPRESSED_ODD;
        if !prefixed || PublicKey::from_sec1_bytes(&bytes).is_err() {
            point.invalidate();
        }
        return point;
    }

    ///Parse a point from its base16 encoding.
    ///Anything that is not 33 valid hex bytes yields an invalid point.
    pub fn from_hex(hex_str: &str) -> Self {
        return match hex::decode(hex_str) {
            Ok(decoded) if decoded.len() == POINT_SIZE => {
                let mut bytes = [0u8; POINT_SIZE];
                bytes.copy_from_slice(&decoded);
                Point::from_bytes(bytes)
            }
            _ => Point::invalid(),
        };
    }

    pub(crate) fn invalid() -> Self {
        return Point {
            bytes: [0u8; POINT_SIZE],
        };
    }

    fn invalidate(&mut self) {
        self.bytes[0] = INVALID_PREFIX;
    }

    pub fn is_valid(&self) -> bool {
        return self.bytes[0] == COMPRESSED_EVEN || self.bytes[0] == COMPRESSED_ODD;
    }

    ///The SEC1 compressed encoding. Also the hashing form of the point.
    pub fn as_bytes(&self) -> &[u8; POINT_SIZE] {
        return &self.bytes;
    }

    //bridge into the group arithmetic; None when this point is invalid
    fn lift(&self) -> Option<ProjectivePoint> {
        if !self.is_valid() {
            return None;
        }
        return PublicKey::from_sec1_bytes(&self.bytes)
            .ok()
            .map(|public| public.to_projective());
    }

    fn from_inner(inner: ProjectivePoint) -> Self {
        return match PublicKey::from_affine(inner.to_affine()) {
            Ok(public) => {
                let encoded = public.to_encoded_point(true);
                let mut bytes = [0u8; POINT_SIZE];
                bytes.copy_from_slice(encoded.as_bytes());
                Point { bytes }
            }
            //the identity is not representable
            Err(_) => Point::invalid(),
        };
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        return match self.lift() {
            Some(inner) => Point::from_inner(-inner),
            None => Point::invalid(),
        };
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        let (Some(left), Some(right)) = (self.lift(), rhs.lift()) else {
            return Point::invalid();
        };
        return Point::from_inner(left + right);
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        return self + (-rhs);
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    fn mul(self, rhs: Scalar) -> Point {
        let (Some(point), Some(scalar)) = (self.lift(), rhs.lift()) else {
            return Point::invalid();
        };
        //multiplying by zero would land on the identity
        if rhs.is_zero() {
            return Point::invalid();
        }
        return Point::from_inner(point * scalar);
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        return rhs * self;
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_bytes(&self.bytes);
    }
}

struct PointVisitor;

impl<'de> Visitor<'de> for PointVisitor {
    type Value = Point;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        return write!(formatter, "{POINT_SIZE} compressed point bytes");
    }

    fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Point, E> {
        let bytes: [u8; POINT_SIZE] = v
            .try_into()
            .map_err(|_| E::invalid_length(v.len(), &self))?;
        //validity is re-derived, never trusted from the wire
        return Ok(Point::from_bytes(bytes));
    }

    fn visit_byte_buf<E: DeError>(self, v: Vec<u8>) -> Result<Point, E> {
        return self.visit_bytes(&v);
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        return deserializer.deserialize_bytes(PointVisitor);
    }
}

#[cfg(feature = "to_bytes")]
impl crate::tobytes::ToBytes<'_> for Scalar {}
#[cfg(feature = "to_bytes")]
impl crate::tobytes::ToBytes<'_> for Point {}

///Draw a uniform scalar in `[1, n)` from the given randomness source.
///
///Draws are rejection-sampled; exhausting the retry budget only happens with
///a broken RNG, which is fatal.
pub fn random_scalar_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    for _ in 0..RANDOM_SCALAR_RETRIES {
        let mut bytes = [0u8; SCALAR_SIZE];
        rng.fill_bytes(&mut bytes);
        let scalar = Scalar::from_bytes(bytes);
        if scalar.is_valid() && !scalar.is_zero() {
            return scalar;
        }
    }
    panic!("randomness source failed {RANDOM_SCALAR_RETRIES} consecutive scalar draws");
}

///Draw a uniform scalar in `[1, n)`.
pub fn random_scalar() -> Scalar {
    return random_scalar_from_rng(&mut thread_rng());
}

///Return a random point on the curve.
pub fn random_point() -> Point {
    return random_scalar() * *G;
}
