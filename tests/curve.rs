// SPDX short identifier: Unlicense

use mlsag::{
    common::*,
    hashes::*
};

#[test]
fn scalar_distributes_over_point() {
    for _ in 0..8 {
        let a = random_scalar();
        let b = random_scalar();
        let p = random_point();

        //(a + b)P == aP + bP
        assert_eq!((a + b) * p, a * p + b * p);
    }
}

#[test]
fn point_sum_distributes_under_scalar() {
    for _ in 0..8 {
        let a = random_scalar();
        let p = random_point();
        let q = random_point();

        //a(P + Q) == aP + aQ
        assert_eq!(a * (p + q), a * p + a * q);
    }
}

#[test]
fn identity_is_not_representable() {
    let a = random_scalar();
    let p = a * *G;

    //the identity has no compressed encoding: the result is invalid,
    //not some representable zero point
    assert!(!(p - p).is_valid());
    assert!(!(p + (-p)).is_valid());

    //the same arithmetic failure signal exists for scalars
    assert!(!(a - a).is_valid());
}

#[test]
fn invalidity_propagates_through_operators() {
    //0xff.. is far above the group order
    let bad_scalar = Scalar::from_bytes([0xffu8; 32]);
    assert!(!bad_scalar.is_valid());

    let good_scalar = random_scalar();
    let good_point = random_point();

    assert!(!(bad_scalar + good_scalar).is_valid());
    assert!(!(good_scalar - bad_scalar).is_valid());
    assert!(!(bad_scalar * good_scalar).is_valid());
    assert!(!(-bad_scalar).is_valid());
    assert!(!(bad_scalar * good_point).is_valid());

    let bad_point = Point::from_bytes([0x05u8; 33]);
    assert!(!bad_point.is_valid());
    assert!(!(good_point + bad_point).is_valid());
    assert!(!(bad_point - good_point).is_valid());
    assert!(!(good_scalar * bad_point).is_valid());

    //an invalid value never compares equal, itself included
    assert!(bad_scalar != bad_scalar);
    assert!(bad_scalar != good_scalar);
}

#[test]
fn zero_scalar_semantics() {
    assert!(Scalar::ZERO.is_valid());
    assert!(Scalar::ZERO.is_zero());

    //zero works as the accumulator identity
    let a = random_scalar();
    assert_eq!(Scalar::ZERO + a, a);

    //but the multiplicative primitive rejects it
    assert!(!(Scalar::ZERO * a).is_valid());
    assert!(!(Scalar::ZERO * random_point()).is_valid());
}

#[test]
fn u64_constructor_layout() {
    let scalar = Scalar::from(0x1122334455667788u64);
    let bytes = scalar.as_bytes();

    assert!(bytes[..24].iter().all(|byte| *byte == 0));
    assert_eq!(&bytes[24..], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
    assert!(scalar.is_valid());

    assert_eq!(Scalar::from(0u64), Scalar::ZERO);
}

#[test]
fn hash_to_point_is_valid_and_deterministic() {
    let seed = random_scalar();
    let inputs: [&[u8]; 4] = [b"", b"abc", &[0u8; 32], seed.as_bytes()];
    for input in inputs {
        let point = hash_to_point(input);
        assert!(point.is_valid());
        //repeated calls agree bit for bit
        assert_eq!(point, hash_to_point(input));
    }
    assert!(hash_to_point(b"abc") != hash_to_point(b"abd"));

    //a point input hashes through its compressed bytes
    let point = random_point();
    assert_eq!(hash_to_point(point.as_bytes()), hash_to_point(point.as_bytes()));
}

#[test]
fn hash_rings_poisons_on_bad_input() {
    let mut left = PointTable::filled(2, 3, random_point());
    let right = PointTable::filled(2, 3, random_point());

    assert!(hash_rings(b"msg", &left, &right).is_valid());

    //shape mismatch
    let narrow = PointTable::filled(2, 2, random_point());
    assert!(!hash_rings(b"msg", &left, &narrow).is_valid());

    //an invalid cell anywhere poisons the transcript
    left.set(1, 2, Point::from_bytes([0x07u8; 33]));
    assert!(!hash_rings(b"msg", &left, &right).is_valid());
}

#[test]
fn borromean_hash_variants_agree_modulo_reduction() {
    let left = [random_point(), random_point()];
    let right = [random_point(), random_point()];

    let reduced = borromean_hash(b"msg", &left, &right, 7);
    let raw = borromean_hash2(b"msg", &left, &right, 7);

    //a 256-bit digest lands below the group order with overwhelming
    //probability, in which case the two variants coincide
    assert!(reduced.is_valid());
    assert_eq!(reduced, raw);

    //the column index is part of the transcript
    assert!(borromean_hash(b"msg", &left, &right, 8) != reduced);

    //mismatched column shapes poison the result
    assert!(!borromean_hash(b"msg", &left, &right[..1], 7).is_valid());
    assert!(!borromean_hash2(b"msg", &left, &right[..1], 7).is_valid());
}

#[test]
fn bitcoin_hash_is_double_sha256() {
    let once = h_bytes(b"deadbeef");
    assert_eq!(bitcoin_hash(b"deadbeef"), h_bytes(&once));
}

#[cfg(feature = "to_bytes")]
#[test]
fn curve_type_serialization() {
    let scalar = random_scalar();
    let serialized = scalar.to_bytes().unwrap();
    let decoded: Scalar = ToBytes::from_bytes(&serialized).unwrap();
    assert_eq!(decoded, scalar);

    let point = random_point();
    let serialized = point.to_bytes().unwrap();
    let decoded: Point = ToBytes::from_bytes(&serialized).unwrap();
    assert_eq!(decoded, point);
}
