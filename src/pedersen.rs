/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Pedersen commitments

use std::iter::Sum;

use crate::curve::*;
use crate::tobytes::*;

//FIXME: a picked value, not a verified nothing-up-my-sleeve point.
//Anything reproducing reference transcripts needs this exact literal;
//anything wanting real security needs a generator with a provably
//unknown discrete log.
const LITERAL_H: &str = "02182f2b3da9f6a8538dabac0e4208bad135e93b8f4824c54f2fa1b974ece63762";

lazy_static! {
    ///The second Pedersen generator `H`. Its discrete log with respect to
    ///`G` must be unknown for commitments to be binding.
    pub static ref PEDERSEN_H: Point = Point::from_hex(LITERAL_H);
}

///A pedersen commitment: `bG + vH` hides the value `v` under the blinding
///factor `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Commitment(
    pub Point

); impl Commitment {
    ///create a commitment to `value` with blinding factor `blinding`
    pub fn commit(value: u64, blinding: Scalar) -> Self {
        //(b * G) + (v * H)
        let blind_point = blinding * *G;
        if value == 0 {
            //the zero scalar cannot multiply a point; the vH term vanishes
            return Self(blind_point);
        }
        return Self(blind_point + Scalar::from(value) * *PEDERSEN_H);
    }

    ///Return the elliptic curve point which represents this commitment.
    ///To convert an elliptic curve point back into a commitment, use `Commitment(point)`.
    pub fn to_point(&self) -> Point {
        return self.0;
    }

    ///Given input commitments, output commitments, and "extra" output (ie fees),
    ///check if the equation is balanced.
    ///
    ///`in == (out + extra)`
    pub fn is_balanced(in_commitments: Vec<Commitment>, out_commitments: Vec<Commitment>, extra: u64) -> bool {
        let inputs: Commitment = in_commitments.into_iter().sum();
        let mut outputs: Commitment = out_commitments.into_iter().sum();
        if extra != 0 {
            outputs = Commitment(outputs.0 + Scalar::from(extra) * *PEDERSEN_H);
        }
        return inputs.0.is_valid() && inputs == outputs;
    }

} impl Sum for Commitment {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut total: Option<Point> = None;
        for commitment in iter {
            total = Some(match total {
                Some(sum) => sum + commitment.0,
                None => commitment.0,
            });
        }
        return Commitment(total.unwrap_or_else(Point::invalid));
    }
}

#[cfg(feature = "to_bytes")] impl ToBytes<'_> for Commitment {}
