/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Cryptographic proofs which demonstrate that the amount committed to in a
//! pedersen commitment is a non-negative 64-bit value

mod borromean;

pub use borromean::{
    generate_value_blinds,
    generate_value_blinds_from_rng,
    BorromeanRangeProof
};

///Commitment values (in atomic units) are allowed to be between 0 and 2<sup>`BIT_RANGE`</sup> - 1.
///One two-key ring is proven per bit.
pub const BIT_RANGE: usize = 64;

///Maximum commitment value (in atomic units) allowed for a rangeproof: 2<sup>`BIT_RANGE`</sup> - 1
pub const MAX_VALUE: u64 = ((1u128 << BIT_RANGE) - 1) as u64;
