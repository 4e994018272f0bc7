/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Multilayered linkable ring signatures for RingCT-style transactions

mod mlsag;
mod signature_utils;

pub use mlsag::MLSAGSignature;
pub use signature_utils::get_key_image;

pub(crate) use signature_utils::{
    challenge_sum,
    fill_column,
    sum_except
};
