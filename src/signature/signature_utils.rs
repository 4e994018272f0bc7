/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::internal_common::*;

///Given a private key, return its key image `I = x · H_p(xG)`.
///
///The image is uniquely determined by the secret, so any two signatures made
///with the same secret carry the same image; this is the double-spend tag.
pub fn get_key_image(private_key: &Scalar) -> Point {
    let public_key = *private_key * *G;
    return *private_key * hash_to_point(public_key.as_bytes());
}

///sum every challenge
pub(crate) fn challenge_sum(challenges: &[Scalar]) -> Scalar {
    return challenges
        .iter()
        .fold(Scalar::ZERO, |total, challenge| total + *challenge);
}

///sum every challenge except the one at `index`
pub(crate) fn sum_except(challenges: &[Scalar], index: usize) -> Scalar {
    return challenges
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .fold(Scalar::ZERO, |total, (_, challenge)| total + *challenge);
}

///Fill one column's `L`/`R` cells from its salts, challenge, and public keys.
///
///`L = sG + cP` and `R = s·H_p(P) + cI`, row by row. Shared by the signer's
///decoy loop and the verifier's full pass; each worker owns exactly one
///column's slices.
pub(crate) fn fill_column(
    left_column: &mut [Point],
    right_column: &mut [Point],
    salt_column: &[Scalar],
    challenge: Scalar,
    public_column: &[Point],
    key_images: &[Point],
) {
    let g = *G;
    for i in 0..public_column.len() {
        let hashed_public = hash_to_point(public_column[i].as_bytes());
        left_column[i] = salt_column[i] * g + challenge * public_column[i];
        right_column[i] = salt_column[i] * hashed_public + challenge * key_images[i];
    }
}
