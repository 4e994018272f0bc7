/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rand::{thread_rng, CryptoRng, RngCore};
use rayon::prelude::*;

use super::{challenge_sum, fill_column, get_key_image, sum_except};
use crate::internal_common::*;

///A multilayered linkable spontaneous anonymous group signature.
///
///The ring is a rectangular table of public keys: one row per signing layer
///(spend key, balance key, ...), one column per ring member. The signer owns
///every secret of exactly one column; the other columns are decoys. Each row
///contributes a key image, and the challenge scalars of all columns close
///into a cycle anchored by the transcript hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MLSAGSignature {
    ///one key image per row; equal secrets always yield equal images
    pub key_images: Vec<Point>,
    ///one challenge per ring column; their sum must equal the transcript hash
    pub challenges: Vec<Scalar>,
    ///one response ("salt") per ring cell
    pub salts: ScalarTable,

} impl MLSAGSignature {
    ///Sign `msg` with the ring `publics`, owning the secrets of column `index`.
    ///
    ///`secrets` holds one private key per ring row, and `publics[i][index]`
    ///must equal `secrets[i] * G` for the signature to verify; this is not
    ///checked here, a mis-set column simply produces an invalid signature.
    pub fn sign(
        secrets: &[Scalar], publics: &PointTable, index: usize, msg: &[u8]
    ) -> Result<Self, SignatureError> {
        return Self::sign_with_rng(secrets, publics, index, msg, &mut thread_rng());
    }

    ///Same as `sign`, drawing all salts and challenges from the given RNG.
    ///
    ///All randomness is drawn serially before the parallel phase, so for a
    ///seeded RNG the signature is byte-identical regardless of how many
    ///worker threads fill the ring.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        secrets: &[Scalar], publics: &PointTable, index: usize, msg: &[u8], rng: &mut R
    ) -> Result<Self, SignatureError> {
        let rows = publics.rows();
        let cols = publics.cols();
        if rows == 0 || secrets.len() != rows || index >= cols {
            return Err(SignatureError::Malformed);
        }
        if secrets.iter().any(|secret| !secret.is_valid() || secret.is_zero()) {
            return Err(SignatureError::Malformed);
        }

        let g = *G;

        //response values for every cell; the signer column is overwritten
        //after the cycle closes
        let mut salts = ScalarTable::filled(rows, cols, Scalar::ZERO);
        for cell in salts.cells_mut() {
            *cell = random_scalar_from_rng(rng);
        }

        //challenges for the decoy columns; the draw at the signer column
        //keeps the access pattern uniform and is replaced by the closure
        let mut challenges: Vec<Scalar> = (0..cols)
            .map(|_| random_scalar_from_rng(rng))
            .collect();

        //I = x * H_p(xG)
        let key_images: Vec<Point> = secrets.iter().map(get_key_image).collect();

        let mut left = PointTable::filled(rows, cols, Point::invalid());
        let mut right = PointTable::filled(rows, cols, Point::invalid());

        //signer column: L = kG, R = k * H_p(P)
        for i in 0..rows {
            let salt = *salts.get(i, index);
            left.set(i, index, salt * g);
            right.set(i, index, salt * hash_to_point(publics.get(i, index).as_bytes()));
        }

        //decoy columns are mutually independent; shard them across the pool
        left.par_columns_mut()
            .zip(right.par_columns_mut())
            .enumerate()
            .filter(|(j, _)| *j != index)
            .for_each(|(j, (left_column, right_column))| {
                fill_column(
                    left_column,
                    right_column,
                    salts.column(j),
                    challenges[j],
                    publics.column(j),
                    &key_images,
                );
            });

        //close the cycle: the challenges must sum to the transcript hash
        let total_challenge = hash_rings(msg, &left, &right);
        let closing = total_challenge - sum_except(&challenges, index);
        challenges[index] = closing;

        //and solve the signer column's responses
        for i in 0..rows {
            let closed = *salts.get(i, index) - challenges[index] * secrets[i];
            salts.set(i, index, closed);
        }

        return Ok(Self { key_images, challenges, salts });
    }

    ///Check a signature against the ring and message it claims to sign.
    ///
    ///Verification is total: inconsistent dimensions, invalid scalars, and
    ///invalid points all surface as an error, never a panic. Returns `Ok(())`
    ///exactly when the challenges sum to the recomputed transcript hash.
    pub fn verify(
        &self, publics: &PointTable, msg: &[u8]
    ) -> Result<(), SignatureError> {
        let rows = publics.rows();
        let cols = publics.cols();
        if rows == 0
            || self.key_images.len() != rows
            || self.challenges.len() != cols
            || self.salts.rows() != rows
            || self.salts.cols() != cols
        {
            return Err(SignatureError::Malformed);
        }

        let mut left = PointTable::filled(rows, cols, Point::invalid());
        let mut right = PointTable::filled(rows, cols, Point::invalid());

        //every column is recomputed the same way the signer built its decoys
        left.par_columns_mut()
            .zip(right.par_columns_mut())
            .enumerate()
            .for_each(|(j, (left_column, right_column))| {
                fill_column(
                    left_column,
                    right_column,
                    self.salts.column(j),
                    self.challenges[j],
                    publics.column(j),
                    &self.key_images,
                );
            });

        let total_challenge = hash_rings(msg, &left, &right);

        //check if the challenge cycle closes
        return match challenge_sum(&self.challenges) == total_challenge {
            true => Ok(()),
            false => Err(SignatureError::Invalid),
        };
    }

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for MLSAGSignature {}
