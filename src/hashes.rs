/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Hash functions, the hash-to-point map, and the transcript encodings that
//! bind signatures to messages.

use sha2::{Digest, Sha256};

use crate::curve::*;
use crate::types::PointTable;

///Length of a hash digest.
pub const HASH_SIZE: usize = 32;

//hash_rings budgets 33 + 4 + 4 bytes per cell: two index tags are reserved
//per cell but never written, so points alone enter the digest
const RING_CELL_SIZE: usize = POINT_SIZE + 4 + 4;

///Hash bytes to bytes.
pub fn h_bytes(msg: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    return hasher.finalize().into();
}

///Hash bytes twice over ("bitcoin hash").
pub fn bitcoin_hash(msg: &[u8]) -> [u8; HASH_SIZE] {
    return h_bytes(&h_bytes(msg));
}

///Hash bytes to a scalar, reduced modulo the group order.
pub fn h_scalar(msg: &[u8]) -> Scalar {
    return Scalar::reduce_from_bytes(&h_bytes(msg));
}

///Deterministically map arbitrary bytes onto the curve.
///
///The digest of the input seeds a candidate X coordinate with even-Y prefix;
///the coordinate is incremented until it decompresses. Scalars and points
///both hash through their canonical byte encodings (`as_bytes`).
///
///This "try and increment" walk is not constant time and leaks how many
///candidates were rejected; it is kept for reproducibility and must not be
///used where the input is secret.
pub fn hash_to_point(msg: &[u8]) -> Point {
    let mut x_value = Scalar::reduce_from_bytes(&bitcoin_hash(msg));
    let one = Scalar::from(1u64);
    loop {
        let mut candidate = [0u8; POINT_SIZE];
        candidate[0] = COMPRESSED_EVEN;
        candidate[1..].copy_from_slice(x_value.as_bytes());

        let point = Point::from_bytes(candidate);
        if point.is_valid() {
            return point;
        }

        x_value += one;
        if !x_value.is_valid() {
            //stepped onto the group order; keep walking from one
            x_value = one;
        }
    }
}

///Hash a message and a full pair of `L`/`R` point tables into one scalar.
///
///Cells are serialized row-major (`i` outer, `j` inner), `left` before
///`right` within each cell, points alone. Returns the invalid scalar when
///the tables disagree in shape, are empty, or contain any invalid point, so
///that a poisoned transcript can never close a challenge cycle.
pub fn hash_rings(message: &[u8], left: &PointTable, right: &PointTable) -> Scalar {
    if left.rows() == 0 || left.rows() != right.rows() || left.cols() != right.cols() {
        return Scalar::invalid();
    }

    let mut data =
        Vec::with_capacity(message.len() + 2 * left.rows() * left.cols() * RING_CELL_SIZE);
    data.extend_from_slice(message);
    for i in 0..left.rows() {
        for j in 0..left.cols() {
            let (l, r) = (left.get(i, j), right.get(i, j));
            if !l.is_valid() || !r.is_valid() {
                return Scalar::invalid();
            }
            data.extend_from_slice(l.as_bytes());
            data.extend_from_slice(r.as_bytes());
        }
    }
    return h_scalar(&data);
}

///Per-column hash of the Borromean construction:
///`SHA256(M || left[i] || right[i] || ... || be32(index))`, reduced to a
///scalar. `left` and `right` are one column's cells, row by row.
pub fn borromean_hash(message: &[u8], left: &[Point], right: &[Point], index: u32) -> Scalar {
    return match borromean_transcript(message, left, right, index) {
        Some(data) => h_scalar(&data),
        None => Scalar::invalid(),
    };
}

///`borromean_hash` without the final modular reduction: the digest bytes are
///placed into the scalar as they are, and validity is derived from the raw
///bytes. A digest at or above the group order (probability around 2^-128)
///therefore yields an invalid scalar instead of wrapping. Kept for
///compatibility with transcripts produced by the reference implementation.
pub fn borromean_hash2(message: &[u8], left: &[Point], right: &[Point], index: u32) -> Scalar {
    return match borromean_transcript(message, left, right, index) {
        Some(data) => Scalar::from_bytes(h_bytes(&data)),
        None => Scalar::invalid(),
    };
}

//shared transcript of the two borromean hash flavors; None poisons the result
fn borromean_transcript(
    message: &[u8],
    left: &[Point],
    right: &[Point],
    index: u32,
) -> Option<Vec<u8>> {
    if left.len() != right.len() {
        return None;
    }

    let mut data = Vec::with_capacity(message.len() + 2 * left.len() * POINT_SIZE + 4);
    data.extend_from_slice(message);
    for (l, r) in left.iter().zip(right) {
        if !l.is_valid() || !r.is_valid() {
            return None;
        }
        data.extend_from_slice(l.as_bytes());
        data.extend_from_slice(r.as_bytes());
    }
    data.extend_from_slice(&index.to_be_bytes());
    return Some(data);
}
