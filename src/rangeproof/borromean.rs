/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Borromean ring signature-based rangeproofs
//!
//! The value is decomposed into 64 binary digits. Digit `i` gets a
//! commitment `B_i = b_i G`, or `b_i G + 2^i H` when the digit is set, and a
//! two-key ring `{B_i, B_i - 2^i H}`: whichever way the digit went, the
//! prover knows the discrete log of exactly one ring member. The 64 rings
//! share a single closure hash, and the commitments sum to the blinded point
//! of the value being proven.

use rand::{thread_rng, CryptoRng, RngCore};
use zeroize::Zeroize;

use super::BIT_RANGE;
use crate::internal_common::*;

///ring keys for one binary digit: the commitment, and the commitment less `2^i H`
type BitRing = [Point; 2];

//2^i on the H generator
fn bitcolumn_value(i: usize) -> Point {
    return Scalar::from(1u64 << i) * *PEDERSEN_H;
}

//the signed transcript binds the transaction hash and every ring key
fn create_message(rings: &[BitRing], transaction_hash: &[u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
    let mut data = Vec::with_capacity(HASH_SIZE + rings.len() * 2 * POINT_SIZE);
    data.extend_from_slice(transaction_hash);
    for ring in rings {
        data.extend_from_slice(ring[0].as_bytes());
        data.extend_from_slice(ring[1].as_bytes());
    }
    return h_bytes(&data);
}

//initial challenge of ring `ring_index`, derived from the shared closure scalar
fn ring_start_hash(m: &[u8], challenge_0: &Scalar, ring_index: usize) -> Scalar {
    let data = [
        m,
        challenge_0.as_bytes().as_slice(),
        &(ring_index as u32).to_be_bytes(),
    ]
    .concat();
    return h_scalar(&data);
}

//one step around a ring: E' = sG + eP
fn ring_step(salt: Scalar, challenge: Scalar, key: Point) -> Point {
    return salt * *G + challenge * key;
}

//the shared closure binds the final walk point of every ring
fn closure_hash(m: &[u8], finals: &[Point]) -> Scalar {
    let mut data = Vec::with_capacity(m.len() + finals.len() * POINT_SIZE);
    data.extend_from_slice(m);
    for point in finals {
        if !point.is_valid() {
            return Scalar::invalid();
        }
        data.extend_from_slice(point.as_bytes());
    }
    return h_scalar(&data);
}

//create the shared-closure ring signature over all bit rings.
//indices[i] marks the position whose discrete log secrets[i] opens.
fn borromean_sign<R: RngCore + CryptoRng>(
    rings: &[BitRing],
    secrets: &[Scalar],
    indices: &[usize],
    transaction_hash: &[u8; HASH_SIZE],
    rng: &mut R,
) -> (Scalar, Vec<[Scalar; 2]>) {
    let m = create_message(rings, transaction_hash);
    let g = *G;

    //random s values; sign overwrites one per ring
    let mut salts: Vec<[Scalar; 2]> = (0..rings.len())
        .map(|_| [random_scalar_from_rng(rng), random_scalar_from_rng(rng)])
        .collect();
    //the k values seeding each ring's walk
    let mut seeds: Vec<Scalar> = (0..rings.len())
        .map(|_| random_scalar_from_rng(rng))
        .collect();

    //tail pass: walk each ring from its signing position to the end,
    //collecting the final walk points
    let mut finals: Vec<Point> = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        let mut walk = seeds[i] * g;
        for position in indices[i] + 1..ring.len() {
            let challenge = borromean_hash(&m, &[walk], &[ring[position]], i as u32);
            walk = ring_step(salts[i][position], challenge, ring[position]);
        }
        finals.push(walk);
    }

    //e_0, the shared seed
    let challenge_0 = closure_hash(&m, &finals);

    //head pass: walk from the closure down to the signing position, then
    //"tie" each ring, proving we know one of the private keys
    for (i, ring) in rings.iter().enumerate() {
        let mut challenge = ring_start_hash(&m, &challenge_0, i);
        for position in 0..indices[i] {
            let walk = ring_step(salts[i][position], challenge, ring[position]);
            challenge = borromean_hash(&m, &[walk], &[ring[position + 1]], i as u32);
        }
        salts[i][indices[i]] = seeds[i] - challenge * secrets[i];
    }

    seeds.zeroize();
    return (challenge_0, salts);
}

//verify the shared-closure ring signature
fn borromean_verify(
    rings: &[BitRing],
    challenge_0: &Scalar,
    salts: &[[Scalar; 2]],
    transaction_hash: &[u8; HASH_SIZE],
) -> bool {
    if salts.len() != rings.len() || !challenge_0.is_valid() {
        return false;
    }
    let m = create_message(rings, transaction_hash);

    //travel around each ring
    let mut finals: Vec<Point> = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        let mut challenge = ring_start_hash(&m, challenge_0, i);
        let mut walk = ring_step(salts[i][0], challenge, ring[0]);
        challenge = borromean_hash(&m, &[walk], &[ring[1]], i as u32);
        walk = ring_step(salts[i][1], challenge, ring[1]);
        finals.push(walk);
    }

    //check if we end up back where we started
    return closure_hash(&m, &finals) == *challenge_0;
}

///Draw one blinding factor per binary digit and return the blinded point
///`vH + Σ b_i G` together with the blinds.
///
///The prover expects this exact blind vector: the caller owns blind
///generation, and `prove` never re-draws.
pub fn generate_value_blinds(value: u64) -> (Point, Vec<Scalar>) {
    return generate_value_blinds_from_rng(value, &mut thread_rng());
}

///Same as `generate_value_blinds`, drawing from the given RNG.
pub fn generate_value_blinds_from_rng<R: RngCore + CryptoRng>(
    value: u64,
    rng: &mut R,
) -> (Point, Vec<Scalar>) {
    let g = *G;
    let blinds: Vec<Scalar> = (0..BIT_RANGE)
        .map(|_| random_scalar_from_rng(rng))
        .collect();

    let mut blinded = blinds[0] * g;
    for blind in &blinds[1..] {
        blinded += *blind * g;
    }
    if value != 0 {
        blinded += Scalar::from(value) * *PEDERSEN_H;
    }
    return (blinded, blinds);
}

///Rangeproof based on Borromean ring signatures: 64 two-key rings, one per
///binary digit of the committed value.
///
///These proofs are large and slow compared to Bulletproof-family proofs, but
///their construction is simple enough to audit by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorromeanRangeProof {
    ///per-digit commitments `B_i`; their sum is the commitment being proven
    pub commitments: Vec<Point>,
    challenge: Scalar,
    salts: Vec<[Scalar; 2]>,

} impl BorromeanRangeProof {
    ///Create a rangeproof for `value` under the given per-digit blinds,
    ///bound to `transaction_hash`.
    ///
    ///`blinds` must be the vector returned by `generate_value_blinds`; the
    ///sum of the proof's commitments then equals the blinded point.
    pub fn prove(
        value: u64, blinds: &[Scalar], transaction_hash: &[u8; HASH_SIZE]
    ) -> Result<Self, RangeProofError> {
        return Self::prove_with_rng(value, blinds, transaction_hash, &mut thread_rng());
    }

    ///Same as `prove`, drawing all salts and seeds from the given RNG.
    pub fn prove_with_rng<R: RngCore + CryptoRng>(
        value: u64, blinds: &[Scalar], transaction_hash: &[u8; HASH_SIZE], rng: &mut R
    ) -> Result<Self, RangeProofError> {
        if blinds.len() != BIT_RANGE {
            return Err(RangeProofError::Malformed);
        }
        if blinds.iter().any(|blind| !blind.is_valid() || blind.is_zero()) {
            return Err(RangeProofError::Malformed);
        }

        let g = *G;
        let mut commitments: Vec<Point> = Vec::with_capacity(BIT_RANGE);
        let mut rings: Vec<BitRing> = Vec::with_capacity(BIT_RANGE);
        let mut indices: Vec<usize> = Vec::with_capacity(BIT_RANGE);

        for i in 0..BIT_RANGE {
            let digit_is_set = (value >> i) & 1 == 1;
            let value_point = bitcolumn_value(i);

            //B = bG when the digit is 0, B = bG + 2^i H when it is set
            let blind_point = blinds[i] * g;
            let commitment = match digit_is_set {
                true => blind_point + value_point,
                false => blind_point,
            };

            //the verifier rebuilds both ring keys from the commitment alone
            commitments.push(commitment);
            rings.push([commitment, commitment - value_point]);
            //the blind opens whichever member matches the digit
            indices.push(digit_is_set as usize);
        }

        let (challenge, salts) = borromean_sign(&rings, blinds, &indices, transaction_hash, rng);
        return Ok(Self { commitments, challenge, salts });
    }

    ///Verify the 64 ring signatures against the commitments and the
    ///transaction hash.
    ///
    ///Returns `Ok(())` if every ring closes. The caller still owns the
    ///binding check that `commitment_sum()` equals the blinded point the
    ///proof was issued for.
    pub fn verify(&self, transaction_hash: &[u8; HASH_SIZE]) -> Result<(), RangeProofError> {
        if self.commitments.len() != BIT_RANGE || self.salts.len() != BIT_RANGE {
            return Err(RangeProofError::Malformed);
        }
        if self.commitments.iter().any(|commitment| !commitment.is_valid()) {
            return Err(RangeProofError::Malformed);
        }

        //recreate the two-key rings from the digit commitments
        let mut rings: Vec<BitRing> = Vec::with_capacity(BIT_RANGE);
        for (i, commitment) in self.commitments.iter().enumerate() {
            rings.push([*commitment, *commitment - bitcolumn_value(i)]);
        }

        return match borromean_verify(&rings, &self.challenge, &self.salts, transaction_hash) {
            true => Ok(()),
            false => Err(RangeProofError::Invalid),
        };
    }

    ///Sum of the per-digit commitments; equals `bG + vH` for an honest proof.
    pub fn commitment_sum(&self) -> Point {
        let mut commitments = self.commitments.iter();
        let first = match commitments.next() {
            Some(point) => *point,
            None => return Point::invalid(),
        };
        return commitments.fold(first, |sum, point| sum + *point);
    }

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for BorromeanRangeProof {}
