// SPDX short identifier: Unlicense

use mlsag::{
    common::*,
    hashes::h_bytes,
    rangeproof::{generate_value_blinds, BorromeanRangeProof, BIT_RANGE, MAX_VALUE}
};

#[test]
fn borromean_roundtrip() {
    let transaction_hash = h_bytes(b"transaction");

    //all-zero digits, all-one digits, and a few in between
    for value in [0u64, 1, 2, 1234567890, 1u64 << 63, MAX_VALUE] {
        let (blinded, blinds) = generate_value_blinds(value);

        let proof = BorromeanRangeProof::prove(value, &blinds, &transaction_hash).unwrap();
        proof.verify(&transaction_hash).unwrap();

        //the binding check belongs to the caller: the digit commitments
        //must sum to the blinded point the blinds were drawn for
        assert_eq!(proof.commitment_sum(), blinded);
    }
}

#[test]
fn proof_binds_to_its_commitment() {
    let transaction_hash = h_bytes(b"transaction");

    let (blinded, blinds) = generate_value_blinds(110);
    let proof = BorromeanRangeProof::prove(110, &blinds, &transaction_hash).unwrap();
    proof.verify(&transaction_hash).unwrap();

    //any other point fails the caller's sum check
    let (other_blinded, _) = generate_value_blinds(110);
    assert!(proof.commitment_sum() != other_blinded);
    assert!(proof.commitment_sum() == blinded);

    //re-drawn blinds do not commit to the same point
    let (_, fresh_blinds) = generate_value_blinds(110);
    let fresh_proof = BorromeanRangeProof::prove(110, &fresh_blinds, &transaction_hash).unwrap();
    assert!(fresh_proof.commitment_sum() != blinded);
}

#[test]
fn tampering_breaks_verification() {
    let transaction_hash = h_bytes(b"transaction");
    let (_, blinds) = generate_value_blinds(98765);
    let proof = BorromeanRangeProof::prove(98765, &blinds, &transaction_hash).unwrap();

    //a substituted digit commitment changes the rings and the transcript
    let mut tampered = proof.clone();
    tampered.commitments[17] = random_point();
    assert_eq!(
        tampered.verify(&transaction_hash),
        Err(RangeProofError::Invalid)
    );

    //the proof is bound to its transaction hash
    assert_eq!(
        proof.verify(&h_bytes(b"other transaction")),
        Err(RangeProofError::Invalid)
    );
}

#[test]
fn malformed_parameters_are_rejected() {
    let transaction_hash = h_bytes(b"transaction");

    //wrong blind count
    let short_blinds: Vec<Scalar> = (0..BIT_RANGE - 1).map(|_| random_scalar()).collect();
    assert_eq!(
        BorromeanRangeProof::prove(5, &short_blinds, &transaction_hash),
        Err(RangeProofError::Malformed)
    );

    //an invalid blind is rejected at the boundary
    let mut blinds: Vec<Scalar> = (0..BIT_RANGE).map(|_| random_scalar()).collect();
    blinds[9] = Scalar::from_bytes([0xffu8; 32]);
    assert_eq!(
        BorromeanRangeProof::prove(5, &blinds, &transaction_hash),
        Err(RangeProofError::Malformed)
    );

    //a truncated proof is malformed, not a panic
    let (_, blinds) = generate_value_blinds(5);
    let mut proof = BorromeanRangeProof::prove(5, &blinds, &transaction_hash).unwrap();
    proof.commitments.pop();
    assert_eq!(
        proof.verify(&transaction_hash),
        Err(RangeProofError::Malformed)
    );
}

#[cfg(feature = "to_bytes")]
#[test]
fn borromean_serialization() {
    let transaction_hash = h_bytes(b"transaction");
    let (blinded, blinds) = generate_value_blinds(424242);
    let proof = BorromeanRangeProof::prove(424242, &blinds, &transaction_hash).unwrap();

    let serialized = proof.to_bytes().unwrap();
    let deserialized = BorromeanRangeProof::from_bytes(&serialized).unwrap();

    deserialized.verify(&transaction_hash).unwrap();
    assert_eq!(deserialized.commitment_sum(), blinded);
}
