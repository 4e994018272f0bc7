// SPDX short identifier: Unlicense

//! End-to-end RingCT balance argument: a two-row MLSAG whose second row
//! proves that the input commitment equals the sum of the output commitments.

use mlsag::{
    common::*,
    hashes::hash_to_point,
    pedersen::Commitment,
    signature::MLSAGSignature
};

const BLIND_A: &str = "174ff68c2a964701642e343a0a0fc3437e5c2d7242d150d0173ec006fbd900b7";
const BLIND_B: &str = "41e146a7bb895fcdbb7ab6b33c598b5693be6480455f878964f45fdac7266393";
const BLIND_C: &str = "027338898dd3e3bc42b1da0c1b4dbfa1989cef8afb9dbe6960015c5f83f11aef";
const PRIVATE_KEY: &str = "6184aee9c77893796f3c780ea43db9de8dfa24f1df5260f4acb148f0c6a7609f";

//the signed message, "deadbeef" in base16
const MESSAGE: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

fn scalar_from_hex(hex_str: &str) -> Scalar {
    let bytes: [u8; 32] = hex::decode(hex_str).unwrap().try_into().unwrap();
    return Scalar::from_bytes(bytes);
}

//spend 10000 into outputs of 7000 and 3000, hidden among `decoys` decoy columns
fn spend_with_decoys(decoys: usize) {
    let blind_a = scalar_from_hex(BLIND_A);
    let blind_b = scalar_from_hex(BLIND_B);
    let blind_c = scalar_from_hex(BLIND_C);

    //input and output commitments
    let commit_a = Commitment::commit(10000, blind_a);
    let commit_b = Commitment::commit(7000, blind_b);
    let commit_c = Commitment::commit(3000, blind_c);

    let private_key = scalar_from_hex(PRIVATE_KEY);
    let public_key = private_key * *G;

    //the balance row: the difference of commitments is a commitment to zero,
    //so its blinding difference acts as a private key on G
    let commitment_secret = blind_a - (blind_b + blind_c);
    let output_commit = commit_b.to_point() + commit_c.to_point();

    let secrets = vec![private_key, commitment_secret];
    let mut owner_row = vec![public_key];
    let mut commit_row = vec![commit_a.to_point() - output_commit];

    for i in 0..decoys as u64 {
        let decoy_public_key = hash_to_point(Scalar::from(i + 110).as_bytes());
        let decoy_commit = hash_to_point(Scalar::from(i + 4).as_bytes());

        owner_row.push(decoy_public_key);
        commit_row.push(decoy_commit - output_commit);
    }
    let publics = PointTable::from_rows(&[owner_row, commit_row]);

    //sign at the genuine column and verify: the challenge cycle closes on
    //the transcript hash exactly when the equation balances
    let signature = MLSAGSignature::sign(&secrets, &publics, 0, &MESSAGE).unwrap();
    signature.verify(&publics, &MESSAGE).unwrap();

    //an unbalanced spend (a forged second-row secret) must not verify
    let mut forged_secrets = secrets;
    forged_secrets[1] = commitment_secret + Scalar::from(1u64);
    let forged = MLSAGSignature::sign(&forged_secrets, &publics, 0, &MESSAGE).unwrap();
    assert_eq!(
        forged.verify(&publics, &MESSAGE),
        Err(SignatureError::Invalid)
    );
}

#[test]
fn ring_ct_balance_argument() {
    spend_with_decoys(250);
}

//the full-size ring from the reference scenario; slow, so opt-in
#[test]
#[ignore]
fn ring_ct_balance_argument_full() {
    spend_with_decoys(100_000);
}

#[test]
fn balance_with_fee() {
    let r1 = random_scalar();
    let r2 = random_scalar();

    let input = Commitment::commit(10, r1 + r2);
    let outputs = vec![Commitment::commit(4, r1), Commitment::commit(5, r2)];

    //4 + 5 + fee of 1 == 10
    assert!(Commitment::is_balanced(vec![input], outputs.clone(), 1));
    assert!(!Commitment::is_balanced(vec![input], outputs, 2));
}
