//! End-to-end signing tests over a curve whose group order equals its field
//! modulus, so scalar arithmetic modulo the modulus is consistent with the
//! group structure for every nonce.

use kampyle::{
    sign, signature::RandomizedSigner, signature::Verifier, verify, Curve, CurveForm, Group,
    KeyPair, Point, Scalar, Signature, SigningKey, VerifyingKey,
};
use rand_core::{OsRng, RngCore, SeedableRng};
use sha2::Sha256;

fn signing_group() -> Group {
    let curve = Curve::new(
        CurveForm::Weierstrass {
            a: Scalar::from_u64(4),
            b: Scalar::from_u64(2),
        },
        Scalar::from_u64(1031),
    )
    .unwrap();
    Group::new(
        curve,
        Point::affine(Scalar::from_u64(0), Scalar::from_u64(473)),
    )
    .unwrap()
}

#[test]
fn round_trip() {
    let group = signing_group();
    let key = KeyPair::generate(&mut OsRng, &group).unwrap();

    // Message contents are deterministic; keys and nonces are not.
    let mut message_rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    let mut message = [0u8; 32];
    for _ in 0..1000 {
        message_rng.fill_bytes(&mut message);
        let signature = sign::<Sha256>(&mut OsRng, &message, &key, &group).unwrap();
        assert!(verify::<Sha256>(&message, &signature, key.public(), &group));
    }
}

#[test]
fn known_signature_fixture() {
    let group = signing_group();
    let key = KeyPair::from_secret(Scalar::from_u64(123), &group).unwrap();
    assert_eq!(
        key.public(),
        &Point::affine(Scalar::from_u64(133), Scalar::from_u64(134))
    );

    // Produced with the test nonce 5; checkable by hand.
    let signature = Signature::from_scalars(Scalar::from_u64(532), Scalar::from_u64(937));
    assert!(verify::<Sha256>(b"hello", &signature, key.public(), &group));
    assert!(!verify::<Sha256>(b"hellp", &signature, key.public(), &group));

    for i in 0..5 {
        let mut tampered = *b"hello";
        tampered[i] ^= 0x01;
        assert!(!verify::<Sha256>(
            &tampered,
            &signature,
            key.public(),
            &group
        ));
    }
}

#[test]
fn signatures_are_randomized() {
    let group = signing_group();
    let key = KeyPair::generate(&mut OsRng, &group).unwrap();

    // A fresh nonce is drawn per signature, so signing the same message
    // repeatedly produces more than one distinct signature.
    let signatures: Vec<Signature> = (0..20)
        .map(|_| sign::<Sha256>(&mut OsRng, b"same message", &key, &group).unwrap())
        .collect();
    assert!(signatures.iter().any(|s| s != &signatures[0]));
    for signature in &signatures {
        assert!(verify::<Sha256>(
            b"same message",
            signature,
            key.public(),
            &group
        ));
    }
}

#[test]
fn wrong_key_is_rejected() {
    let group = signing_group();
    let other = KeyPair::from_secret(Scalar::from_u64(500), &group).unwrap();
    assert_eq!(
        other.public(),
        &Point::affine(Scalar::from_u64(507), Scalar::from_u64(16))
    );

    // A signature by the secret 123 does not verify against another key.
    let signature = Signature::from_scalars(Scalar::from_u64(532), Scalar::from_u64(937));
    assert!(!verify::<Sha256>(
        b"hello",
        &signature,
        other.public(),
        &group
    ));
}

#[test]
fn signer_verifier_traits() {
    let signer = SigningKey::<Sha256>::random(&mut OsRng, signing_group()).unwrap();
    let verifier = signer.verifying_key();
    let signature = signer.try_sign_with_rng(&mut OsRng, b"traits").unwrap();
    assert!(verifier.verify(b"traits", &signature).is_ok());

    let group = signing_group();
    let key = KeyPair::from_secret(Scalar::from_u64(123), &group).unwrap();
    let verifier = VerifyingKey::<Sha256>::new(*key.public(), group).unwrap();
    let signature = Signature::from_scalars(Scalar::from_u64(532), Scalar::from_u64(937));
    assert!(verifier.verify(b"hello", &signature).is_ok());
    assert!(verifier.verify(b"hellp", &signature).is_err());
}
