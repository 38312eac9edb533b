//! Integration tests for the key derivation, envelope cipher, and codec.

use opensesame::crypto::{
    derive, from_text, open, seal, to_text, Envelope, MasterSecret, SaltSource, NONCE_LEN,
};
use opensesame::errors::DecryptError;
use rand::RngCore;

fn key_for(password: &str, email: &str) -> opensesame::crypto::VaultKey {
    derive(&MasterSecret::new(password), &SaltSource::identity(email)).expect("derive key")
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derivation_is_deterministic_per_password_and_email() {
    let a = key_for("Tr0ub4dor&3", "a@x.com");
    let b = key_for("Tr0ub4dor&3", "a@x.com");
    assert_eq!(a, b);
}

#[test]
fn different_email_gives_different_key() {
    let a = key_for("Tr0ub4dor&3", "a@x.com");
    let b = key_for("Tr0ub4dor&3", "b@x.com");
    assert_ne!(a, b);
}

#[test]
fn email_salt_is_case_sensitive() {
    // The email is used verbatim; no normalization.
    let a = key_for("Tr0ub4dor&3", "a@x.com");
    let b = key_for("Tr0ub4dor&3", "A@x.com");
    assert_ne!(a, b);
}

#[test]
fn empty_password_is_rejected() {
    let result = derive(&MasterSecret::new(""), &SaltSource::identity("a@x.com"));
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Envelope cipher
// ---------------------------------------------------------------------------

#[test]
fn seal_then_open_returns_plaintext() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let envelope = seal(b"correct horse battery staple", &key).unwrap();
    let plaintext = open(&envelope, &key).unwrap();
    assert_eq!(plaintext.as_slice(), b"correct horse battery staple");
}

#[test]
fn sealing_twice_uses_fresh_nonces() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let a = seal(b"same", &key).unwrap();
    let b = seal(b"same", &key).unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn flipping_any_ciphertext_byte_fails_authentication() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let envelope = seal(br#"{"title":"GitHub"}"#, &key).unwrap();

    for i in 0..envelope.ciphertext.len() {
        let mut tampered = envelope.clone();
        tampered.ciphertext[i] ^= 0x01;
        assert_eq!(
            open(&tampered, &key).unwrap_err(),
            DecryptError::Authentication,
            "byte {i} of the ciphertext"
        );
    }
}

#[test]
fn flipping_any_nonce_byte_fails_authentication() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let envelope = seal(b"payload", &key).unwrap();

    for i in 0..NONCE_LEN {
        let mut tampered = envelope.clone();
        tampered.nonce[i] ^= 0x80;
        assert_eq!(open(&tampered, &key).unwrap_err(), DecryptError::Authentication);
    }
}

#[test]
fn wrong_key_fails_authentication() {
    let right = key_for("Tr0ub4dor&3", "a@x.com");
    let wrong = key_for("wrong-password", "a@x.com");
    let envelope = seal(b"payload", &right).unwrap();
    assert_eq!(open(&envelope, &wrong).unwrap_err(), DecryptError::Authentication);
}

#[test]
fn empty_plaintext_round_trips() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let envelope = seal(b"", &key).unwrap();
    assert_eq!(envelope.ciphertext.len(), 16);
    assert!(open(&envelope, &key).unwrap().is_empty());
}

#[test]
fn truncated_ciphertext_fails() {
    let key = key_for("Tr0ub4dor&3", "a@x.com");
    let envelope = Envelope::from_parts(&[0u8; NONCE_LEN], vec![1, 2, 3]).unwrap();
    assert_eq!(open(&envelope, &key).unwrap_err(), DecryptError::Authentication);
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

#[test]
fn codec_handles_empty_and_single_byte() {
    assert_eq!(to_text(&[]), "");
    assert_eq!(from_text("").unwrap(), Vec::<u8>::new());
    assert_eq!(to_text(&[0x00]), "AA==");
    assert_eq!(from_text("AA==").unwrap(), vec![0x00]);
}

#[test]
fn codec_handles_large_random_input() {
    let mut bytes = vec![0u8; 10_000];
    rand::rng().fill_bytes(&mut bytes);
    let text = to_text(&bytes);
    assert_eq!(from_text(&text).unwrap(), bytes);
}

#[test]
fn codec_rejects_invalid_text() {
    assert!(matches!(from_text("not base64!"), Err(DecryptError::Encoding(_))));
}
