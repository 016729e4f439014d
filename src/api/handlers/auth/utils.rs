//! Validation, normalization and secret-hashing helpers for auth flows.

use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use regex::Regex;
use sha2::{Digest, Sha256};

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Handles are case-insensitive; store and compare them lowercased.
pub(crate) fn normalize_handle(handle: &str) -> String {
    handle.trim().to_lowercase()
}

/// Emails lowercase, phone numbers pass through trimmed.
pub(crate) fn normalize_identifier(identifier: &str) -> String {
    let trimmed = identifier.trim();
    if trimmed.contains('@') {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Basic email format check on already-normalized input.
pub(crate) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// International phone format: `+`, country code, ten-digit subscriber number.
pub(crate) fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^\+\d{1,4}\d{10}$").is_ok_and(|regex| regex.is_match(phone))
}

/// Fixed-length numeric one-time code from the OS entropy source.
pub(crate) fn generate_code(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::rngs::OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Argon2id hash for passwords and one-time codes; only the hash is stored.
pub(crate) fn hash_secret(value: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(value.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash secret: {err}"))
}

/// Compare a candidate value against a stored Argon2id hash.
pub(crate) fn verify_secret(value: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(value.as_bytes(), &parsed)
            .is_ok()
    })
}

/// SHA-256 fingerprint of a renewal credential; raw credentials are never
/// stored server-side, only this fingerprint is mirrored on the account.
pub(crate) fn fingerprint(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}
