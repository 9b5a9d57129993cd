//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) so the salt and the
//! work factor travel with the hash. The work factor is fixed to the argon2
//! crate defaults.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use rand::{RngCore, rngs::OsRng};

use super::SessionError;

const SALT_LEN: usize = 16;

/// Hash a plaintext password into an Argon2id PHC string.
///
/// # Errors
/// Returns `SessionError::Hashing` if the salt cannot be drawn from the OS
/// random source or the hasher rejects its input.
pub fn hash_password(plaintext: &str) -> Result<String, SessionError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| SessionError::Hashing(format!("salt generation failed: {e}")))?;
    let salt = SaltString::encode_b64(&salt)
        .map_err(|e| SessionError::Hashing(format!("salt encoding failed: {e}")))?;

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SessionError::Hashing(e.to_string()))
}

/// Check a plaintext password against a stored PHC hash.
///
/// A wrong password or an unparseable hash is `Ok(false)`. Only an internal
/// cryptographic failure is an error.
///
/// # Errors
/// Returns `SessionError::Hashing` when the verifier fails internally.
pub fn verify_password(hash: &str, plaintext: &str) -> Result<bool, SessionError> {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return Ok(false);
    };

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Crypto) => {
            Err(SessionError::Hashing("argon2 verifier failed".to_string()))
        }
        Err(_) => Ok(false),
    }
}

/// [`verify_password`] on the blocking pool, keeping async workers free while
/// Argon2 runs.
///
/// # Errors
/// Returns `SessionError::Hashing` when the verifier fails or its task is lost.
pub async fn verify_password_blocking(
    hash: String,
    plaintext: String,
) -> Result<bool, SessionError> {
    tokio::task::spawn_blocking(move || verify_password(&hash, &plaintext))
        .await
        .map_err(|e| SessionError::Hashing(format!("verifier task failed: {e}")))?
}
