//! Session token generation.

use rand::{RngCore, rngs::OsRng};

use super::SessionError;

/// Random bytes behind every token; hex encoding doubles it to 128 characters.
pub const TOKEN_BYTES: usize = 64;
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Create a new session token from the OS random source.
///
/// # Errors
/// Returns `SessionError::Entropy` if the random source cannot fill the buffer.
pub fn generate_session_token() -> Result<String, SessionError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SessionError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Blank means empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
