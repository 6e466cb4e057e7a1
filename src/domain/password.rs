//! New-password value object.
//!
//! Holds the minimal password policy and the wire encoding expected by the
//! directory's `unicodePwd` attribute.

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// A new password that has passed the local policy check.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword {
    plain: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewPassword")
            .field("plain", &"[REDACTED]")
            .finish()
    }
}

impl NewPassword {
    /// Validate a candidate password.
    ///
    /// # Errors
    /// Returns a validation error if the password is empty or shorter than
    /// `MIN_PASSWORD_LENGTH` characters.
    pub fn parse(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation("new password cannot be empty"));
        }

        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(Self {
            plain: plain_text.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.plain
    }

    /// Quoted, UTF-16LE encoded value for a `unicodePwd` replace.
    pub fn to_unicode_pwd(&self) -> Vec<u8> {
        encode_unicode_pwd(&self.plain)
    }
}

/// Encode `"<password>"` as UTF-16 little-endian without a byte order mark.
pub fn encode_unicode_pwd(plain_text: &str) -> Vec<u8> {
    format!("\"{}\"", plain_text)
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect()
}
