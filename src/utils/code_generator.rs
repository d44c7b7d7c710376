//! Short code generation.
//!
//! Codes are [`CODE_LENGTH`] symbols drawn uniformly from [`ALPHABET`] using the
//! operating system CSPRNG.

use rand::TryRngCore;
use rand::rngs::OsRng;

/// The 62 symbols a short code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of symbols in a generated code.
pub const CODE_LENGTH: usize = 6;

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or above
/// it are rejected so that `byte % 62` stays uniform.
const REJECTION_ZONE: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// Error raised when the random source cannot produce bytes.
#[derive(Debug, thiserror::Error)]
#[error("random source unavailable: {0}")]
pub struct CodeGenError(pub String);

/// Source of fresh short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code. Uniqueness is not checked here.
    fn generate(&self) -> Result<String, CodeGenError>;
}

/// Production generator backed by [`OsRng`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, CodeGenError> {
        generate_code()
    }
}

/// Generates a cryptographically secure random short code.
///
/// # Errors
///
/// Returns [`CodeGenError`] if the OS random source fails. This is a fatal
/// environment problem, not something callers should retry.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code().unwrap();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> Result<String, CodeGenError> {
    let mut code = String::with_capacity(CODE_LENGTH);
    let mut buffer = [0u8; CODE_LENGTH * 2];

    while code.len() < CODE_LENGTH {
        OsRng
            .try_fill_bytes(&mut buffer)
            .map_err(|e| CodeGenError(e.to_string()))?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_ZONE) {
            if code.len() == CODE_LENGTH {
                break;
            }
            code.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
        }
    }

    Ok(code)
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
