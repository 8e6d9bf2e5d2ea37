//! Argon2id password hashing in PHC string format.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};

use crate::error::AppError;

/// Work factor for new hashes. Verification always follows the parameters
/// encoded in the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordCost {
    #[default]
    Default,
    /// Minimal memory and iterations so test suites stay fast.
    Low,
}

impl PasswordCost {
    fn hasher(self) -> Result<Argon2<'static>, AppError> {
        let params = match self {
            PasswordCost::Default => Params::default(),
            PasswordCost::Low => Params::new(1024, 1, 1, None)
                .map_err(|e| AppError::internal(format!("argon2 params: {e}")))?,
        };
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

pub fn hash_password(password: &str, cost: PasswordCost) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| AppError::internal(format!("salt generation failed: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::internal(format!("salt encoding failed: {e}")))?;

    let phc = cost
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?
        .to_string();
    Ok(phc)
}

/// False for a wrong password and for a stored hash that does not parse.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
