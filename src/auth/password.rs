use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{ApiError, ApiResult};

/// Marker for legacy rows whose "hash" is the plaintext itself. Kept for
/// compatibility with data written by the old insertion path; deprecated,
/// never the production default.
pub const NOOP_PREFIX: &str = "{noop}";

/// Password hashing scheme, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// Salted Argon2id, the default.
    Argon2,
    /// Plaintext prefixed with `{noop}`. Test/compat only.
    Noop,
}

impl HashScheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "argon2" => Some(Self::Argon2),
            "noop" => Some(Self::Noop),
            _ => None,
        }
    }

    pub fn hash(&self, plain: &str) -> ApiResult<String> {
        match self {
            Self::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(plain.as_bytes(), &salt)
                    .map_err(|e| {
                        error!(error = %e, "argon2 hash_password error");
                        ApiError::Internal(anyhow::anyhow!(e.to_string()))
                    })?
                    .to_string();
                Ok(hash)
            }
            Self::Noop => Ok(format!("{NOOP_PREFIX}{plain}")),
        }
    }
}

/// Verify a password against a stored hash.
///
/// Dispatches on the stored value, not on the configured scheme: `{noop}`
/// rows written by the legacy path must keep verifying even after the
/// default moved to Argon2.
pub fn verify_password(plain: &str, hash: &str) -> ApiResult<bool> {
    if let Some(stored_plain) = hash.strip_prefix(NOOP_PREFIX) {
        return Ok(stored_plain == plain);
    }
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        ApiError::Internal(anyhow::anyhow!(e.to_string()))
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = HashScheme::Argon2
            .hash(password)
            .expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = HashScheme::Argon2
            .hash(password)
            .expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        let msg = err.to_string();
        assert!(!msg.is_empty());
    }

    #[test]
    fn noop_scheme_stores_marked_plaintext() {
        let hash = HashScheme::Noop.hash("secret1").unwrap();
        assert_eq!(hash, "{noop}secret1");
    }

    #[test]
    fn noop_rows_verify_by_plain_comparison() {
        assert!(verify_password("secret1", "{noop}secret1").unwrap());
        assert!(!verify_password("secret2", "{noop}secret1").unwrap());
    }

    #[test]
    fn scheme_names_parse() {
        assert_eq!(HashScheme::from_name("argon2"), Some(HashScheme::Argon2));
        assert_eq!(HashScheme::from_name("noop"), Some(HashScheme::Noop));
        assert_eq!(HashScheme::from_name("bcrypt"), None);
    }
}
