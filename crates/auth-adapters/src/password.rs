//! Argon2 implementation of the password hashing port.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};

use domains::{DomainError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgonPasswordHasher;

impl domains::PasswordHasher for ArgonPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| DomainError::Backend(format!("password hashing failed: {err}")))
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::PasswordHasher;

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = ArgonPasswordHasher;
        let hash = hasher.hash("парольный пароль").unwrap();
        assert!(hasher.verify("парольный пароль", &hash));
        assert!(!hasher.verify("другой", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!ArgonPasswordHasher.verify("x", "not-a-phc-string"));
    }
}
