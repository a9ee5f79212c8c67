//! Password hashing adapter backed by Argon2id.

use argon2::password_hash::{PasswordHasher as _, SaltString};
use argon2::Argon2;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordDigest};

/// [`PasswordHasher`] producing salted Argon2id PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError> {
        let salt = SaltString::generate(rand::thread_rng());
        let digest = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
            .to_string();
        Ok(PasswordDigest::new(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};
    use rstest::rstest;

    fn password(value: &str) -> Password {
        Password::new(value).expect("valid password")
    }

    #[rstest]
    fn produces_verifiable_argon2_digest() {
        let digest = Argon2PasswordHasher
            .hash(&password("secret1"))
            .expect("hash succeeds");

        assert!(digest.as_ref().starts_with("$argon2"));
        let parsed = PasswordHash::new(digest.as_ref()).expect("PHC string");
        assert!(
            Argon2::default()
                .verify_password(b"secret1", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong-one", &parsed)
                .is_err()
        );
    }

    #[rstest]
    fn never_stores_plaintext() {
        let digest = Argon2PasswordHasher
            .hash(&password("secret1"))
            .expect("hash succeeds");

        assert!(!digest.as_ref().contains("secret1"));
    }

    #[rstest]
    fn salts_each_hash() {
        let first = Argon2PasswordHasher
            .hash(&password("secret1"))
            .expect("hash succeeds");
        let second = Argon2PasswordHasher
            .hash(&password("secret1"))
            .expect("hash succeeds");

        assert_ne!(first.as_ref(), second.as_ref());
    }
}
