//! Argon2 hashing for staff passwords and player PINs.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password or PIN with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password or PIN against a stored hash.
///
/// An unparseable stored hash verifies as false rather than erroring; a
/// corrupt credential row must not let a login through.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("1234").unwrap();
        assert!(verify_password("1234", &hash));
        assert!(!verify_password("4321", &hash));
    }

    #[test]
    fn garbage_hash_verifies_false() {
        assert!(!verify_password("1234", "not-a-phc-string"));
    }
}
