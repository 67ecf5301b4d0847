use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// Credential-verification collaborator.
///
/// The auth core never derives or inspects hashes itself; login hands the
/// submitted password and the stored hash to this seam and gets a yes/no.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, password: &str, stored_hash: &str) -> bool;
}

/// Argon2id verifier over PHC-format hashes.
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            // An unparseable stored hash is a data problem; treat as mismatch.
            tracing::warn!("stored credential hash is not in PHC format");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHasher, password_hash::SaltString};

    fn hash_of(password: &str) -> String {
        let salt = SaltString::from_b64("YWJjZGVmZ2hpamtsbW5vcA").unwrap();
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn accepts_the_matching_password() {
        let hash = hash_of("test!1234");
        assert!(Argon2Verifier.verify("test!1234", &hash));
    }

    #[test]
    fn rejects_a_wrong_password() {
        let hash = hash_of("test!1234");
        assert!(!Argon2Verifier.verify("nope", &hash));
    }

    #[test]
    fn rejects_a_non_phc_stored_hash() {
        assert!(!Argon2Verifier.verify("test!1234", "plaintext-left-in-db"));
    }
}
