use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt;

/// Plaintext credential. `Debug` is redacted so it never reaches a log line.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

/// PHC-format Argon2 digest; salt and cost live inside the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hash a password using Argon2id with default parameters and a fresh salt.
pub fn hash_password(password: &Password) -> Result<PasswordHashString, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(PasswordHashString::new(password_hash))
}

/// Check a password against a stored digest.
///
/// `Ok(false)` on mismatch; `Err` only when the digest itself is malformed.
pub fn verify_password(
    password: &Password,
    password_hash: &PasswordHashString,
) -> Result<bool, anyhow::Error> {
    let parsed_hash = PasswordHash::new(password_hash.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))?;

    match Argon2::default().verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Password verification failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2() {
        let hash = hash_password(&Password::new("superpass123")).expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("superpass123"));
    }

    #[test]
    fn test_verify_round_trip() {
        let password = Password::new("superpass123");
        let hash = hash_password(&password).expect("hash");

        assert!(verify_password(&password, &hash).expect("verify"));
        assert!(!verify_password(&Password::new("superpass124"), &hash).expect("verify"));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let password = Password::new("superpass123");
        let a = hash_password(&password).expect("hash");
        let b = hash_password(&password).expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_mutated_digest_does_not_verify() {
        let password = Password::new("superpass123");
        let hash = hash_password(&password).expect("hash").into_string();

        // change one character inside the encoded digest
        let mut bytes = hash.into_bytes();
        let pos = bytes.len() - 10;
        bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
        let mutated = PasswordHashString::new(String::from_utf8(bytes).expect("ascii"));

        assert!(!verify_password(&password, &mutated).unwrap_or(false));
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        let result = verify_password(
            &Password::new("superpass123"),
            &PasswordHashString::new("not-a-phc-string".to_string()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let rendered = format!("{:?}", Password::new("superpass123"));
        assert!(!rendered.contains("superpass123"));
    }
}
