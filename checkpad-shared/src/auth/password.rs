/// Password hashing using Argon2id
///
/// Credentials are stored as PHC-format Argon2id hashes. The plaintext
/// password never touches the database or the logs.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id
/// - **Memory**: 19 MiB (19456 KB)
/// - **Iterations**: 2 passes
/// - **Parallelism**: 1 lane
/// - **Salt**: 16 random bytes from the OS RNG, unique per password
///
/// Verification reads the parameters back out of the stored hash, so the
/// cost settings can be raised later without invalidating old credentials.
///
/// # Example
///
/// ```
/// use checkpad_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
/// assert!(verify_password("correct horse battery staple", &hash)?);
/// assert!(!verify_password("correct horse battery staples", &hash)?);
/// # Ok(())
/// # }
/// ```
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash a password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify a password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored credential is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// Returns the hash in PHC string format, e.g.
/// `$argon2id$v=19$m=19456,t=2,p=1$...$...`, which embeds the algorithm,
/// parameters, and salt alongside the digest.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if parameter construction or hashing
/// fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored PHC-format hash
///
/// The comparison is constant-time, so a mismatch takes as long as a match
/// and reveals nothing about where the candidate diverged.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed
/// and `PasswordError::VerifyError` for any other verification failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are read from the hash itself
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_phc_format() {
        let hash = hash_password("pw1").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_hash_password_unique_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        for password in ["pw1", "with spaces", "sy̆mbols!@#$%", "密码-パスワード"] {
            let hash = hash_password(password).expect("Hash should succeed");
            assert!(
                verify_password(password, &hash).expect("Verify should succeed"),
                "Password {:?} should verify against its own hash",
                password
            );
        }
    }

    #[test]
    fn test_verify_password_rejects_wrong_password() {
        let hash = hash_password("pw1").expect("Hash should succeed");

        assert!(!verify_password("pw2", &hash).expect("Verify should succeed"));
        assert!(!verify_password("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_rejects_single_char_variants() {
        let password = "s3cret-passphrase";
        let hash = hash_password(password).expect("Hash should succeed");

        // Flip each position in turn; every variant must fail
        for i in 0..password.len() {
            let mut variant: Vec<u8> = password.as_bytes().to_vec();
            variant[i] = if variant[i] == b'x' { b'y' } else { b'x' };
            let variant = String::from_utf8(variant).unwrap();

            assert!(
                !verify_password(&variant, &hash).expect("Verify should succeed"),
                "Variant {:?} must not verify",
                variant
            );
        }
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("pw1", "not-a-phc-string").is_err());
        assert!(verify_password("pw1", "$argon2id$garbage").is_err());
    }
}
