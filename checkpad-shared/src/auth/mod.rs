/// Authentication utilities
///
/// This module provides the credential and session primitives for Checkpad:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Signed session tokens backed by server-side session rows
/// - [`middleware`]: Request-side session resolution for Axum handlers
///
/// # Security Properties
///
/// - **Password Hashing**: Argon2id with per-password random salts
/// - **Session Tokens**: HS256-signed, bound to a revocable database row
/// - **Constant-time Comparison**: Password verification never short-circuits
///
/// # Example
///
/// ```no_run
/// use checkpad_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```
pub mod middleware;
pub mod password;
pub mod session;
