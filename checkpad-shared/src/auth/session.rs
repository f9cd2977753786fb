/// Session token generation and validation
///
/// A login issues a signed token (HS256) that identifies both the account
/// and a server-side session row. The signature stops tampering; the row
/// makes revocation real: logout deletes the row, and a token whose row is
/// gone no longer resolves, even though its signature is still valid.
///
/// # Claims
///
/// - `sub`: account id the session was issued for
/// - `sid`: id of the backing row in the `sessions` table
/// - `iss`: always "checkpad"
/// - `iat` / `nbf` / `exp`: standard timestamps; `exp` mirrors the row's
///   `expires_at`
///
/// # Example
///
/// ```
/// use checkpad_shared::auth::session::{create_session_token, validate_session_token, SessionClaims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = SessionClaims::new(42, Uuid::new_v4(), Duration::hours(24));
/// let token = create_session_token(&claims, "a-secret-of-at-least-32-bytes!!!")?;
///
/// let validated = validate_session_token(&token, "a-secret-of-at-least-32-bytes!!!")?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim value
const ISSUER: &str = "checkpad";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    /// Failed to create a token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Signature, issuer, or structural validation failed
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: account id
    pub sub: i64,

    /// Backing session row id
    pub sid: Uuid,

    /// Issuer, always "checkpad"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates claims for an account/session pair, expiring after `ttl`
    pub fn new(account_id: i64, session_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: account_id,
            sid: session_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks whether the claims are past their expiration
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a session token
///
/// # Errors
///
/// Returns `SessionTokenError::CreateError` if encoding fails.
pub fn create_session_token(
    claims: &SessionClaims,
    secret: &str,
) -> Result<String, SessionTokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionTokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies the signature, issuer, expiration, and not-before time. A
/// passing token still has to be resolved against its session row before
/// the request is considered authenticated.
///
/// # Errors
///
/// Returns `SessionTokenError::Expired` for an out-of-date token and
/// `SessionTokenError::ValidationError` for any other failure.
pub fn validate_session_token(
    token: &str,
    secret: &str,
) -> Result<SessionClaims, SessionTokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionTokenError::Expired,
        _ => SessionTokenError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
