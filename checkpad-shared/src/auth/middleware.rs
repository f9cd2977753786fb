/// Session resolution for Axum handlers
///
/// Every protected route runs [`resolve_session`] before its handler: the
/// bearer token is validated, the backing session row is looked up, and an
/// [`AuthContext`] naming the account is attached to the request. Handlers
/// then pass the account id explicitly into the store operations; nothing
/// downstream reads the current user from ambient state.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use checkpad_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("account {}", auth.account_id)
/// }
/// ```
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::session::{validate_session_token, SessionTokenError};
use crate::models::session::Session;

/// Authentication context added to request extensions
///
/// Present on a request exactly when a session resolved successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Account the request acts on behalf of
    pub account_id: i64,

    /// Resolved session id (logout revokes this row)
    pub session_id: Uuid,
}

/// Error type for session resolution
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header on the request
    MissingCredentials,

    /// Authorization header is not a bearer token
    InvalidFormat(String),

    /// Token failed validation, or its session is revoked or expired
    InvalidSession(String),

    /// Session lookup hit a storage failure
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidSession(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Resolves an Authorization header to an authenticated account
///
/// Three checks have to pass:
///
/// 1. The header carries a `Bearer` token.
/// 2. The token's signature, issuer, and expiration are valid.
/// 3. The session row the token names still exists, is unexpired, and was
///    issued for the account the token claims.
///
/// A missing row means the session was logged out (or swept after
/// expiring); the token is rejected no matter how valid its signature is.
///
/// # Errors
///
/// Any failed check yields an [`AuthError`]; callers surface all of them
/// as a generic unauthenticated response except the malformed-header case.
pub async fn resolve_session(
    pool: &PgPool,
    secret: &str,
    auth_header: Option<&str>,
) -> Result<AuthContext, AuthError> {
    let auth_header = auth_header.ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_session_token(token, secret).map_err(|e| match e {
        SessionTokenError::Expired => AuthError::InvalidSession("Session expired".to_string()),
        _ => AuthError::InvalidSession(format!("Invalid session token: {}", e)),
    })?;

    let session = Session::find_active(pool, claims.sid)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Session lookup failed: {}", e)))?
        .ok_or_else(|| AuthError::InvalidSession("Session revoked or expired".to_string()))?;

    // The row must match the account named in the token
    if session.account_id != claims.sub {
        return Err(AuthError::InvalidSession(
            "Session does not match account".to_string(),
        ));
    }

    Ok(AuthContext {
        account_id: session.account_id,
        session_id: session.id,
    })
}
