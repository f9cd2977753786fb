/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create a new account
/// - `POST /v1/auth/login` - Authenticate and receive a session token
/// - `POST /v1/auth/logout` - Revoke the current session
///
/// Registration does not log the new account in; clients follow up with a
/// login request, mirroring the usual register-then-sign-in flow.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use checkpad_shared::{
    auth::{
        middleware::AuthContext,
        password,
        session::{create_session_token, SessionClaims},
    },
    models::{
        account::{Account, NewAccount},
        session::Session,
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username (case-sensitive, unique)
    #[validate(length(min = 1, max = 150, message = "Username must be 1 to 150 characters"))]
    pub username: String,

    /// Password (stored only as a hash)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New account id
    pub account_id: i64,

    /// Registered username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Account id
    pub account_id: i64,

    /// Username
    pub username: String,

    /// Bearer token for subsequent requests
    pub session_token: String,

    /// When the session stops resolving
    pub expires_at: DateTime<Utc>,
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: username already taken. Uniqueness is enforced by the
///   database constraint, so two concurrent registrations of the same name
///   cannot both succeed.
/// - `422 Unprocessable Entity`: empty or over-long fields
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    // Insert directly; the unique constraint decides duplicates
    let account = Account::create(
        &state.db,
        NewAccount {
            username: req.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, username = %account.username, "Account registered");

    Ok(Json(RegisterResponse {
        account_id: account.id,
        username: account.username,
    }))
}

/// Authenticate and establish a session
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown username or wrong password. One message
///   covers both so the response does not reveal which half failed.
/// - `422 Unprocessable Entity`: empty fields
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let account = Account::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &account.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let session = Session::create(&state.db, account.id, state.session_ttl()).await?;

    let claims = SessionClaims::new(account.id, session.id, state.session_ttl());
    let session_token = create_session_token(&claims, state.session_secret())?;

    tracing::info!(account_id = account.id, session_id = %session.id, "Session established");

    Ok(Json(LoginResponse {
        account_id: account.id,
        username: account.username,
        session_token,
        expires_at: session.expires_at,
    }))
}

/// Revoke the current session
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/logout
/// Authorization: Bearer <session token>
/// ```
///
/// The session row is deleted, so the token stops resolving immediately.
/// Logging out twice is not an error; the second call is a no-op.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    Session::revoke(&state.db, auth.session_id).await?;

    tracing::info!(account_id = auth.account_id, session_id = %auth.session_id, "Session revoked");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_username = RegisterRequest {
            username: "".to_string(),
            password: "pw1".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());

        let long_username = RegisterRequest {
            username: "a".repeat(151),
            password: "pw1".to_string(),
        };
        assert!(long_username.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = LoginRequest {
            username: "".to_string(),
            password: "".to_string(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_login_response_serialization() {
        let response = LoginResponse {
            account_id: 1,
            username: "alice".to_string(),
            session_token: "token".to_string(),
            expires_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("session_token"));
        assert!(json.contains("expires_at"));
        // The credential hash is never part of any response type
        assert!(!json.contains("password"));
    }
}
