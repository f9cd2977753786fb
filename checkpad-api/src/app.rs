/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /register   # Create account (public)
///     │   ├── POST /login      # Authenticate, issue session (public)
///     │   └── POST /logout     # Revoke session (requires session)
///     └── /tasks/              # All require a resolved session
///         ├── GET    /         # List caller's tasks
///         ├── POST   /         # Create task
///         ├── PUT    /:id      # Update own task
///         └── DELETE /:id      # Delete own task
/// ```
///
/// Session resolution runs as middleware in front of every protected
/// route, so a handler never executes without an [`AuthContext`] present.
use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use checkpad_shared::auth::middleware::{resolve_session, AuthContext};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor. The
/// config is behind an Arc so cloning stays cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session token signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }

    /// Gets the configured session lifetime
    pub fn session_ttl(&self) -> chrono::Duration {
        self.config.session_ttl()
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration and login are the only public API routes
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Logout needs the session it is about to revoke
    let logout_routes = Router::new()
        .route("/logout", post(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Task routes all require a resolved session
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes.merge(logout_routes))
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Resolves the bearer token to an account via the session store and
/// injects an [`AuthContext`] into request extensions. Requests that do
/// not resolve are rejected here and never reach a handler.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let auth_context: AuthContext =
        resolve_session(&state.db, state.session_secret(), auth_header).await?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
