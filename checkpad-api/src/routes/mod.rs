/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, and logout
/// - `tasks`: Owner-scoped task CRUD
pub mod auth;
pub mod health;
pub mod tasks;
