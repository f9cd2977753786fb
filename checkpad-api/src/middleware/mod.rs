/// HTTP middleware for the API server
///
/// - `security`: response security headers
pub mod security;
