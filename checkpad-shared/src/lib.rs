//! # Checkpad Shared Library
//!
//! This crate contains the domain layer shared between the Checkpad API
//! server and any future tooling (admin CLI, maintenance jobs).
//!
//! ## Module Organization
//!
//! - `models`: Database models and their store operations
//! - `auth`: Password hashing, session tokens, and session resolution
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Checkpad shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
