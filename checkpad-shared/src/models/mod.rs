/// Database models for Checkpad
///
/// This module contains all database models and their store operations.
/// Models are plain data structs; persistence goes through associated
/// functions that take an explicit `&PgPool`.
///
/// # Models
///
/// - `account`: User accounts with hashed credentials
/// - `session`: Server-side login sessions backing issued tokens
/// - `task`: To-do items, each owned by exactly one account
pub mod account;
pub mod session;
pub mod task;
