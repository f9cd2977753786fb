/// Database layer for Checkpad
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Embedded migration runner
pub mod migrations;
pub mod pool;
