/// API route handlers
///
/// - `ping`: liveness endpoint
/// - `users`: user registration and management

pub mod ping;
pub mod users;
