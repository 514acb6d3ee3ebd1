/// Database models
///
/// - `user`: registered accounts, unique by email

pub mod user;
