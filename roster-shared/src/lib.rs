//! # Roster Shared Library
//!
//! Persistence layer for the Roster API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migrations
//! - `models`: database models and their SQL
//! - `repository`: the `UserRepository` storage handle and its implementations
//! - `error`: storage error types

pub mod db;
pub mod error;
pub mod models;
pub mod repository;
