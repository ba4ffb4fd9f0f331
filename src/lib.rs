//! # Cosmotrack Backend
//!
//! REST backend for tracking scientists, the planets they study, and the
//! missions that link the two.
//!
//! The crate exposes a small CRUD API over a relational store accessed
//! through Diesel. An in-memory repository backs unit tests and local
//! development; the SQLite repository is the production default.
//!
//! ## Architecture
//!
//! - [`api`]: Domain record types and write-side input types
//! - [`db`]: Repository pattern, Diesel persistence, and the service layer
//! - [`http`]: Axum-based HTTP server, handlers, and response DTOs

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
