//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for caching and upstream HTTP collaborators.
//!
//! # Modules
//!
//! - [`cache`] - Key-value store abstractions (Redis and no-op implementations)
//! - [`http`] - Authenticated reqwest clients for the lookup, ingestion, and
//!   analytics services

pub mod cache;
pub mod http;
