//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating cache reads,
//! collaborator calls, and resolution policy. Services consume the domain
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::tag_cache::TagCacheService`] - Cache-aside tag state resolution
//! - [`services::resolver::TargetResolver`] - Redirect destination policy
//! - [`services::recorder::EventRecorder`] - Best-effort analytics recording

pub mod services;
