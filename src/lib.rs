//! # Tag Resolver
//!
//! Resolves a physical tag's public token (NFC tap or QR scan) to a live
//! redirect target while recording a privacy-preserving analytics event.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and collaborator traits
//! - **Application Layer** ([`application`]) - Cache-aside resolution, redirect
//!   policy, and event recording
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis cache and HTTP
//!   clients for the internal lookup/ingestion/analytics services
//! - **API Layer** ([`api`]) - Axum handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Cache-aside tag state lookups with a short TTL and synchronous purge
//! - Open-redirect defense: every stored target is re-sanitized at resolution
//! - Daily-rotating salted IP hashing; raw IPs are never retained
//! - Fire-and-forget scan event recording that never delays the redirect
//! - Internal-secret protected purge and stats endpoints
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export TAG_LOOKUP_URL="https://lookup.internal.example.com"
//! export EVENT_INGEST_URL="https://events.internal.example.com"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        Destinations, EventRecorder, Resolution, TagCacheService, TargetResolver,
    };
    pub use crate::domain::entities::{AnalyticsEvent, EventType, ScanContext, TagState};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
