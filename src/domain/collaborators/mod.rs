//! Trait definitions for the external collaborators this service consumes.
//!
//! The relational store behind tags, accounts, and events is not part of this
//! system; it is reached through authenticated internal HTTP services. These
//! traits define those boundary contracts so handlers and services stay
//! testable with mocks.
//!
//! # Architecture
//!
//! - Traits define the contract for each upstream service
//! - Concrete clients live in `crate::infrastructure::http`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Collaborators
//!
//! - [`TagLookup`] - Token to tag-state resolution
//! - [`AccountLookup`] - Owner id to public handle resolution
//! - [`EventSink`] - Analytics event ingestion
//! - [`AnalyticsAggregator`] - Time-bucketed event rollups (boundary only)

pub mod account_lookup;
pub mod aggregator;
pub mod event_sink;
pub mod tag_lookup;

pub use account_lookup::AccountLookup;
pub use aggregator::{AnalyticsAggregator, EventBucket, Granularity, TimeRange};
pub use event_sink::EventSink;
pub use tag_lookup::TagLookup;

#[cfg(test)]
pub use account_lookup::MockAccountLookup;
#[cfg(test)]
pub use aggregator::MockAnalyticsAggregator;
#[cfg(test)]
pub use event_sink::MockEventSink;
#[cfg(test)]
pub use tag_lookup::MockTagLookup;

/// Errors surfaced by upstream collaborator calls.
///
/// Callers on the redirect path treat both variants as "degrade to a fallback
/// destination"; callers on the event path swallow them entirely.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The upstream service timed out, refused the connection, or replied 5xx.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// The upstream replied with an unexpected status or payload.
    #[error("Upstream protocol error: {0}")]
    Protocol(String),
}
