//! Domain layer containing business entities and boundary contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`collaborators`] - Trait definitions for consumed external services
//! - [`event_worker`] - Asynchronous analytics event dispatching worker
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Collaborator traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Event Recording Flow
//!
//! 1. The redirect handler issues its response, then records a scan event
//! 2. [`crate::application::services::EventRecorder`] builds the
//!    [`entities::AnalyticsEvent`] and pushes it into a bounded channel
//! 3. [`event_worker::run_event_worker`] dispatches events to the ingestion
//!    collaborator with bounded concurrency and a short retry

pub mod collaborators;
pub mod entities;
pub mod event_worker;
