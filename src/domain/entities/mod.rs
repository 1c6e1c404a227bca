//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`TagState`] - Resolved snapshot of a physical tag
//! - [`AnalyticsEvent`] - An immutable scan/interaction fact
//! - [`ScanContext`] - Request metadata handed to the event recorder

pub mod event;
pub mod tag;

pub use event::{AnalyticsEvent, DeviceClass, EventType, ScanContext};
pub use tag::{TagState, TagStatus, TargetType};
