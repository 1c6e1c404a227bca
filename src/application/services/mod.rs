//! Business logic services for the application layer.

pub mod recorder;
pub mod resolver;
pub mod tag_cache;

pub use recorder::EventRecorder;
pub use resolver::{Destinations, Resolution, TargetResolver};
pub use tag_cache::TagCacheService;
