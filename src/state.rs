use std::sync::Arc;

use crate::application::services::{EventRecorder, TagCacheService, TargetResolver};
use crate::domain::collaborators::AnalyticsAggregator;

#[derive(Clone)]
pub struct AppState {
    pub tags: Arc<TagCacheService>,
    pub resolver: Arc<TargetResolver>,
    pub recorder: EventRecorder,
    pub aggregator: Arc<dyn AnalyticsAggregator>,
    /// Exact-match secret for `/internal` endpoints.
    pub internal_secret: String,
}
