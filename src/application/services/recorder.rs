//! Best-effort construction and queuing of analytics events.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::entities::{AnalyticsEvent, EventType, ScanContext};
use crate::utils::classify::{classify_device, host_only};
use crate::utils::privacy::PrivacyHasher;

/// Builds analytics events from request context and queues them for the
/// background worker.
///
/// `record` never surfaces failures to the caller and never blocks: the event
/// goes into a bounded channel via `try_send`, and a full queue drops the
/// event with a warning. Recording analytics is auxiliary; it must not delay
/// or fail the redirect response.
#[derive(Clone)]
pub struct EventRecorder {
    hasher: PrivacyHasher,
    tx: mpsc::Sender<AnalyticsEvent>,
}

impl EventRecorder {
    pub fn new(hasher: PrivacyHasher, tx: mpsc::Sender<AnalyticsEvent>) -> Self {
        Self { hasher, tx }
    }

    /// Records one interaction against a tag, fire-and-forget.
    pub fn record(&self, tag_id: &str, event_type: EventType, ctx: &ScanContext) {
        let event = self.build(tag_id, event_type, ctx);

        match self.tx.try_send(event) {
            Ok(()) => debug!(tag_id, "Queued analytics event"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                metrics::counter!("events_dropped").increment(1);
                warn!(tag_id, "Event queue full, dropping analytics event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(tag_id, "Event queue closed, dropping analytics event");
            }
        }
    }

    /// Builds the immutable event: hashes the IP with today's salt and
    /// classifies device and referrer from the headers.
    fn build(&self, tag_id: &str, event_type: EventType, ctx: &ScanContext) -> AnalyticsEvent {
        AnalyticsEvent {
            tag_id: tag_id.to_string(),
            event_type,
            country: ctx.country.clone(),
            device: classify_device(ctx.user_agent.as_deref()),
            referrer_host: host_only(ctx.referrer.as_deref()),
            ip_hash: self.hasher.hash(ctx.ip.as_deref()),
            utm: ctx.utm.clone(),
            metadata: None,
        }
    }

    /// True when the worker side of the queue has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Remaining queue capacity, for the health endpoint.
    pub fn queue_capacity(&self) -> usize {
        self.tx.capacity()
    }
}
