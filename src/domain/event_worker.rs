//! Background worker draining the analytics event queue.
//!
//! Decouples event ingestion from the redirect path: handlers push into a
//! bounded channel and return immediately; this worker dispatches to the
//! ingestion collaborator with bounded concurrency and a short retry.
//! Failures are logged and counted, never propagated.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, warn};

use crate::domain::collaborators::EventSink;
use crate::domain::entities::AnalyticsEvent;

/// Delay between dispatch attempts for a single event.
const RETRY_INTERVAL_MS: u64 = 250;
/// Retries after the initial attempt.
const RETRY_COUNT: usize = 2;

/// Runs until the sending side of the channel is dropped.
///
/// At most `concurrency` submissions are in flight at once; additional events
/// wait in the channel, and the bounded channel capacity in turn sheds load
/// under sustained overflow (the recorder drops instead of blocking).
pub async fn run_event_worker(
    mut rx: mpsc::Receiver<AnalyticsEvent>,
    sink: Arc<dyn EventSink>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            // The semaphore is never closed.
            break;
        };

        let sink = sink.clone();
        tokio::spawn(async move {
            let _permit = permit;
            dispatch(sink.as_ref(), &event).await;
        });
    }

    // Wait for in-flight submissions before returning so shutdown does not
    // abandon events already pulled off the queue.
    let _ = semaphore.acquire_many(concurrency as u32).await;

    debug!("Event worker stopped (channel closed)");
}

/// Dispatches one event with a short, bounded retry.
async fn dispatch(sink: &dyn EventSink, event: &AnalyticsEvent) {
    let strategy = FixedInterval::from_millis(RETRY_INTERVAL_MS).take(RETRY_COUNT);

    match Retry::spawn(strategy, || sink.submit(event)).await {
        Ok(()) => {
            metrics::counter!("events_dispatched").increment(1);
        }
        Err(e) => {
            metrics::counter!("events_failed").increment(1);
            warn!(
                tag_id = %event.tag_id,
                event_type = ?event.event_type,
                "Failed to dispatch analytics event: {}",
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collaborators::{LookupError, MockEventSink};
    use crate::domain::entities::{DeviceClass, EventType};

    fn scan_event(tag_id: &str) -> AnalyticsEvent {
        AnalyticsEvent {
            tag_id: tag_id.to_string(),
            event_type: EventType::Scan,
            country: None,
            device: DeviceClass::Mobile,
            referrer_host: String::new(),
            ip_hash: "00".repeat(32),
            utm: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_worker_dispatches_events() {
        let mut sink = MockEventSink::new();
        sink.expect_submit().times(2).returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_event_worker(rx, Arc::new(sink), 4));

        tx.send(scan_event("a")).await.unwrap();
        tx.send(scan_event("b")).await.unwrap();
        drop(tx);

        // The worker drains in-flight submissions before returning, so the
        // mock's drop-time verification sees both calls.
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_then_swallows_failure() {
        let mut sink = MockEventSink::new();
        // Initial attempt plus RETRY_COUNT retries, then the error is dropped.
        sink.expect_submit()
            .times(1 + RETRY_COUNT)
            .returning(|_| Err(LookupError::Unavailable("ingest down".to_string())));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_event_worker(rx, Arc::new(sink), 1));

        tx.send(scan_event("a")).await.unwrap();
        drop(tx);

        // Worker must terminate normally despite every submission failing.
        worker.await.unwrap();
    }
}
