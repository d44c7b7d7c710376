//! Background worker applying click increments.
//!
//! Redirects enqueue a [`ClickEvent`]; this worker drains the queue and calls
//! [`LinkRepository::increment_clicks`] with bounded concurrency. Failures are
//! logged and counted, never reported back to the redirect that caused them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::error::StoreError;
use crate::domain::repositories::LinkRepository;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// At most `concurrency` increments run at once. When the channel closes the
/// worker waits for the in-flight increments before returning, so awaiting the
/// worker's handle after shutdown guarantees every queued click was applied
/// (or logged as failed).
pub async fn run_click_worker<L>(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_repository: Arc<L>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = link_repository.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            record_click(repository.as_ref(), &event.code).await;
        });

        while let Some(finished) = in_flight.try_join_next() {
            if let Err(e) = finished {
                error!("Click task panicked: {}", e);
            }
        }
    }

    while let Some(finished) = in_flight.join_next().await {
        if let Err(e) = finished {
            error!("Click task panicked: {}", e);
        }
    }

    info!("Click worker stopped");
}

/// Applies one click, retrying transient store failures with backoff.
///
/// Returns true if the counter was incremented.
pub async fn record_click<L>(link_repository: &L, code: &str) -> bool
where
    L: LinkRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || link_repository.increment_clicks(code),
        |e: &StoreError| e.is_transient(),
    )
    .await;

    match result {
        Ok(true) => {
            debug!("Click recorded for {}", code);
            metrics::counter!("urlcutter_clicks_recorded_total").increment(1);
            true
        }
        Ok(false) => {
            warn!("Click for unknown short code {} ignored", code);
            metrics::counter!("urlcutter_clicks_failed_total").increment(1);
            false
        }
        Err(e) => {
            error!("Failed to increment clicks for {}: {}", code, e);
            metrics::counter!("urlcutter_clicks_failed_total").increment(1);
            false
        }
    }
}
