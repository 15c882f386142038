//! Host politeness policy
//!
//! This module enforces, for the single crawled host:
//! - At most one request in flight at any time
//! - A randomized pause of up to [`MAX_RANDOM_DELAY`] between requests

use rand::Rng;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Upper bound of the random pause between two requests
pub const MAX_RANDOM_DELAY: Duration = Duration::from_secs(1);

/// Serializes requests and spaces them out
///
/// The mutex is held for the whole request, so a second caller waits until
/// the first response has been read.
#[derive(Debug)]
pub struct Throttle {
    last_request: Mutex<Option<Instant>>,
    max_delay: Duration,
}

/// Exclusive right to send one request
///
/// Dropping the slot records the time the request finished.
pub struct Slot<'a> {
    last_request: MutexGuard<'a, Option<Instant>>,
}

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        *self.last_request = Some(Instant::now());
    }
}

impl Throttle {
    pub fn new() -> Self {
        Self::with_max_delay(MAX_RANDOM_DELAY)
    }

    pub(crate) fn with_max_delay(max_delay: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            max_delay,
        }
    }

    /// Waits for the previous request to finish plus a random delay
    ///
    /// The first request of a run is not delayed.
    pub async fn acquire(&self) -> Slot<'_> {
        let last_request = self.last_request.lock().await;

        if let Some(finished) = *last_request {
            let wait = random_delay(self.max_delay).saturating_sub(finished.elapsed());
            if !wait.is_zero() {
                tracing::trace!("Throttling next request for {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }

        Slot { last_request }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new()
    }
}

fn random_delay(max: Duration) -> Duration {
    let max_millis = max.as_millis() as u64;
    if max_millis == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_millis))
}
