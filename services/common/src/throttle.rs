//! Minimum-interval request throttle
//!
//! The upstream market-data API tolerates only one request per interval.
//! The throttle is an explicit state object with an injected clock rather
//! than a module-global "last request time".

use crate::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Enforces a minimum interval between acquisitions
#[derive(Debug)]
pub struct MinIntervalThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl MinIntervalThrottle {
    /// Create a throttle allowing one acquisition per `min_interval`
    #[must_use]
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
            clock,
        }
    }

    /// Try to acquire a request slot.
    ///
    /// Records the acquisition time on success; on refusal returns the
    /// remaining wait before the next slot opens.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let now = self.clock.now();
        let mut last = self.last_request.lock();
        if let Some(prev) = *last {
            let elapsed = now - prev;
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                warn!(wait_ms = wait.num_milliseconds(), "throttled upstream request");
                return Err(wait);
            }
        }
        *last = Some(now);
        Ok(())
    }
}
