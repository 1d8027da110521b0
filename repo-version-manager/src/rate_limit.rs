//! Courtesy delays between API calls.
//!
//! Calls are spaced by fixed, configurable intervals to stay below the API's
//! rate limits. There is no adaptive backoff and no retry.

use std::time::Duration;
use tracing::debug;

/// Sleeps for `delay`. A zero delay returns immediately.
pub async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    debug!(delay_ms = delay.as_millis() as u64, "Pausing between API calls");
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let started = Instant::now();
        pause(Duration::ZERO).await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn waits_for_the_delay() {
        let started = Instant::now();
        pause(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
