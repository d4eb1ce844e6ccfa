//! Fixed pacing between backend requests.

use std::time::Duration;
use tracing::trace;

/// Sleeps a fixed delay between units of work.
///
/// Static throttling only; there is no backoff and no adaptive rate.
/// A zero delay never yields to the timer.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storyteller_pipeline::Pacer;
///
/// let pacer = Pacer::new(Duration::from_millis(500));
/// assert_eq!(pacer.delay(), Duration::from_millis(500));
/// assert!(Pacer::none().delay().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Pace with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No pacing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_ms = self.delay.as_millis() as u64, "Pacing");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_for_delay() {
        let pacer = Pacer::new(Duration::from_secs(1));
        let start = tokio::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_returns_immediately() {
        let start = tokio::time::Instant::now();
        Pacer::none().pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
