//! Trailing-edge debouncer.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Delay used for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest pushed value until it has stayed unchanged for `delay`.
///
/// Each [`push`](Debouncer::push) replaces the pending value and restarts the
/// wait. Superseded values are dropped without being emitted, and nothing is
/// emitted after [`cancel`](Debouncer::cancel) or when the debouncer is
/// dropped mid-wait.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the wait.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending value to settle and take it.
    ///
    /// Never resolves while nothing is pending. Cancel safe: dropping the
    /// future before it resolves leaves the pending value in place.
    pub async fn settled(&mut self) -> T {
        loop {
            let deadline = match &self.pending {
                Some((_, deadline)) => *deadline,
                None => return std::future::pending().await,
            };
            sleep_until(deadline).await;

            if let Some((value, _)) = self.pending.take() {
                return value;
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_emits_last_value_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.push("r");
        advance(Duration::from_millis(100)).await;
        debouncer.push("ru");
        advance(Duration::from_millis(100)).await;
        debouncer.push("rus");

        // Nothing before t=700ms
        let early = timeout(Duration::from_millis(499), debouncer.settled()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.settled().await, "rus");
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(700) && elapsed < Duration::from_millis(701));

        // Exactly one emission
        assert!(!debouncer.is_pending());
        let again = timeout(Duration::from_secs(5), debouncer.settled()).await;
        assert!(again.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_emits_nothing() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.push(1);
        advance(Duration::from_millis(300)).await;
        debouncer.cancel();

        let result = timeout(Duration::from_secs(1), debouncer.settled()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_after_emission_starts_new_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(1);
        assert_eq!(debouncer.settled().await, 1);
        debouncer.push(2);
        assert_eq!(debouncer.settled().await, 2);
        assert!(start.elapsed() >= DEFAULT_DEBOUNCE * 2);
    }
}
