//! Quiescence timer for rapidly changing values.
//!
//! The debouncer holds at most one pending value. Every [`Debouncer::push`]
//! replaces the pending value and restarts the delay timer; the value is only
//! released once the full delay has elapsed with no newer push. Nothing is
//! queued: intermediate values are discarded, and dropping the debouncer
//! discards the pending value without emitting it.

use std::time::Duration;

use tokio::time::Instant;

/// Delays propagation of a value until input has been stable for a fixed
/// interval.
///
/// [`Debouncer::settled`] is cancel safe: the pending value lives in the
/// debouncer rather than in the returned future, so the method can sit in a
/// `select!` loop and be recreated after every push.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiescence interval.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    /// Record a new value and restart the delay timer.
    ///
    /// Any previously pending value is discarded; only the most recent value
    /// after quiescence is ever emitted.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Discard the pending value and stop the timer.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// True while a value is waiting for its delay to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolve with the pending value once its delay has fully elapsed.
    ///
    /// When nothing is pending the future never resolves, which makes this
    /// safe to use as a `select!` branch without a precondition guard.
    pub async fn settled(&mut self) -> T {
        loop {
            match self.deadline {
                Some(deadline) => {
                    tokio::time::sleep_until(deadline).await;
                    self.deadline = None;
                    if let Some(value) = self.pending.take() {
                        return value;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn emits_value_after_quiescence() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("matrix");

        advance(DELAY).await;
        assert_eq!(debouncer.settled().await, "matrix");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_push_restarts_the_timer_and_wins() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("mat");

        advance(Duration::from_millis(300)).await;
        debouncer.push("matr");
        advance(Duration::from_millis(300)).await;
        debouncer.push("matrix");

        // 600ms have passed but no single value has been stable for 500ms.
        let premature = timeout(Duration::from_millis(499), debouncer.settled()).await;
        assert!(premature.is_err(), "value must not settle early");

        advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.settled().await, "matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_the_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("matrix");
        debouncer.cancel();

        advance(DELAY).await;
        let settled = timeout(Duration::from_millis(10), debouncer.settled()).await;
        assert!(settled.is_err(), "cancelled value must never emit");
    }

    #[tokio::test(start_paused = true)]
    async fn settled_without_a_push_never_resolves() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(DELAY);
        let settled = timeout(Duration::from_secs(60), debouncer.settled()).await;
        assert!(settled.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_is_cancel_safe_across_select_recreation() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("matrix");

        // Poll once without letting the delay elapse, then drop the future.
        let premature = timeout(Duration::from_millis(100), debouncer.settled()).await;
        assert!(premature.is_err());
        assert!(debouncer.is_pending(), "pending value survives cancellation");

        advance(DELAY).await;
        assert_eq!(debouncer.settled().await, "matrix");
    }
}
