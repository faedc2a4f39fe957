//! Scheduled retry for status polling.
//!
//! The wait before each attempt comes from a `BackoffSchedule`, a pure
//! `attempt -> Duration` function, so the cadence can change without touching
//! the protocol calls. Attempts are 1-based.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

pub trait BackoffSchedule: Send + Sync {
    /// Wait before `attempt`.
    fn delay_for(&self, attempt: u32) -> Duration;
}

/// Same wait before every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval(pub Duration);

impl Default for FixedInterval {
    fn default() -> Self {
        FixedInterval(DEFAULT_POLL_INTERVAL)
    }
}

impl BackoffSchedule for FixedInterval {
    fn delay_for(&self, _attempt: u32) -> Duration {
        self.0
    }
}

/// `initial + step * (attempt - 1)`, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    pub initial: Duration,
    pub step: Duration,
    pub max: Duration,
}

impl BackoffSchedule for LinearBackoff {
    fn delay_for(&self, attempt: u32) -> Duration {
        let extra = self.step.saturating_mul(attempt.saturating_sub(1));
        self.initial.saturating_add(extra).min(self.max)
    }
}

/// How a retry run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Ready(T),
    Exhausted { attempts: u32 },
    Cancelled { attempts: u32 },
}

/// Attempt budget plus the schedule between attempts.
#[derive(Clone)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub schedule: Arc<dyn BackoffSchedule>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            schedule: Arc::new(FixedInterval::default()),
        }
    }
}

impl std::fmt::Debug for PollPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("budget", &self.budget())
            .finish()
    }
}

impl PollPolicy {
    pub fn new(max_attempts: u32, schedule: impl BackoffSchedule + 'static) -> Self {
        Self {
            max_attempts,
            schedule: Arc::new(schedule),
        }
    }

    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self::new(max_attempts, FixedInterval(interval))
    }

    /// Total time spent waiting if every attempt comes back not ready.
    pub fn budget(&self) -> Duration {
        (1..=self.max_attempts)
            .map(|attempt| self.schedule.delay_for(attempt))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }

    /// Wait, attempt, repeat.
    ///
    /// Each attempt waits its scheduled delay first, then runs `attempt_fn`.
    /// `Some` ends the run; `None` means not ready yet. Cancellation is
    /// observed while waiting, never in the middle of an attempt.
    pub async fn run<T, F, Fut>(&self, cancel: &CancellationToken, mut attempt_fn: F) -> RetryOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for attempt in 1..=self.max_attempts {
            let delay = self.schedule.delay_for(attempt);

            tokio::select! {
                _ = cancel.cancelled() => {
                    return RetryOutcome::Cancelled { attempts: attempt - 1 };
                }
                _ = tokio::time::sleep(delay) => {}
            }

            if let Some(value) = attempt_fn(attempt).await {
                return RetryOutcome::Ready(value);
            }
        }

        RetryOutcome::Exhausted {
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_fixed_interval_is_constant() {
        let schedule = FixedInterval::default();
        assert_eq!(schedule.delay_for(1), Duration::from_millis(2000));
        assert_eq!(schedule.delay_for(30), Duration::from_millis(2000));
    }

    #[test]
    fn test_linear_backoff_capped() {
        let schedule = LinearBackoff {
            initial: Duration::from_secs(1),
            step: Duration::from_secs(1),
            max: Duration::from_secs(5),
        };
        assert_eq!(schedule.delay_for(1), Duration::from_secs(1));
        assert_eq!(schedule.delay_for(3), Duration::from_secs(3));
        assert_eq!(schedule.delay_for(9), Duration::from_secs(5));
    }

    #[test]
    fn test_default_budget_is_one_minute() {
        assert_eq!(PollPolicy::default().budget(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_at_first_ready_attempt() {
        let policy = PollPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let outcome = policy
            .run(&CancellationToken::new(), |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { (attempt == 3).then_some(attempt) }
            })
            .await;

        assert_eq!(outcome, RetryOutcome::Ready(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_exhausts_after_max_attempts() {
        let policy = PollPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let outcome: RetryOutcome<()> = policy
            .run(&CancellationToken::new(), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { None }
            })
            .await;

        assert_eq!(outcome, RetryOutcome::Exhausted { attempts: 30 });
        assert_eq!(calls.load(Ordering::SeqCst), 30);
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cancelled_while_waiting() {
        let policy = PollPolicy::fixed(10, Duration::from_secs(2));
        let cancel = CancellationToken::new();
        let calls = AtomicU32::new(0);

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            canceller.cancel();
        });

        let outcome: RetryOutcome<()> = policy
            .run(&cancel, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { None }
            })
            .await;

        assert_eq!(outcome, RetryOutcome::Cancelled { attempts: 2 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
