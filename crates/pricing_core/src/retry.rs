use std::time::Duration;

use crate::{PriceQuoteOutcome, QuoteError};

/// What the batch loop should do with one resolver outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Record and move on after the normal pacing delay.
    Accept,
    /// Record, pause for the duration, then move on without re-resolving.
    SkipAfter(Duration),
    /// Pause for the duration, then resolve the same code exactly once more.
    WaitThenRetry(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub long_cooldown: Duration,
    pub short_cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            long_cooldown: Duration::from_secs(30 * 60),
            short_cooldown: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(long_cooldown: Duration, short_cooldown: Duration) -> Self {
        Self {
            long_cooldown,
            short_cooldown,
        }
    }

    pub fn classify(&self, outcome: &PriceQuoteOutcome) -> RetryDecision {
        match &outcome.error {
            Some(QuoteError::RateLimited) => RetryDecision::WaitThenRetry(self.long_cooldown),
            Some(QuoteError::TransientNetwork(_) | QuoteError::Timeout) => {
                RetryDecision::SkipAfter(self.short_cooldown)
            }
            Some(
                QuoteError::NotFound
                | QuoteError::NoPriceAvailable { .. }
                | QuoteError::Unexpected(_),
            )
            | None => RetryDecision::Accept,
        }
    }
}
