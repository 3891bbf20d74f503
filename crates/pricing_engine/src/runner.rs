use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use std::time::Duration;

use futures_util::FutureExt;
use pricing_core::{
    normalize_codes, PriceQuoteOutcome, ProductCode, QuoteError, ResultRecord, RetryDecision,
    RetryPolicy,
};
use pricing_logging::{price_error, price_info, price_warn};
use tokio_util::sync::CancellationToken;

use crate::{BatchEvent, BatchState, PriceResolver};

#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Delay between consecutive API calls.
    pub pacing: Duration,
    /// Granularity of cancellation checks during the long cooldown.
    pub poll_interval: Duration,
    /// How often a remaining-time event is emitted during the long cooldown.
    pub countdown_interval: Duration,
    /// Emit a snapshot after this many processed items. Zero disables interim snapshots.
    pub snapshot_every: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(600),
            poll_interval: Duration::from_secs(1),
            countdown_interval: Duration::from_secs(60),
            snapshot_every: 10,
        }
    }
}

/// Cancellation handle shared between a run and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct BatchContext {
    token: CancellationToken,
}

impl BatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Optional housekeeping around a run, e.g. keeping the machine awake.
pub trait RunHooks: Send + Sync {
    fn on_run_start(&self) {}
    fn on_run_end(&self) {}
}

pub struct NoHooks;

impl RunHooks for NoHooks {}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<BatchEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<BatchEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: BatchEvent) {
        let _ = self.tx.send(event);
    }
}

/// Sequential batch loop: one code at a time, paced, with cooldowns decided by
/// the retry policy.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    policy: RetryPolicy,
    settings: RunSettings,
}

impl BatchRunner {
    pub fn new(policy: RetryPolicy, settings: RunSettings) -> Self {
        Self { policy, settings }
    }

    pub async fn run<S: AsRef<str>>(
        &self,
        codes: &[S],
        resolver: &dyn PriceResolver,
        context: &BatchContext,
        sink: &dyn ProgressSink,
        hooks: &dyn RunHooks,
    ) -> BatchState {
        let codes = normalize_codes(codes);
        let total = codes.len();
        let mut state = BatchState::default();

        hooks.on_run_start();
        price_info!("Batch started total={}", total);
        sink.emit(BatchEvent::Started { total });

        for (index, code) in codes.into_iter().enumerate() {
            if context.is_cancelled() {
                break;
            }
            let position = index + 1;

            let mut outcome = resolve_guarded(resolver, &code).await;
            let mut decision = self.policy.classify(&outcome);

            if let RetryDecision::WaitThenRetry(wait) = decision {
                price_warn!(
                    "Rate limited at {}/{} code={}, waiting {:?}",
                    position,
                    total,
                    code,
                    wait
                );
                sink.emit(BatchEvent::RateLimitWait {
                    position,
                    total,
                    code: code.clone(),
                    wait,
                });
                if !self.wait_out(wait, context, sink).await {
                    break;
                }
                outcome = resolve_guarded(resolver, &code).await;
                // Only one automatic retry: a second rate limit is recorded as is.
                decision = match self.policy.classify(&outcome) {
                    RetryDecision::WaitThenRetry(_) => RetryDecision::Accept,
                    other => other,
                };
            }

            let record = ResultRecord::from_outcome(code, &outcome);
            if let RetryDecision::SkipAfter(cooldown) = decision {
                price_warn!(
                    "Skipping {}/{} code={}: {}",
                    position,
                    total,
                    record.code,
                    record.note
                );
                sink.emit(BatchEvent::TransientSkip {
                    position,
                    total,
                    code: record.code.clone(),
                    note: record.note.clone(),
                    cooldown,
                });
            }

            state.records.push(record.clone());
            state.processed += 1;
            sink.emit(BatchEvent::ItemCompleted {
                position,
                total,
                record,
            });

            if self.settings.snapshot_every > 0 && state.processed % self.settings.snapshot_every == 0
            {
                sink.emit(BatchEvent::Snapshot {
                    records: state.records.clone(),
                    is_final: false,
                });
            }

            if position < total {
                let delay = match decision {
                    RetryDecision::SkipAfter(cooldown) => cooldown,
                    _ => self.settings.pacing,
                };
                pause(delay, context).await;
            }
        }

        state.cancelled = context.is_cancelled();
        price_info!(
            "Batch finished processed={} total={} cancelled={}",
            state.processed,
            total,
            state.cancelled
        );
        sink.emit(BatchEvent::Snapshot {
            records: state.records.clone(),
            is_final: true,
        });
        sink.emit(BatchEvent::Finished {
            processed: state.processed,
            total,
            cancelled: state.cancelled,
        });
        hooks.on_run_end();
        state
    }

    /// Sleeps through the long cooldown in poll-sized steps. Returns false if
    /// the run was cancelled meanwhile.
    async fn wait_out(&self, total: Duration, context: &BatchContext, sink: &dyn ProgressSink) -> bool {
        let poll = self.settings.poll_interval;
        let mut remaining = total;
        let mut since_report = Duration::ZERO;

        while !remaining.is_zero() {
            let step = if poll.is_zero() {
                remaining
            } else {
                remaining.min(poll)
            };
            if !pause(step, context).await {
                return false;
            }
            remaining -= step;
            since_report += step;

            let interval = self.settings.countdown_interval;
            if !remaining.is_zero() && !interval.is_zero() && since_report >= interval {
                since_report = Duration::ZERO;
                sink.emit(BatchEvent::WaitRemaining { remaining });
            }
        }
        !context.is_cancelled()
    }
}

/// Returns false when cancellation interrupted the pause.
async fn pause(duration: Duration, context: &BatchContext) -> bool {
    if duration.is_zero() {
        return !context.is_cancelled();
    }
    tokio::select! {
        _ = context.token.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

async fn resolve_guarded(resolver: &dyn PriceResolver, code: &ProductCode) -> PriceQuoteOutcome {
    match AssertUnwindSafe(resolver.resolve(code)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            price_error!("Resolution of code={} panicked: {}", code, cause);
            PriceQuoteOutcome::failed(QuoteError::Unexpected(cause))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "resolver panicked".to_string()
    }
}
