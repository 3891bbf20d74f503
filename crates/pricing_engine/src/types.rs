use std::time::Duration;

use pricing_core::{ProductCode, ResultRecord};

/// Progress and status notifications emitted by a batch run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        total: usize,
    },
    ItemCompleted {
        position: usize,
        total: usize,
        record: ResultRecord,
    },
    /// Long cooldown begins; the code will be resolved once more afterwards.
    RateLimitWait {
        position: usize,
        total: usize,
        code: ProductCode,
        wait: Duration,
    },
    WaitRemaining {
        remaining: Duration,
    },
    /// Transient failure recorded; pausing before the next code.
    TransientSkip {
        position: usize,
        total: usize,
        code: ProductCode,
        note: String,
        cooldown: Duration,
    },
    /// Owned copy of all records so far, for interim persistence.
    Snapshot {
        records: Vec<ResultRecord>,
        is_final: bool,
    },
    Finished {
        processed: usize,
        total: usize,
        cancelled: bool,
    },
}

/// State accumulated by one run. Owned by the runner until it returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchState {
    pub records: Vec<ResultRecord>,
    pub cancelled: bool,
    pub processed: usize,
}
