use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::runner::{BatchContext, BatchRunner, ChannelProgressSink, RunHooks};
use crate::{BatchEvent, BatchState, PriceResolver};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start batch worker: {0}")]
    Spawn(#[from] io::Error),
    #[error("batch worker panicked")]
    WorkerPanicked,
}

/// A batch run executing on its own worker thread and runtime.
///
/// Events arrive in emission order; the channel closes once the run returns.
pub struct BatchHandle {
    context: BatchContext,
    event_rx: mpsc::Receiver<BatchEvent>,
    worker: thread::JoinHandle<BatchState>,
}

impl BatchHandle {
    pub fn spawn(
        codes: Vec<String>,
        resolver: Arc<dyn PriceResolver>,
        runner: BatchRunner,
        hooks: Arc<dyn RunHooks>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (event_tx, event_rx) = mpsc::channel();
        let context = BatchContext::new();
        let worker_context = context.clone();

        let worker = thread::Builder::new()
            .name("batch-runner".to_string())
            .spawn(move || {
                let sink = ChannelProgressSink::new(event_tx);
                runtime.block_on(runner.run(
                    &codes,
                    resolver.as_ref(),
                    &worker_context,
                    &sink,
                    hooks.as_ref(),
                ))
            })?;

        Ok(Self {
            context,
            event_rx,
            worker,
        })
    }

    /// Clone of the cancellation handle, e.g. for a signal listener.
    pub fn context(&self) -> BatchContext {
        self.context.clone()
    }

    pub fn cancel(&self) {
        self.context.cancel();
    }

    /// Blocks for the next event. `None` once the run is over and drained.
    pub fn recv(&self) -> Option<BatchEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<BatchEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn join(self) -> Result<BatchState, EngineError> {
        self.worker.join().map_err(|_| EngineError::WorkerPanicked)
    }
}
