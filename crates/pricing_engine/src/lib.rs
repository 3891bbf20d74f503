//! Pricing engine: HTTP resolution, the batch loop and table IO.
mod engine;
mod export;
mod persist;
mod resolve;
mod runner;
mod types;
mod wire;

pub use engine::{BatchHandle, EngineError};
pub use export::{
    read_codes, read_table, write_classification, write_interim, ExportError, ExportSummary,
    FAILURE_FILE, INTERIM_FILE, MASTER_FILE, NOT_FOUND_FILE, SUCCESS_FILE,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use resolve::{HttpPriceResolver, PriceResolver, ResolverError, ResolverSettings};
pub use runner::{
    BatchContext, BatchRunner, ChannelProgressSink, NoHooks, ProgressSink, RunHooks, RunSettings,
};
pub use types::{BatchEvent, BatchState};
pub use wire::DecodeError;
