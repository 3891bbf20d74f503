use pricing_core::TableError;
use pricing_engine::{EngineError, ExportError, PersistError, ResolverError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read or write tables: {0}")]
    Export(#[from] ExportError),

    #[error("failed to prepare output: {0}")]
    Persist(#[from] PersistError),

    #[error("failed to set up the price resolver: {0}")]
    Resolver(#[from] ResolverError),

    #[error("batch run failed: {0}")]
    Engine(#[from] EngineError),

    #[error("table cannot be classified: {0}")]
    Table(#[from] TableError),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
