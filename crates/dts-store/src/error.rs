use std::io;

use dts_cache::CacheError;
use dts_processor::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to pre-process declaration text")]
    Process(#[from] ProcessError),

    #[error("failed to persist declaration cache")]
    Cache(#[from] CacheError),

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
}

pub type StoreResult<T> = Result<T, StoreError>;
