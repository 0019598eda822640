use std::io;

/// `save` is the only fallible operation (§4.2): `restore` and `invalidate`
/// degrade silently by design, logging via `tracing` instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },

    #[error("failed to write cache file {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("failed to rename temporary cache file into place at {path}: {source}")]
    Rename { path: String, source: io::Error },

    #[error("failed to encode cache payload")]
    Encode(#[from] bincode::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;
