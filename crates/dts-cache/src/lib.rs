//! Declaration Cache (§4.2): persists the canonical declaration store between
//! builds as a binary, versioned, gzip-compressed blob.
//!
//! `restore`/`invalidate` never fail — a missing, unreadable, corrupt, or
//! version-mismatched cache is treated the same as an empty one, logged at
//! `debug`/`warn` and otherwise ignored. `save` is the one fallible
//! operation: callers decide what a failed write means for their build.

pub mod error;

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use dts_processor::CachedDeclaration;

pub use error::{CacheError, CacheResult};

/// Bumped whenever the payload shape changes incompatibly. A cache file
/// written by a different version is treated as absent rather than
/// partially trusted.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    version: u32,
    files: HashMap<String, CachedDeclaration>,
}

/// Persists the declaration store for one project across builds.
///
/// Loading happens once, eagerly, at construction, mirroring the "load
/// starts at construction, `restore` awaits it" contract in §4.2 — there is
/// no background task here, so construction simply performs the read.
pub struct DeclarationCache {
    cache_dir: PathBuf,
    cache_file: PathBuf,
    build_info_file: PathBuf,
    loaded: Option<HashMap<String, CachedDeclaration>>,
}

impl DeclarationCache {
    pub fn new(
        project_dir: impl AsRef<Path>,
        cache_dir_name: &str,
        cache_file_name: &str,
        build_info_file: impl Into<PathBuf>,
    ) -> Self {
        let cache_dir = project_dir.as_ref().join(cache_dir_name);
        let cache_file = cache_dir.join(cache_file_name);
        let loaded = Self::load(&cache_file);
        Self {
            cache_dir,
            cache_file,
            build_info_file: build_info_file.into(),
            loaded,
        }
    }

    fn load(cache_file: &Path) -> Option<HashMap<String, CachedDeclaration>> {
        let bytes = match fs::read(cache_file) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %cache_file.display(), %err, "no cache to restore");
                return None;
            }
        };

        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut decompressed = Vec::new();
        if let Err(err) = decoder.read_to_end(&mut decompressed) {
            tracing::warn!(path = %cache_file.display(), %err, "cache file is not valid gzip, discarding");
            return None;
        }

        let payload: Payload = match bincode::deserialize(&decompressed) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(path = %cache_file.display(), %err, "cache file is corrupt, discarding");
                return None;
            }
        };

        if payload.version != CACHE_VERSION {
            tracing::debug!(
                path = %cache_file.display(),
                found = payload.version,
                expected = CACHE_VERSION,
                "cache version mismatch, discarding"
            );
            return None;
        }

        Some(payload.files)
    }

    /// Populates `target` from the cache loaded at construction. A no-op
    /// when nothing was loaded.
    #[tracing::instrument(name = "cache.restore", skip_all)]
    pub fn restore(&self, target: &mut HashMap<String, CachedDeclaration>) {
        if let Some(files) = &self.loaded {
            target.extend(files.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    /// Atomically writes `source` to the cache file: serialize, compress,
    /// write to a sibling temp file, then rename into place so a reader
    /// never observes a partial write.
    #[tracing::instrument(name = "cache.save", skip_all)]
    pub fn save(&self, source: &HashMap<String, CachedDeclaration>) -> CacheResult<()> {
        fs::create_dir_all(&self.cache_dir).map_err(|source_err| CacheError::CreateDir {
            path: self.cache_dir.display().to_string(),
            source: source_err,
        })?;

        let payload = Payload {
            version: CACHE_VERSION,
            files: source.clone(),
        };
        let encoded = bincode::serialize(&payload)?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&encoded)
            .map_err(|source_err| CacheError::Write {
                path: self.cache_file.display().to_string(),
                source: source_err,
            })?;
        let compressed = encoder.finish().map_err(|source_err| CacheError::Write {
            path: self.cache_file.display().to_string(),
            source: source_err,
        })?;

        let mut temp = tempfile::NamedTempFile::new_in(&self.cache_dir).map_err(|source_err| {
            CacheError::Write {
                path: self.cache_file.display().to_string(),
                source: source_err,
            }
        })?;
        temp.write_all(&compressed)
            .map_err(|source_err| CacheError::Write {
                path: self.cache_file.display().to_string(),
                source: source_err,
            })?;
        temp.persist(&self.cache_file)
            .map_err(|err| CacheError::Rename {
                path: self.cache_file.display().to_string(),
                source: err.error,
            })?;

        Ok(())
    }

    /// Best-effort removal of the whole cache directory. Errors are logged,
    /// never propagated (§4.2 "errors ignored").
    pub fn invalidate(&self) {
        if let Err(err) = fs::remove_dir_all(&self.cache_dir) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.cache_dir.display(), %err, "failed to invalidate cache");
            }
        }
    }

    pub fn is_build_info_file(&self, path: &Path) -> bool {
        path == self.build_info_file
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
