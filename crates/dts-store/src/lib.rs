//! Declaration Store (§4.3): captures the compiler's in-memory declaration
//! emissions, pre-processes them through the canonical processor, and
//! integrates with the on-disk cache for incremental builds.

pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use dts_cache::DeclarationCache;
use dts_processor::{pre_process, CachedDeclaration};

pub use error::{StoreError, StoreResult};

/// A single written declaration file, reported back to the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFile {
    pub relative_path: String,
    pub size_bytes: u64,
}

/// Holds every pre-processed declaration produced by the current build.
///
/// `cache` is `None` when caching is disabled outright; this is distinct
/// from a `DeclarationCache` that found nothing to restore.
pub struct DeclarationStore {
    cache: Option<DeclarationCache>,
    build_info_path: PathBuf,
    files: HashMap<String, CachedDeclaration>,
    emitted: bool,
}

impl DeclarationStore {
    pub fn new(cache: Option<DeclarationCache>, build_info_path: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            build_info_path: build_info_path.into(),
            files: HashMap::new(),
            emitted: false,
        }
    }

    /// Clears the emitted-flag; restores from cache, or clears the map if
    /// caching is disabled.
    #[tracing::instrument(name = "store.initialize", skip_all)]
    pub fn initialize(&mut self) {
        self.emitted = false;
        match &self.cache {
            Some(cache) => cache.restore(&mut self.files),
            None => self.files.clear(),
        }
    }

    /// Saves to the cache if anything was emitted this build. Returns
    /// whether downstream work (bundling, transpiling) is needed at all —
    /// `false` only when caching is enabled and nothing was emitted, i.e.
    /// an incremental no-op.
    #[tracing::instrument(name = "store.finalize", skip_all)]
    pub fn finalize(&mut self) -> StoreResult<bool> {
        let Some(cache) = &self.cache else {
            return Ok(true);
        };
        if self.emitted {
            cache.save(&self.files)?;
        }
        Ok(self.emitted)
    }

    /// The write-callback handed to the compiler. Build-info passes
    /// straight through to disk; everything else is pre-processed and
    /// cached in memory.
    pub fn file_writer(&mut self, path: &str, text: &str) -> StoreResult<()> {
        self.emitted = true;

        // The build-info file is the only store entry written to disk
        // rather than kept in memory (§3) — true whether or not caching
        // itself is enabled, so this check never goes through `self.cache`.
        let is_build_info = Path::new(path) == self.build_info_path;

        if is_build_info {
            fs::write(path, text).map_err(|source| StoreError::Write {
                path: path.to_string(),
                source,
            })?;
        } else {
            let cached = pre_process(text)?;
            self.files.insert(path.to_string(), cached);
        }

        Ok(())
    }

    pub fn get_declaration_files(&self) -> &HashMap<String, CachedDeclaration> {
        &self.files
    }

    /// Writes every stored declaration to `project_dir`, joined with its
    /// stored (relative) path.
    pub fn write_files(&self, project_dir: &Path) -> StoreResult<Vec<WrittenFile>> {
        let mut written = Vec::with_capacity(self.files.len());
        for (relative_path, cached) in &self.files {
            let full_path = project_dir.join(relative_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: full_path.display().to_string(),
                    source,
                })?;
            }
            fs::write(&full_path, &cached.code).map_err(|source| StoreError::Write {
                path: full_path.display().to_string(),
                source,
            })?;
            written.push(WrittenFile {
                relative_path: relative_path.clone(),
                size_bytes: cached.code.len() as u64,
            });
        }
        Ok(written)
    }

    /// Picks the entry points a bundling pass should run over.
    ///
    /// With no `selected` list: just `"index"` if present, else every
    /// entry. With a `selected` list: the named subset, order-independent,
    /// silently dropping names absent from `all_entry_points`.
    pub fn resolve_entry_points(
        &self,
        all_entry_points: &HashMap<String, String>,
        selected: Option<&[String]>,
    ) -> HashMap<String, String> {
        match selected {
            None => match all_entry_points.get("index") {
                Some(index) => HashMap::from([("index".to_string(), index.clone())]),
                None => all_entry_points.clone(),
            },
            Some(names) => names
                .iter()
                .filter_map(|name| all_entry_points.get(name).map(|path| (name.clone(), path.clone())))
                .collect(),
        }
    }

    pub fn close(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
