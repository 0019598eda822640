//! A filesystem pass-through "compiler" adapter (§6 "Compiler adapter").
//!
//! This does not type-check anything: real emission is the TypeScript
//! compiler's job, which is out of scope here (§1 Non-goals). It stands in
//! for that step by copying declaration files the compiler would have
//! already emitted on disk through to the store, so the rest of the
//! pipeline (caching, bundling, transpiling) has something real to run
//! against.

use std::path::{Path, PathBuf};

use dts_orchestrator::{CancellationToken, CompilerAdapter, EmitResult, WriteFile};
use walkdir::WalkDir;

pub struct FsPassthroughCompiler {
    pub root_dir: PathBuf,
    pub output_dir: String,
    pub cache_dir_name: String,
}

impl FsPassthroughCompiler {
    fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let name = component.as_os_str();
            name == "node_modules" || name == self.output_dir.as_str() || name == self.cache_dir_name.as_str()
        })
    }
}

impl CompilerAdapter for FsPassthroughCompiler {
    fn emit(
        &mut self,
        target_source_file: Option<&str>,
        write_file: &mut WriteFile<'_>,
        cancel: &CancellationToken,
        _emit_only_dts_files: bool,
    ) -> anyhow::Result<EmitResult> {
        for entry in WalkDir::new(&self.root_dir).into_iter().filter_map(Result::ok) {
            if cancel.is_cancelled() {
                break;
            }
            let path = entry.path();
            if !path.is_file() || !path.to_string_lossy().ends_with(".d.ts") {
                continue;
            }
            if self.is_excluded(path) {
                continue;
            }
            if let Some(target) = target_source_file {
                if path.to_string_lossy() != *target {
                    continue;
                }
            }

            let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
            let contents = std::fs::read_to_string(path)?;
            write_file(&relative.to_string_lossy(), &contents)?;
        }

        Ok(EmitResult { diagnostics: Vec::new() })
    }
}

/// Discovers entry points by file stem, the way the teacher's driver keys
/// project references: each top-level `.d.ts` file not under
/// `node_modules`/the output dir/the cache dir becomes a candidate entry
/// named after its stem, `index` taking priority when both exist.
pub fn discover_entry_points(root_dir: &Path, output_dir: &str, cache_dir_name: &str) -> std::collections::HashMap<String, String> {
    let mut entries = std::collections::HashMap::new();
    for entry in WalkDir::new(root_dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_file() || !path.to_string_lossy().ends_with(".d.ts") {
            continue;
        }
        if path.components().any(|component| {
            let name = component.as_os_str();
            name == "node_modules" || name == output_dir || name == cache_dir_name
        }) {
            continue;
        }
        let Some(stem) = path.file_name().and_then(|name| name.to_str()).and_then(|name| name.strip_suffix(".d.ts")) else {
            continue;
        };
        entries.insert(stem.to_string(), path.to_string_lossy().into_owned());
    }
    entries
}

#[cfg(test)]
#[path = "../tests/compiler_adapter_tests.rs"]
mod tests;
