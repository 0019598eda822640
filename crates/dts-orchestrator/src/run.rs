//! Build Orchestrator (§4.6): wires the store, graph builder, and bundle
//! composer into one build, running declaration bundling and transpilation
//! side by side once the compiler pass has settled.

use std::collections::HashMap;
use std::fs;

use dts_graph::{ModuleResolver, ResolverHost};
use dts_store::{DeclarationStore, WrittenFile};
use tracing::info_span;

use crate::adapters::{CompilerAdapter, TranspileOptions, TranspilerAdapter};
use crate::cancellation::CancellationToken;
use crate::config::BuildConfig;
use crate::error::BuildError;

#[derive(Debug, Default, Clone)]
pub struct BuildReport {
    pub incremental_no_op: bool,
    pub cancelled: bool,
    pub written_files: Vec<WrittenFile>,
    pub transpile_warnings: Vec<String>,
}

/// Drives one full build (§4.6 steps 1-6):
///
/// 1. `store.initialize()` restores (or clears) the in-memory declaration map.
/// 2. The compiler emits; error-severity diagnostics abort as `TypeCheck`.
/// 3. `store.finalize()` persists the cache and reports whether anything
///    changed — an unchanged store short-circuits the rest of the build.
/// 4. The output directory is optionally cleaned.
/// 5. Declaration bundling (per entry point) and transpilation run together.
/// 6. The first error from step 5, if any, is returned once both settle.
#[allow(clippy::too_many_arguments)]
pub fn run_build(
    config: &BuildConfig,
    store: &mut DeclarationStore,
    entry_points: &HashMap<String, String>,
    selected_entry_points: Option<&[String]>,
    compiler: &mut dyn CompilerAdapter,
    resolver: &(dyn ModuleResolver + Sync),
    host: &(dyn ResolverHost + Sync),
    transpiler: Option<&mut dyn TranspilerAdapter>,
    transpile_options: &TranspileOptions,
    cancel: &CancellationToken,
) -> Result<BuildReport, BuildError> {
    let _span = info_span!("orchestrator.run").entered();

    store.initialize();
    if cancel.is_cancelled() {
        return Ok(BuildReport {
            cancelled: true,
            ..Default::default()
        });
    }

    let emit = compiler.emit(
        None,
        &mut |path, text| store.file_writer(path, text).map_err(anyhow::Error::from),
        cancel,
        config.declarations,
    )?;

    if emit.diagnostics.iter().any(dts_common::Diagnostic::is_error) {
        let summary = dts_common::diagnostics::format_type_check_summary(&emit.diagnostics, &[]);
        return Err(BuildError::TypeCheck { summary });
    }

    if cancel.is_cancelled() {
        return Ok(BuildReport {
            cancelled: true,
            ..Default::default()
        });
    }

    let has_work = store.finalize()?;
    if !has_work {
        return Ok(BuildReport {
            incremental_no_op: true,
            ..Default::default()
        });
    }

    if config.clean {
        clean_output_dir(config);
    }

    if cancel.is_cancelled() {
        return Ok(BuildReport {
            cancelled: true,
            ..Default::default()
        });
    }

    let resolved_entries = store.resolve_entry_points(entry_points, selected_entry_points);

    let resolved_entries = &resolved_entries;
    let store_ref: &DeclarationStore = store;
    let (bundle_result, transpile_result) = rayon::join(
        || bundle_declarations(config, store_ref, resolved_entries, resolver, host, cancel),
        move || transpile_step(config, transpiler, resolved_entries, transpile_options, cancel),
    );

    let written_files = bundle_result?;
    let transpile_warnings = transpile_result?;

    Ok(BuildReport {
        incremental_no_op: false,
        cancelled: cancel.is_cancelled(),
        written_files,
        transpile_warnings,
    })
}

fn clean_output_dir(config: &BuildConfig) {
    let path = config.project_dir.join(&config.output_dir);
    if let Err(err) = fs::remove_dir_all(&path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), %err, "failed to clean output directory");
        }
    }
}

fn bundle_declarations(
    config: &BuildConfig,
    store: &DeclarationStore,
    resolved_entries: &HashMap<String, String>,
    resolver: &(dyn ModuleResolver + Sync),
    host: &(dyn ResolverHost + Sync),
    cancel: &CancellationToken,
) -> Result<Vec<WrittenFile>, BuildError> {
    if !config.declarations {
        return Ok(Vec::new());
    }

    let graph_config = config.graph_config();
    let mut files = store.get_declaration_files().clone();
    let mut written = Vec::new();

    let mut names: Vec<&String> = resolved_entries.keys().collect();
    names.sort();

    for name in names {
        if cancel.is_cancelled() {
            break;
        }
        let source_path = &resolved_entries[name];
        let entry_path = dts_graph::resolve_entry_path(source_path, &files, &graph_config).ok_or_else(|| {
            BuildError::Bundle(format!("entry point \"{name}\" ({source_path}) has no declaration output"))
        })?;

        let graph = dts_graph::build_graph(&entry_path, &mut files, &graph_config, resolver, host)?;
        let bundle = dts_bundle::compose(&entry_path, &graph)?;

        let relative_path = format!("{}/{name}.d.ts", config.output_dir.trim_end_matches('/'));
        let full_path = config.project_dir.join(&relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Other(anyhow::Error::from(source)))?;
        }
        fs::write(&full_path, &bundle.code).map_err(|source| BuildError::Other(anyhow::Error::from(source)))?;

        written.push(WrittenFile {
            relative_path,
            size_bytes: bundle.code.len() as u64,
        });
    }

    Ok(written)
}

fn transpile_step(
    config: &BuildConfig,
    transpiler: Option<&mut dyn TranspilerAdapter>,
    resolved_entries: &HashMap<String, String>,
    options: &TranspileOptions,
    cancel: &CancellationToken,
) -> Result<Vec<String>, BuildError> {
    if config.no_emit || cancel.is_cancelled() {
        return Ok(Vec::new());
    }
    let Some(transpiler) = transpiler else {
        return Ok(Vec::new());
    };

    let mut entry_points: Vec<String> = resolved_entries.values().cloned().collect();
    entry_points.sort();
    if entry_points.is_empty() {
        return Ok(Vec::new());
    }

    let output = transpiler.transpile(&entry_points, options).map_err(BuildError::Other)?;
    for (path, contents) in &output.output_files {
        let full_path = config.project_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Other(anyhow::Error::from(source)))?;
        }
        fs::write(&full_path, contents).map_err(|source| BuildError::Other(anyhow::Error::from(source)))?;
    }

    Ok(output.warnings)
}

#[cfg(test)]
#[path = "../tests/run_tests.rs"]
mod tests;
