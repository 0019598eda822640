//! Wires `CliArgs` into one `dts_orchestrator::run_build` call (§6, §10.6).

use std::collections::HashMap;

use dts_cache::DeclarationCache;
use dts_orchestrator::{BuildConfig, BuildError, BuildReport, CancellationToken, TranspileOptions};
use dts_store::DeclarationStore;

use crate::cli::CliArgs;
use crate::compiler_adapter::{discover_entry_points, FsPassthroughCompiler};
use crate::resolver::{FsResolver, FsResolverHost};

const CACHE_DIR_NAME: &str = ".dts-cache";
const CACHE_FILE_NAME: &str = "declarations.bin";
const OUTPUT_DIR: &str = "dist";

pub fn config_from_args(args: &CliArgs) -> BuildConfig {
    let project_dir = args.project.clone();
    BuildConfig {
        project_dir: project_dir.clone(),
        cache_enabled: !args.force,
        cache_dir_name: CACHE_DIR_NAME.to_string(),
        cache_file_name: CACHE_FILE_NAME.to_string(),
        build_info_file: project_dir.join(OUTPUT_DIR).join(".tsbuildinfo"),
        output_dir: OUTPUT_DIR.to_string(),
        root_dir: None,
        declaration_extension: ".d.ts".to_string(),
        external: Vec::new(),
        no_external: Vec::new(),
        resolve: true,
        clean: args.force,
        minify: args.minify,
        declarations: true,
        no_emit: args.no_emit,
    }
}

/// Runs exactly one build for the given arguments and returns its outcome.
///
/// `cancel` is owned by the caller so a single Ctrl-C handler installed once
/// in `main` covers every build `--watch` drives, rather than each build
/// getting its own token a signal delivered mid-build could never reach.
pub fn run_once(args: &CliArgs, cancel: &CancellationToken) -> Result<BuildReport, BuildError> {
    let config = config_from_args(args);

    if args.clear_cache {
        DeclarationCache::new(&config.project_dir, &config.cache_dir_name, &config.cache_file_name, &config.build_info_file).invalidate();
    }

    let cache = config
        .cache_enabled
        .then(|| DeclarationCache::new(&config.project_dir, &config.cache_dir_name, &config.cache_file_name, &config.build_info_file));
    let mut store = DeclarationStore::new(cache, config.build_info_file.clone());

    let entry_points: HashMap<String, String> = discover_entry_points(&config.project_dir, &config.output_dir, &config.cache_dir_name);

    let mut compiler = FsPassthroughCompiler {
        root_dir: config.project_dir.clone(),
        output_dir: config.output_dir.clone(),
        cache_dir_name: config.cache_dir_name.clone(),
    };
    let resolver = FsResolver { root_dir: config.project_dir.clone() };
    let host = FsResolverHost;

    dts_orchestrator::run_build(
        &config,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &TranspileOptions::default(),
        &cancel,
    )
}

#[cfg(test)]
#[path = "../tests/build_tests.rs"]
mod tests;
