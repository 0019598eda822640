use super::*;

use std::collections::HashMap;

use dts_cache::DeclarationCache;
use dts_common::Diagnostic;
use dts_graph::{ModuleResolver, ResolverHost};
use dts_store::DeclarationStore;

use crate::adapters::WriteFile;

struct StubCompiler {
    files: Vec<(String, String)>,
    diagnostics: Vec<Diagnostic>,
}

impl CompilerAdapter for StubCompiler {
    fn emit(
        &mut self,
        _target_source_file: Option<&str>,
        write_file: &mut WriteFile<'_>,
        _cancel: &CancellationToken,
        _emit_only_dts_files: bool,
    ) -> anyhow::Result<EmitResult> {
        for (path, text) in &self.files {
            write_file(path, text)?;
        }
        Ok(EmitResult {
            diagnostics: self.diagnostics.clone(),
        })
    }
}

struct JoinResolver;

impl ModuleResolver for JoinResolver {
    fn resolve_module_name(&self, specifier: &str, containing_file: &str, _host: &dyn ResolverHost) -> Option<String> {
        if !specifier.starts_with('.') {
            return None;
        }
        let dir = containing_file.rsplit_once('/').map_or("", |(dir, _)| dir);
        Some(format!("{dir}/{}.d.ts", specifier.trim_start_matches("./")))
    }
}

struct NullHost;

impl ResolverHost for NullHost {
    fn file_exists(&self, _path: &str) -> bool {
        false
    }
    fn read_file(&self, _path: &str) -> Option<String> {
        None
    }
    fn directory_exists(&self, _path: &str) -> bool {
        false
    }
    fn current_directory(&self) -> String {
        String::new()
    }
    fn get_directories(&self, _path: &str) -> Vec<String> {
        Vec::new()
    }
}

fn config(project_dir: &std::path::Path, cache_enabled: bool) -> BuildConfig {
    BuildConfig {
        project_dir: project_dir.to_path_buf(),
        cache_enabled,
        cache_dir_name: ".dtscache".to_string(),
        cache_file_name: "cache.bin".to_string(),
        build_info_file: project_dir.join("tsconfig.tsbuildinfo"),
        output_dir: "dist".to_string(),
        root_dir: None,
        declaration_extension: ".d.ts".to_string(),
        external: Vec::new(),
        no_external: Vec::new(),
        resolve: false,
        clean: false,
        minify: false,
        declarations: true,
        no_emit: true,
    }
}

fn store(project_dir: &std::path::Path, cache_enabled: bool) -> DeclarationStore {
    let build_info_file = project_dir.join("tsconfig.tsbuildinfo");
    let cache = cache_enabled.then(|| {
        DeclarationCache::new(project_dir, ".dtscache", "cache.bin", build_info_file.clone())
    });
    DeclarationStore::new(cache, build_info_file)
}

#[test]
fn type_check_errors_abort_before_bundling() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), false);
    let mut store = store(dir.path(), false);
    let mut compiler = StubCompiler {
        files: vec![("src/index.d.ts".to_string(), "declare const x: number;\nexport { x };\n".to_string())],
        diagnostics: vec![Diagnostic::error("src/index.ts", 0, 1, "type error", 2345)],
    };
    let entry_points = HashMap::from([("index".to_string(), "src/index.ts".to_string())]);
    let resolver = JoinResolver;
    let host = NullHost;
    let cancel = CancellationToken::new();
    let options = TranspileOptions::default();

    let err = run_build(
        &cfg,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &options,
        &cancel,
    )
    .unwrap_err();

    assert!(matches!(err, BuildError::TypeCheck { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn incremental_no_op_skips_bundling_when_cache_has_no_new_emissions() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), true);
    let mut store = store(dir.path(), true);
    let mut compiler = StubCompiler {
        files: Vec::new(),
        diagnostics: Vec::new(),
    };
    let entry_points = HashMap::new();
    let resolver = JoinResolver;
    let host = NullHost;
    let cancel = CancellationToken::new();
    let options = TranspileOptions::default();

    let report = run_build(
        &cfg,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &options,
        &cancel,
    )
    .expect("build should succeed");

    assert!(report.incremental_no_op);
    assert!(report.written_files.is_empty());
}

#[test]
fn bundles_two_modules_with_a_local_import() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), false);
    let mut store = store(dir.path(), false);
    let mut compiler = StubCompiler {
        files: vec![
            (
                "src/index.d.ts".to_string(),
                "import { User } from \"./types\";\nexport declare const u: User;\n".to_string(),
            ),
            (
                "src/types.d.ts".to_string(),
                "export interface User { name: string; }\n".to_string(),
            ),
        ],
        diagnostics: Vec::new(),
    };
    let entry_points = HashMap::from([("index".to_string(), "src/index.d.ts".to_string())]);
    let resolver = JoinResolver;
    let host = NullHost;
    let cancel = CancellationToken::new();
    let options = TranspileOptions::default();

    let report = run_build(
        &cfg,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &options,
        &cancel,
    )
    .expect("build should succeed");

    assert_eq!(report.written_files.len(), 1);
    let output = std::fs::read_to_string(dir.path().join("dist/index.d.ts")).unwrap();
    assert!(output.contains("interface User"));
    assert!(output.contains("declare const u: User"));
    assert!(output.contains("export { u };"));
}

#[test]
fn missing_entry_point_surfaces_as_bundle_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), false);
    let mut store = store(dir.path(), false);
    let mut compiler = StubCompiler {
        files: Vec::new(),
        diagnostics: Vec::new(),
    };
    let entry_points = HashMap::from([("index".to_string(), "src/missing.d.ts".to_string())]);
    let resolver = JoinResolver;
    let host = NullHost;
    let cancel = CancellationToken::new();
    let options = TranspileOptions::default();

    let err = run_build(
        &cfg,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &options,
        &cancel,
    )
    .unwrap_err();

    assert!(matches!(err, BuildError::Bundle(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn cancellation_observed_before_emit_short_circuits_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), false);
    let mut store = store(dir.path(), false);
    let mut compiler = StubCompiler {
        files: Vec::new(),
        diagnostics: Vec::new(),
    };
    let entry_points = HashMap::new();
    let resolver = JoinResolver;
    let host = NullHost;
    let cancel = CancellationToken::new();
    cancel.cancel();
    let options = TranspileOptions::default();

    let report = run_build(
        &cfg,
        &mut store,
        &entry_points,
        None,
        &mut compiler,
        &resolver,
        &host,
        None,
        &options,
        &cancel,
    )
    .expect("cancellation is reported, not an error");

    assert!(report.cancelled);
}
