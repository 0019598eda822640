use super::*;

use std::fs;

use dts_orchestrator::CancellationToken;

use crate::cli::CliArgs;

fn args_for(project: std::path::PathBuf) -> CliArgs {
    CliArgs {
        project,
        force: false,
        watch: false,
        no_emit: false,
        clear_cache: false,
        minify: false,
        verbose: 0,
    }
}

#[test]
fn run_once_bundles_a_simple_project() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("types.d.ts"), "export interface User { name: string; }\n").unwrap();
    fs::write(
        dir.path().join("index.d.ts"),
        "import { User } from \"./types\";\nexport declare const u: User;\n",
    )
    .unwrap();

    let report = run_once(&args_for(dir.path().to_path_buf()), &CancellationToken::new()).unwrap();
    assert!(!report.incremental_no_op);
    assert!(!report.written_files.is_empty());

    let bundled = fs::read_to_string(dir.path().join("dist/index.d.ts")).unwrap();
    assert!(bundled.contains("interface User"));
    assert!(bundled.contains("declare const u: User"));
}

#[test]
fn run_once_reports_cancelled_when_token_is_already_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.d.ts"), "export interface User {}\n").unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = run_once(&args_for(dir.path().to_path_buf()), &cancel).unwrap();
    assert!(report.cancelled);
}

#[test]
fn clear_cache_invalidates_before_building() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.d.ts"), "export interface User {}\n").unwrap();

    let mut args = args_for(dir.path().to_path_buf());
    args.clear_cache = true;

    let report = run_once(&args, &CancellationToken::new()).unwrap();
    assert!(!report.incremental_no_op);
}
