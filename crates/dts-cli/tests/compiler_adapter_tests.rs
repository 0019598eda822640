use super::*;

use std::fs;

use dts_orchestrator::CancellationToken;

#[test]
fn emit_copies_existing_dts_files_through_write_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.d.ts"), "export interface User {}\n").unwrap();

    let mut compiler = FsPassthroughCompiler {
        root_dir: dir.path().to_path_buf(),
        output_dir: "dist".to_string(),
        cache_dir_name: ".dts-cache".to_string(),
    };

    let mut collected = Vec::new();
    let mut write_cb = |path: &str, text: &str| -> anyhow::Result<()> {
        collected.push((path.to_string(), text.to_string()));
        Ok(())
    };

    let result = compiler.emit(None, &mut write_cb, &CancellationToken::new(), true).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(collected.len(), 1);
    assert!(collected[0].0.ends_with("index.d.ts"));
}

#[test]
fn emit_skips_node_modules_output_and_cache_dirs() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.d.ts"), "export interface User {}\n").unwrap();
    fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
    fs::write(dir.path().join("node_modules/dep/index.d.ts"), "export {};\n").unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::write(dir.path().join("dist/index.d.ts"), "export {};\n").unwrap();
    fs::create_dir_all(dir.path().join(".dts-cache")).unwrap();
    fs::write(dir.path().join(".dts-cache/leftover.d.ts"), "export {};\n").unwrap();

    let mut compiler = FsPassthroughCompiler {
        root_dir: dir.path().to_path_buf(),
        output_dir: "dist".to_string(),
        cache_dir_name: ".dts-cache".to_string(),
    };

    let mut collected = Vec::new();
    let mut write_cb = |path: &str, text: &str| -> anyhow::Result<()> {
        collected.push((path.to_string(), text.to_string()));
        Ok(())
    };

    compiler.emit(None, &mut write_cb, &CancellationToken::new(), true).unwrap();
    assert_eq!(collected.len(), 1);
    assert!(collected[0].0.ends_with("index.d.ts"));
    assert!(!collected[0].0.contains("node_modules"));
}

#[test]
fn discover_entry_points_keys_by_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.d.ts"), "export {};\n").unwrap();
    fs::write(dir.path().join("extra.d.ts"), "export {};\n").unwrap();

    let entries = discover_entry_points(dir.path(), "dist", ".dts-cache");
    assert_eq!(entries.len(), 2);
    assert!(entries.contains_key("index"));
    assert!(entries.contains_key("extra"));
}
