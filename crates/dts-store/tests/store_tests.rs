use super::*;

fn new_cache(dir: &std::path::Path) -> DeclarationCache {
    DeclarationCache::new(dir, ".cache", "declarations.bin", build_info_path(dir))
}

fn build_info_path(dir: &std::path::Path) -> std::path::PathBuf {
    dir.join("tsbuildinfo.json")
}

#[test]
fn initialize_without_cache_clears_files() {
    let mut store = DeclarationStore::new(None, "tsbuildinfo.json");
    store
        .file_writer("a.d.ts", "declare function foo(): void;\n")
        .expect("file_writer should succeed");
    assert!(!store.get_declaration_files().is_empty());

    store.initialize();
    assert!(store.get_declaration_files().is_empty());
}

#[test]
fn initialize_with_cache_restores_previously_saved_files() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");

    let mut first = DeclarationStore::new(Some(new_cache(dir.path())), build_info_path(dir.path()));
    first.initialize();
    first
        .file_writer("a.d.ts", "declare function foo(): void;\n")
        .expect("file_writer should succeed");
    first.finalize().expect("finalize should succeed");

    let mut second = DeclarationStore::new(Some(new_cache(dir.path())), build_info_path(dir.path()));
    second.initialize();

    assert_eq!(
        second.get_declaration_files().get("a.d.ts").map(|c| c.code.clone()),
        first.get_declaration_files().get("a.d.ts").map(|c| c.code.clone()),
    );
}

#[test]
fn finalize_without_cache_always_reports_work_needed() {
    let mut store = DeclarationStore::new(None, "tsbuildinfo.json");
    store.initialize();
    assert!(store.finalize().expect("finalize should succeed"));
}

#[test]
fn finalize_with_cache_and_no_emission_is_incremental_noop() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");
    let mut store = DeclarationStore::new(Some(new_cache(dir.path())), build_info_path(dir.path()));
    store.initialize();
    assert!(!store.finalize().expect("finalize should succeed"));
}

#[test]
fn finalize_with_cache_and_emission_saves_and_reports_work_done() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");
    let mut store = DeclarationStore::new(Some(new_cache(dir.path())), build_info_path(dir.path()));
    store.initialize();
    store
        .file_writer("a.d.ts", "declare function foo(): void;\n")
        .expect("file_writer should succeed");

    assert!(store.finalize().expect("finalize should succeed"));
    assert!(dir.path().join(".cache").join("declarations.bin").exists());
}

#[test]
fn file_writer_pre_processes_and_stores_declarations() {
    let mut store = DeclarationStore::new(None, "tsbuildinfo.json");
    store
        .file_writer("a.d.ts", "export class Foo {}\n")
        .expect("file_writer should succeed");

    let cached = store.get_declaration_files().get("a.d.ts").expect("should be stored");
    assert!(cached.code.contains("declare class Foo {}"));
}

#[test]
fn file_writer_writes_build_info_straight_to_disk() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");
    let build_info_path = dir.path().join("tsbuildinfo.json");
    let cache = DeclarationCache::new(dir.path(), ".cache", "declarations.bin", build_info_path.clone());
    let mut store = DeclarationStore::new(Some(cache), build_info_path.clone());
    store.initialize();

    store
        .file_writer(build_info_path.to_str().unwrap(), "{\"version\":1}")
        .expect("file_writer should succeed");

    let contents = fs::read_to_string(&build_info_path).expect("build info should be on disk");
    assert_eq!(contents, "{\"version\":1}");
    assert!(store.get_declaration_files().is_empty());
    assert!(store.finalize().expect("finalize should succeed"));
}

#[test]
fn file_writer_writes_build_info_straight_to_disk_with_caching_disabled() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");
    let build_info_path = dir.path().join("tsbuildinfo.json");
    let mut store = DeclarationStore::new(None, build_info_path.clone());

    store
        .file_writer(build_info_path.to_str().unwrap(), "{\"version\":1}")
        .expect("file_writer should succeed");

    let contents = fs::read_to_string(&build_info_path).expect("build info should be on disk even without a cache");
    assert_eq!(contents, "{\"version\":1}");
    assert!(store.get_declaration_files().is_empty());
}

#[test]
fn write_files_writes_every_entry_and_reports_sizes() {
    let dir = tempfile::TempDir::new().expect("temp dir creation should succeed in test");
    let mut store = DeclarationStore::new(None, "tsbuildinfo.json");
    store
        .file_writer("nested/a.d.ts", "declare function foo(): void;\n")
        .expect("file_writer should succeed");

    let written = store.write_files(dir.path()).expect("write_files should succeed");
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].relative_path, "nested/a.d.ts");
    assert!(written[0].size_bytes > 0);
    assert!(dir.path().join("nested/a.d.ts").exists());
}

#[test]
fn resolve_entry_points_defaults_to_index_only() {
    let store = DeclarationStore::new(None, "tsbuildinfo.json");
    let all = HashMap::from([
        ("index".to_string(), "src/index.d.ts".to_string()),
        ("other".to_string(), "src/other.d.ts".to_string()),
    ]);

    let resolved = store.resolve_entry_points(&all, None);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("index"), Some(&"src/index.d.ts".to_string()));
}

#[test]
fn resolve_entry_points_returns_everything_when_no_index_present() {
    let store = DeclarationStore::new(None, "tsbuildinfo.json");
    let all = HashMap::from([("other".to_string(), "src/other.d.ts".to_string())]);

    let resolved = store.resolve_entry_points(&all, None);
    assert_eq!(resolved, all);
}

#[test]
fn resolve_entry_points_with_selected_subset_skips_missing_names() {
    let store = DeclarationStore::new(None, "tsbuildinfo.json");
    let all = HashMap::from([
        ("index".to_string(), "src/index.d.ts".to_string()),
        ("other".to_string(), "src/other.d.ts".to_string()),
    ]);
    let selected = vec!["other".to_string(), "missing".to_string()];

    let resolved = store.resolve_entry_points(&all, Some(&selected));
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("other"), Some(&"src/other.d.ts".to_string()));
}

#[test]
fn close_clears_the_store() {
    let mut store = DeclarationStore::new(None, "tsbuildinfo.json");
    store
        .file_writer("a.d.ts", "declare function foo(): void;\n")
        .expect("file_writer should succeed");
    store.close();
    assert!(store.get_declaration_files().is_empty());
}
