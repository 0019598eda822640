use super::*;

fn sample() -> BuildConfig {
    BuildConfig {
        project_dir: std::path::PathBuf::from("/tmp/project"),
        cache_enabled: true,
        cache_dir_name: ".dtscache".to_string(),
        cache_file_name: "cache.bin".to_string(),
        build_info_file: std::path::PathBuf::from("/tmp/project/tsconfig.tsbuildinfo"),
        output_dir: "dist".to_string(),
        root_dir: Some("src".to_string()),
        declaration_extension: ".d.ts".to_string(),
        external: Vec::new(),
        no_external: Vec::new(),
        resolve: true,
        clean: false,
        minify: false,
        declarations: true,
        no_emit: false,
    }
}

#[test]
fn graph_config_mirrors_the_build_config_fields_it_shares() {
    let cfg = sample();
    let graph_config = cfg.graph_config();
    assert_eq!(graph_config.output_dir, "dist");
    assert_eq!(graph_config.root_dir.as_deref(), Some("src"));
    assert_eq!(graph_config.declaration_extension, ".d.ts");
    assert!(graph_config.resolve);
    assert!(graph_config.external.is_empty());
}
