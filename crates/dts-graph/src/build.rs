//! Module Graph Builder (§4.4): DFS from an entry declaration, resolving
//! specifiers through an injected resolver and collecting the closure of
//! modules that must be bundled.

use std::collections::HashMap;

use dts_parser::{parse, SourceFile};
use dts_processor::{pre_process, CachedDeclaration};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::identifiers::{collect_identifiers, collect_specifiers, IdentifierMap};
use crate::pattern::{matches_any, Pattern};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("entry point not found in declaration store: {entry}")]
    EntryNotFound { entry: String },

    #[error("failed to pre-process {path}")]
    Process {
        path: String,
        #[source]
        source: dts_processor::ProcessError,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Capabilities the injected resolver needs to answer `resolve_module_name`
/// (§6 "Resolver adapter").
pub trait ResolverHost {
    fn file_exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Option<String>;
    fn directory_exists(&self, path: &str) -> bool;
    fn current_directory(&self) -> String;
    fn get_directories(&self, path: &str) -> Vec<String>;
}

/// The injected module-resolution algorithm (§1 Non-goal: "replacing the
/// compiler's module-resolution algorithm — we rely on it through an
/// adapter interface").
pub trait ModuleResolver {
    fn resolve_module_name(&self, specifier: &str, containing_file: &str, host: &dyn ResolverHost) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub external: Vec<Pattern>,
    pub no_external: Vec<Pattern>,
    /// Whether to read-and-pre-process not-yet-cached modules from disk
    /// (§4.4 step 2's "if `resolve` is enabled").
    pub resolve: bool,
    pub output_dir: String,
    pub root_dir: Option<String>,
    pub declaration_extension: String,
}

/// A graph node: a module's pre-processed code, its parsed tree, its
/// identifier map, and the modules it imports (§3 "Module info").
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub path: String,
    pub code: String,
    pub imports: Vec<String>,
    pub type_references: Vec<String>,
    pub file_references: Vec<String>,
    pub identifiers: IdentifierMap,
}

#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    pub modules: FxHashMap<String, ModuleInfo>,
    pub bundled_specifiers: FxHashMap<String, Vec<String>>,
}

/// Translates a source path to its declaration path when the entry isn't
/// already a store key (§4.4 step 1).
#[must_use]
pub fn resolve_entry_path(
    entry: &str,
    store: &HashMap<String, CachedDeclaration>,
    config: &GraphConfig,
) -> Option<String> {
    if store.contains_key(entry) {
        return Some(entry.to_string());
    }

    let stem = strip_source_extension(entry);
    let relative = match &config.root_dir {
        Some(root) => stem.strip_prefix(root.as_str()).unwrap_or(stem).trim_start_matches('/'),
        None => stem.trim_start_matches('/'),
    };
    let candidate = format!(
        "{}/{relative}{}",
        config.output_dir.trim_end_matches('/'),
        config.declaration_extension
    );

    store.contains_key(&candidate).then_some(candidate)
}

fn strip_source_extension(path: &str) -> &str {
    for ext in [".tsx", ".ts", ".jsx", ".js", ".mts", ".cts"] {
        if let Some(stem) = path.strip_suffix(ext) {
            return stem;
        }
    }
    path
}

/// Builds the closure of modules reachable from `entry`, mutating `store`
/// when `config.resolve` lazily pulls in node_modules declarations from
/// disk (§4.4 step 2).
#[tracing::instrument(name = "graph.build", skip_all, fields(entry = %entry))]
pub fn build_graph(
    entry: &str,
    store: &mut HashMap<String, CachedDeclaration>,
    config: &GraphConfig,
    resolver: &dyn ModuleResolver,
    host: &dyn ResolverHost,
) -> GraphResult<ModuleGraph> {
    let entry_path = resolve_entry_path(entry, store, config).ok_or_else(|| GraphError::EntryNotFound {
        entry: entry.to_string(),
    })?;

    let mut graph = ModuleGraph::default();
    let mut parsed: FxHashMap<String, SourceFile> = FxHashMap::default();
    let mut visited: FxHashSet<String> = FxHashSet::default();

    visit(&entry_path, store, config, resolver, host, &mut graph, &mut parsed, &mut visited)?;

    Ok(graph)
}

#[allow(clippy::too_many_arguments)]
fn visit(
    path: &str,
    store: &mut HashMap<String, CachedDeclaration>,
    config: &GraphConfig,
    resolver: &dyn ModuleResolver,
    host: &dyn ResolverHost,
    graph: &mut ModuleGraph,
    parsed: &mut FxHashMap<String, SourceFile>,
    visited: &mut FxHashSet<String>,
) -> GraphResult<()> {
    if !visited.insert(path.to_string()) {
        return Ok(());
    }

    let cached = store
        .get(path)
        .cloned()
        .expect("caller only visits paths already confirmed present in the store");

    let file = parsed.entry(path.to_string()).or_insert_with(|| parse(&cached.code));
    let identifiers = collect_identifiers(file);
    let specifiers = collect_specifiers(file);

    let mut imports = Vec::new();
    let mut bundled = Vec::new();

    for specifier in specifiers {
        if matches_any(&specifier, &config.external) {
            continue;
        }

        let Some(resolved) = resolver.resolve_module_name(&specifier, path, host) else {
            continue;
        };

        let is_node_modules = resolved.contains("/node_modules/");
        if is_node_modules && !matches_any(&specifier, &config.no_external) {
            continue;
        }

        if !store.contains_key(&resolved) {
            if !config.resolve {
                continue;
            }
            let Some(raw) = host.read_file(&resolved) else {
                continue;
            };
            let processed = pre_process(&raw).map_err(|source| GraphError::Process {
                path: resolved.clone(),
                source,
            })?;
            store.insert(resolved.clone(), processed);
        }

        imports.push(resolved.clone());
        bundled.push(specifier);
        visit(&resolved, store, config, resolver, host, graph, parsed, visited)?;
    }

    graph.bundled_specifiers.insert(path.to_string(), bundled);
    graph.modules.insert(
        path.to_string(),
        ModuleInfo {
            path: path.to_string(),
            code: cached.code,
            imports,
            type_references: cached.type_references,
            file_references: cached.file_references,
            identifiers,
        },
    );

    Ok(())
}

#[cfg(test)]
#[path = "../tests/build_tests.rs"]
mod tests;
