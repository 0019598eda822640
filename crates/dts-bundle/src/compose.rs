//! Bundle Composer entry point (§4.5): flattens a module graph reachable
//! from one entry point into a single coalesced declaration file.

use dts_graph::ModuleGraph;

use crate::merge::merge_imports;
use crate::rename::allocate_renames;
use crate::strip::strip_module;
use crate::toposort::topological_order;

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("entry module {entry} is not present in the module graph")]
    MissingEntry { entry: String },
}

pub type BundleResult<T> = Result<T, BundleError>;

#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub code: String,
    pub type_references: Vec<String>,
    pub file_references: Vec<String>,
}

/// Runs the full composition sequence: topological order, rename
/// allocation, per-module stripping, import merging, export resolution,
/// and final assembly (§4.5 steps 1-8), finishing with the same
/// post-process pass applied to any other declaration file (§4.1).
#[tracing::instrument(name = "composer.compose", skip_all, fields(entry = %entry))]
pub fn compose(entry: &str, graph: &ModuleGraph) -> BundleResult<Bundle> {
    if !graph.modules.contains_key(entry) {
        return Err(BundleError::MissingEntry { entry: entry.to_string() });
    }

    let order = topological_order(graph, entry);
    let renames = allocate_renames(&order, graph);

    let mut type_references = Vec::new();
    let mut file_references = Vec::new();
    let mut external_imports = Vec::new();
    let mut external_export_froms = Vec::new();
    let mut bodies = Vec::new();
    let mut value_exports: Vec<(String, String)> = Vec::new();
    let mut type_exports: Vec<(String, String)> = Vec::new();
    let mut default_export: Option<String> = None;

    for path in &order {
        let module = graph.modules.get(path).expect("topological_order only yields graph members");
        for reference in &module.type_references {
            push_unique(&mut type_references, reference.clone());
        }
        for reference in &module.file_references {
            push_unique(&mut file_references, reference.clone());
        }

        let stripped = strip_module(path, graph, &renames);
        if !stripped.code.trim().is_empty() {
            bodies.push(stripped.code);
        }
        external_imports.extend(stripped.external_imports);
        external_export_froms.extend(stripped.external_export_froms);

        // Only the entry module's own export surface becomes the bundle's
        // public API; a dependency's exports just need to resolve for the
        // modules that import from it, which the rename/substitution pass
        // already handled above (§9 open question: node_modules — and here,
        // every non-entry module's — exports are suppressed from the
        // aggregate even though their bodies are still concatenated).
        if path == entry {
            value_exports.extend(stripped.value_exports);
            type_exports.extend(stripped.type_exports);
            default_export = stripped.default_export;
        }
    }

    let merged_imports = merge_imports(&external_imports);

    let mut out = String::new();
    for reference in &file_references {
        out.push_str(&format!("/// <reference path=\"{reference}\" />\n"));
    }
    for reference in &type_references {
        out.push_str(&format!("/// <reference types=\"{reference}\" />\n"));
    }
    for statement in &merged_imports {
        out.push_str(statement);
        out.push('\n');
    }
    for statement in &external_export_froms {
        out.push_str(statement);
        out.push('\n');
    }
    if !out.is_empty() && !bodies.is_empty() {
        out.push('\n');
    }
    out.push_str(&bodies.join("\n\n"));

    value_exports.sort();
    value_exports.dedup();
    type_exports.sort();
    type_exports.dedup();

    if !value_exports.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("export {{ {} }};\n", format_export_clause(&value_exports)));
    }
    if !type_exports.is_empty() {
        out.push_str(&format!("export type {{ {} }};\n", format_export_clause(&type_exports)));
    }
    if let Some(name) = default_export {
        out.push_str(&format!("export default {name};\n"));
    }

    Ok(Bundle {
        code: dts_processor::post_process(&out),
        type_references,
        file_references,
    })
}

fn format_export_clause(exports: &[(String, String)]) -> String {
    exports
        .iter()
        .map(|(local, exported)| if local == exported { local.clone() } else { format!("{local} as {exported}") })
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
#[path = "../tests/compose_tests.rs"]
mod tests;
