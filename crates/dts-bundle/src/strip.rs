//! Per-module import/export stripping and identifier substitution (§4.5
//! steps 4-6): each bundled module's own `import`/`export` headers are
//! removed, its name collisions are applied, and what every module still
//! needs from the outside world (an external package, not another bundled
//! module) is surfaced for the merge pass.

use std::collections::HashMap;

use dts_parser::{parse, ExportFromKind, ImportClause, ImportDecl, ItemKind};
use dts_processor::rewrite::{apply_edits, Edit};
use dts_scanner::{tokenize, SyntaxKind};

use dts_graph::ModuleGraph;

use crate::rename::RenameMap;

#[derive(Debug, Clone)]
pub enum ImportForm {
    /// A `{ a, b as c }` clause: dedup/sort-friendly member pairs.
    Named(Vec<(String, String)>),
    /// Anything else (default, namespace, side-effect-only) — kept verbatim
    /// since there is no structured shape worth merging across modules.
    Other(String),
}

#[derive(Debug, Clone)]
pub struct ExternalImport {
    pub type_only: bool,
    pub specifier: String,
    pub form: ImportForm,
}

#[derive(Debug, Clone, Default)]
pub struct StrippedModule {
    pub code: String,
    pub external_imports: Vec<ExternalImport>,
    pub external_export_froms: Vec<String>,
    /// `(possibly-renamed local name, exported name)`.
    pub value_exports: Vec<(String, String)>,
    pub type_exports: Vec<(String, String)>,
    pub default_export: Option<String>,
}

/// Strips `path`'s own import/export statements and applies the identifier
/// substitutions the rename pass and its import bindings require.
#[must_use]
pub fn strip_module(path: &str, graph: &ModuleGraph, renames: &RenameMap) -> StrippedModule {
    let module = graph
        .modules
        .get(path)
        .expect("caller only strips paths already confirmed present in the graph");
    let file = parse(&module.code);
    let subs = build_substitutions(path, graph, renames);

    let mut edits = Vec::new();
    let mut out = StrippedModule::default();

    for item in &file.items {
        match &item.kind {
            ItemKind::Import(imp) => {
                edits.push(Edit::delete(item.span));
                if resolve_bundled_target(path, &imp.specifier, graph).is_none() {
                    out.external_imports.push(to_external_import(imp, item.span.slice(&module.code)));
                }
            }
            ItemKind::ExportFrom(ef) => {
                edits.push(Edit::delete(item.span));
                match resolve_bundled_target(path, &ef.specifier, graph) {
                    Some(target) => {
                        if let ExportFromKind::Named(elements) = &ef.kind {
                            for el in elements {
                                let exported = el.exported_name_or_local().to_string();
                                if el.local_name == "default" {
                                    if let Some(name) = default_export_name(&target, graph) {
                                        let resolved = renames
                                            .get(&format!("{name}:{target}"))
                                            .cloned()
                                            .unwrap_or(name);
                                        out.value_exports.push((resolved, exported));
                                    }
                                    continue;
                                }
                                let resolved = renames
                                    .get(&format!("{}:{target}", el.local_name))
                                    .cloned()
                                    .unwrap_or_else(|| el.local_name.clone());
                                classify_export(
                                    &target,
                                    &el.local_name,
                                    &exported,
                                    &resolved,
                                    graph,
                                    &mut out.value_exports,
                                    &mut out.type_exports,
                                );
                            }
                        }
                        // `export * from "./bundled"` can't be expanded without
                        // re-deriving the target's full export surface; the
                        // target's own aggregated `export {...}` already names
                        // every value it exports, so this is a no-op here.
                    }
                    None => {
                        out.external_export_froms.push(item.span.slice(&module.code).trim_end().to_string());
                    }
                }
            }
            ItemKind::ExportNamed(en) => {
                edits.push(Edit::delete(item.span));
                for el in &en.elements {
                    let exported = el.exported_name_or_local().to_string();
                    let resolved = renames
                        .get(&format!("{}:{path}", el.local_name))
                        .cloned()
                        .unwrap_or_else(|| el.local_name.clone());
                    classify_export(path, &el.local_name, &exported, &resolved, graph, &mut out.value_exports, &mut out.type_exports);
                }
            }
            ItemKind::ExportDefault(ed) => {
                edits.push(Edit::delete(item.span));
                if let Some(name) = &ed.declared_name {
                    let resolved = renames.get(&format!("{name}:{path}")).cloned().unwrap_or_else(|| name.clone());
                    out.default_export = Some(resolved);
                }
            }
            _ => {}
        }
    }

    let stripped = apply_edits(&module.code, edits);
    out.code = substitute_identifiers(&stripped, &subs);
    out
}

fn classify_export(
    owner_path: &str,
    original_name: &str,
    exported_as: &str,
    resolved_name: &str,
    graph: &ModuleGraph,
    value_exports: &mut Vec<(String, String)>,
    type_exports: &mut Vec<(String, String)>,
) {
    let is_value = graph
        .modules
        .get(owner_path)
        .is_some_and(|m| m.identifiers.values.contains(original_name));
    let pair = (resolved_name.to_string(), exported_as.to_string());
    if is_value {
        value_exports.push(pair);
    } else {
        type_exports.push(pair);
    }
}

fn resolve_bundled_target(path: &str, specifier: &str, graph: &ModuleGraph) -> Option<String> {
    let module = graph.modules.get(path)?;
    let specifiers = graph.bundled_specifiers.get(path)?;
    let index = specifiers.iter().position(|s| s == specifier)?;
    module.imports.get(index).cloned()
}

fn default_export_name(path: &str, graph: &ModuleGraph) -> Option<String> {
    let module = graph.modules.get(path)?;
    let file = parse(&module.code);
    file.items.iter().find_map(|item| match &item.kind {
        ItemKind::ExportDefault(ed) => ed.declared_name.clone(),
        _ => None,
    })
}

/// Builds the identifier substitution map a module's own code needs: its
/// own renamed declarations, plus whatever local bindings it imports from
/// another bundled module that was itself renamed.
fn build_substitutions(path: &str, graph: &ModuleGraph, renames: &RenameMap) -> HashMap<String, String> {
    let mut subs = HashMap::new();
    let Some(module) = graph.modules.get(path) else {
        return subs;
    };

    for name in module.identifiers.types.iter().chain(module.identifiers.values.iter()) {
        if let Some(renamed) = renames.get(&format!("{name}:{path}")) {
            subs.insert(name.clone(), renamed.clone());
        }
    }

    let file = parse(&module.code);
    for item in &file.items {
        if let ItemKind::Import(imp) = &item.kind {
            let Some(target) = resolve_bundled_target(path, &imp.specifier, graph) else {
                continue;
            };
            if let Some(clause) = &imp.clause {
                collect_import_substitutions(clause, &target, graph, renames, &mut subs);
            }
        }
    }
    subs
}

fn collect_import_substitutions(
    clause: &ImportClause,
    target: &str,
    graph: &ModuleGraph,
    renames: &RenameMap,
    subs: &mut HashMap<String, String>,
) {
    let resolve = |name: &str| renames.get(&format!("{name}:{target}")).cloned().unwrap_or_else(|| name.to_string());
    match clause {
        ImportClause::Named(named) => {
            for el in &named.elements {
                subs.insert(el.local_name.clone(), resolve(&el.imported_name));
            }
        }
        ImportClause::Default { name, named } => {
            if let Some(default_name) = default_export_name(target, graph) {
                subs.insert(name.clone(), resolve(&default_name));
            }
            if let Some(named) = named {
                for el in &named.elements {
                    subs.insert(el.local_name.clone(), resolve(&el.imported_name));
                }
            }
        }
        // A namespace import (`import * as NS from "./mod"`) is consumed as
        // `NS.member`, which the shallow parser leaves as opaque text —
        // there is no span to redirect, so it passes through unrenamed.
        ImportClause::Namespace { .. } | ImportClause::DefaultAndNamespace { .. } => {}
    }
}

fn to_external_import(imp: &ImportDecl, raw: &str) -> ExternalImport {
    let form = match &imp.clause {
        Some(ImportClause::Named(named)) => ImportForm::Named(
            named
                .elements
                .iter()
                .map(|e| (e.imported_name.clone(), e.local_name.clone()))
                .collect(),
        ),
        _ => ImportForm::Other(raw.trim_end().to_string()),
    };
    ExternalImport {
        type_only: imp.type_only,
        specifier: imp.specifier.clone(),
        form,
    }
}

/// Token-level identifier substitution, skipping anything immediately after
/// a `.` so a renamed top-level name doesn't also rewrite a member access
/// that happens to share its text.
fn substitute_identifiers(code: &str, subs: &HashMap<String, String>) -> String {
    if subs.is_empty() {
        return code.to_string();
    }
    let tokens = tokenize(code);
    let mut edits = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind != SyntaxKind::Identifier {
            continue;
        }
        if i > 0 && tokens[i - 1].kind == SyntaxKind::Dot {
            continue;
        }
        let text = tok.text(code);
        let Some(renamed) = subs.get(text) else {
            continue;
        };
        if renamed == text {
            continue;
        }
        edits.push(Edit::replace(tok.span, renamed.clone()));
    }
    apply_edits(code, edits)
}

#[cfg(test)]
#[path = "../tests/strip_tests.rs"]
mod tests;
