//! Per-module identifier maps and import-specifier extraction (§3 "Module
//! info", §4.4 step 2).

use rustc_hash::FxHashSet;

use dts_parser::{DeclKind, Item, ItemKind, SourceFile};

/// Top-level (and nested-namespace) names a module declares, split by
/// whether they denote a type or a value. §4.4: "Recurse into module
/// blocks" — a name nested in a `declare namespace` body is folded into the
/// same per-file map as a top-level one, since pre-processing has already
/// normalized namespace bodies the same way as the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierMap {
    pub types: FxHashSet<String>,
    pub values: FxHashSet<String>,
}

#[must_use]
pub fn collect_identifiers(file: &SourceFile) -> IdentifierMap {
    let mut map = IdentifierMap::default();
    collect_identifiers_into(&file.items, &mut map);
    map
}

fn collect_identifiers_into(items: &[Item], map: &mut IdentifierMap) {
    for item in items {
        if let ItemKind::Declaration(decl) = &item.kind {
            let target = match decl.decl_kind {
                DeclKind::Interface | DeclKind::TypeAlias => Some(&mut map.types),
                DeclKind::Enum | DeclKind::Function | DeclKind::Class | DeclKind::Variable | DeclKind::Module => {
                    Some(&mut map.values)
                }
            };
            if let Some(set) = target {
                for name in &decl.names {
                    set.insert(name.name.clone());
                }
            }
            if decl.decl_kind == DeclKind::Module {
                if let Some(body) = &decl.body {
                    collect_identifiers_into(body, map);
                }
            }
        }
    }
}

/// Every specifier string named by a top-level `import … from "<s>"` or
/// `export … from "<s>"`, in source order, without duplicates.
#[must_use]
pub fn collect_specifiers(file: &SourceFile) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut specifiers = Vec::new();
    collect_specifiers_into(&file.items, &mut seen, &mut specifiers);
    specifiers
}

fn collect_specifiers_into(items: &[Item], seen: &mut FxHashSet<String>, out: &mut Vec<String>) {
    for item in items {
        match &item.kind {
            ItemKind::Import(imp) => push_unique(seen, out, imp.specifier.clone()),
            ItemKind::ExportFrom(ef) => push_unique(seen, out, ef.specifier.clone()),
            ItemKind::Declaration(decl) if decl.decl_kind == DeclKind::Module => {
                if let Some(body) = &decl.body {
                    collect_specifiers_into(body, seen, out);
                }
            }
            _ => {}
        }
    }
}

fn push_unique(seen: &mut FxHashSet<String>, out: &mut Vec<String>, specifier: String) {
    if seen.insert(specifier.clone()) {
        out.push(specifier);
    }
}

#[cfg(test)]
#[path = "../tests/identifiers_tests.rs"]
mod tests;
