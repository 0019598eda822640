//! Post-process: clean up text emitted by the Bundle Composer (§4.1,
//! "Post-process").

use dts_parser::{parse, ExportFromKind, ExportSpecifierItem, Item, ItemKind};

use crate::rewrite::{apply_edits, Edit};

#[must_use]
#[tracing::instrument(name = "processor.post_process", skip_all)]
pub fn post_process(source: &str) -> String {
    let file = parse(source);
    let mut edits = Vec::new();
    collect_edits(&file.items, false, &mut edits);
    apply_edits(source, edits)
}

fn collect_edits(items: &[Item], in_namespace: bool, edits: &mut Vec<Edit>) {
    for item in items {
        match &item.kind {
            ItemKind::Empty => edits.push(Edit::delete(item.span)),
            ItemKind::Import(imp) => {
                if let Some(rewritten) = rewrite_specifier_extension(&imp.specifier) {
                    edits.push(Edit::replace(imp.specifier_span, format!("\"{rewritten}\"")));
                }
            }
            ItemKind::ExportNamed(en) => {
                if in_namespace {
                    collapse_redundant_as(&en.elements, edits);
                }
            }
            ItemKind::ExportFrom(ef) => {
                if let Some(rewritten) = rewrite_specifier_extension(&ef.specifier) {
                    edits.push(Edit::replace(ef.specifier_span, format!("\"{rewritten}\"")));
                }
                if in_namespace {
                    if let ExportFromKind::Named(elements) = &ef.kind {
                        collapse_redundant_as(elements, edits);
                    }
                }
            }
            ItemKind::Declaration(decl) => {
                if let Some(body) = &decl.body {
                    collect_edits(body, true, edits);
                }
            }
            ItemKind::ExportDefault(_) | ItemKind::ExportAssignment(_) | ItemKind::Other(_) => {}
        }
    }
}

/// `{ X as X }` only needs collapsing inside a module/namespace body — that
/// is the one place the bundler's rename pass can introduce a self-alias
/// that started out as a plain `{ X }` (§4.1 step 8 duplicates it on the way
/// in). A top-level `export { X as X }` was written that way by hand and is
/// left alone.
fn collapse_redundant_as(elements: &[ExportSpecifierItem], edits: &mut Vec<Edit>) {
    for el in elements {
        if el.exported_name.as_deref() == Some(el.local_name.as_str()) {
            edits.push(Edit::replace(el.span, el.local_name.clone()));
        }
    }
}

fn rewrite_specifier_extension(spec: &str) -> Option<String> {
    if !(spec.starts_with("./") || spec.starts_with("../")) {
        return None;
    }
    if let Some(stem) = spec.strip_suffix(".d.tsx") {
        return Some(format!("{stem}.js"));
    }
    if let Some(stem) = spec.strip_suffix(".d.ts") {
        return Some(format!("{stem}.js"));
    }
    None
}

#[cfg(test)]
#[path = "../tests/post_process_tests.rs"]
mod tests;
