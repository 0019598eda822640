//! Pre-process: turn a raw declaration file into a canonical, self-contained
//! form (§4.1 steps 1-10).
//!
//! The ten transformations are not all applied in one traversal: steps 1
//! (triple-slash extraction) and 5 (inline `import(...)` resolution) operate
//! on comment ranges and a raw token scan respectively, since both patterns
//! can occur inside text this parser deliberately leaves opaque (type
//! positions nested in class bodies, variable type annotations, and so on).
//! Each runs as its own pass over the text, producing an intermediate string
//! that the next pass re-tokenizes. Steps 2-4 and 6-10 share a single parse
//! and a single rewrite buffer, since they only ever touch top-level items.

use std::collections::{HashMap, HashSet};

use dts_common::comments::{get_comment_ranges, parse_triple_slash_reference, TripleSlashReferenceKind};
use dts_parser::{parse, DeclKind, ExportFromKind, Item, ItemKind, SourceFile, Span};
use dts_scanner::{tokenize, SyntaxKind};

use crate::error::{ProcessError, ProcessResult};
use crate::rewrite::{apply_edits, Edit};
use crate::CachedDeclaration;

#[must_use]
#[tracing::instrument(name = "processor.pre_process", skip_all)]
pub fn pre_process(source: &str) -> ProcessResult<CachedDeclaration> {
    let (after_refs, type_references, file_references) = strip_triple_slash_directives(source);
    let after_imports = resolve_inline_imports(&after_refs)?;

    let file = parse(&after_imports);
    let normalized = build_normalize_edits(&after_imports, &file);
    let after_normalize = apply_edits(&after_imports, normalized.edits);

    let file2 = parse(&after_normalize);
    let code = reorder_and_finalize(
        &after_normalize,
        &file2,
        normalized.exported_names,
        normalized.default_name,
    );

    Ok(CachedDeclaration {
        code,
        type_references,
        file_references,
    })
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

// ---- step 1: triple-slash directives ----

fn strip_triple_slash_directives(source: &str) -> (String, Vec<String>, Vec<String>) {
    let comments = get_comment_ranges(source);
    let mut edits = Vec::new();
    let mut type_references = Vec::new();
    let mut file_references = Vec::new();

    for comment in &comments {
        if let Some(reference) = parse_triple_slash_reference(comment, source) {
            match reference.kind {
                TripleSlashReferenceKind::Types => push_unique(&mut type_references, reference.target),
                TripleSlashReferenceKind::Path => push_unique(&mut file_references, reference.target),
            }
            edits.push(Edit::delete(Span::new(comment.pos, comment.end)));
        }
    }

    (apply_edits(source, edits), type_references, file_references)
}

// ---- step 5: inline import(...) resolution ----

fn sanitize_ident(spec: &str) -> String {
    spec.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn resolve_inline_imports(source: &str) -> ProcessResult<String> {
    let tokens = tokenize(source);
    let mut edits = Vec::new();
    let mut synth_by_spec: Vec<(String, String)> = Vec::new();
    let mut used_names: HashSet<String> = HashSet::new();

    let mut i = 0;
    while i < tokens.len() {
        let is_import_call = tokens[i].kind == SyntaxKind::Identifier
            && tokens[i].text(source) == "import"
            && tokens.get(i + 1).map(|t| t.kind) == Some(SyntaxKind::OpenParen);

        if !is_import_call {
            i += 1;
            continue;
        }

        let mut depth = 1i32;
        let inner_start = i + 2;
        let mut j = inner_start;
        while j < tokens.len() && depth > 0 {
            match tokens[j].kind {
                SyntaxKind::OpenParen => depth += 1,
                SyntaxKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            j += 1;
        }
        if j >= tokens.len() {
            i += 1;
            continue;
        }

        let inner_count = j - inner_start;
        if inner_count != 1 || tokens[inner_start].kind != SyntaxKind::StringLiteral {
            let call_span = Span::new(tokens[i].span.start, tokens[j].span.end);
            return Err(ProcessError::UnsupportedSyntax { span: call_span });
        }

        let spec_raw = tokens[inner_start].text(source);
        let spec = strip_quotes(spec_raw).to_string();
        let synth_name = match synth_by_spec.iter().find(|(s, _)| s == &spec) {
            Some((_, name)) => name.clone(),
            None => {
                let mut name = format!("__import_{}", sanitize_ident(&spec));
                while used_names.contains(&name) {
                    name = format!("_{name}");
                }
                used_names.insert(name.clone());
                synth_by_spec.push((spec.clone(), name.clone()));
                name
            }
        };

        let call_span = Span::new(tokens[i].span.start, tokens[j].span.end);
        edits.push(Edit::replace(call_span, synth_name));
        i = j + 1;
    }

    if synth_by_spec.is_empty() {
        return Ok(source.to_string());
    }

    let body = apply_edits(source, edits);
    let mut prelude = String::new();
    for (spec, name) in &synth_by_spec {
        prelude.push_str(&format!("import * as {name} from \"{spec}\";\n"));
    }
    prelude.push_str(&body);
    Ok(prelude)
}

fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        let (first, last) = (bytes[0], bytes[s.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

// ---- steps 2-4, 6-8: modifier normalization, splitting, clause sanitation ----

struct NormalizeResult {
    edits: Vec<Edit>,
    exported_names: Vec<String>,
    default_name: Option<String>,
}

fn build_normalize_edits(text: &str, file: &SourceFile) -> NormalizeResult {
    let mut edits = Vec::new();
    let mut exported_names = Vec::new();
    let mut default_name = None;

    let mut all_names: HashSet<String> = HashSet::new();
    for item in &file.items {
        if let ItemKind::Declaration(decl) = &item.kind {
            for n in &decl.names {
                all_names.insert(n.name.clone());
            }
        }
    }

    for item in &file.items {
        match &item.kind {
            ItemKind::Declaration(decl) => {
                handle_declaration(item, decl, text, &mut edits, &mut exported_names, &mut default_name, &all_names);
            }
            ItemKind::Import(imp) => {
                if let Some(sp) = imp.type_keyword_span {
                    edits.push(Edit::delete(sp));
                }
                if let Some(clause) = &imp.clause {
                    strip_named_import_types(clause, &mut edits);
                }
            }
            ItemKind::ExportNamed(en) => {
                if let Some(sp) = en.type_keyword_span {
                    edits.push(Edit::delete(sp));
                }
                for el in &en.elements {
                    if let Some(sp) = el.type_keyword_span {
                        edits.push(Edit::delete(sp));
                    }
                }
                for el in &en.elements {
                    push_unique(&mut exported_names, el.exported_name_or_local().to_string());
                }
                edits.push(Edit::delete(item.span));
            }
            ItemKind::ExportFrom(ef) => {
                if let Some(sp) = ef.type_keyword_span {
                    edits.push(Edit::delete(sp));
                }
                if let ExportFromKind::Named(elements) = &ef.kind {
                    for el in elements {
                        if let Some(sp) = el.type_keyword_span {
                            edits.push(Edit::delete(sp));
                        }
                    }
                }
            }
            ItemKind::ExportDefault(ed) => {
                let name = ed
                    .declared_name
                    .clone()
                    .unwrap_or_else(|| synthesize_default_name(&all_names));
                default_name = Some(name);
                edits.push(Edit::delete(item.span));
            }
            ItemKind::ExportAssignment(_) | ItemKind::Other(_) | ItemKind::Empty => {}
        }
    }

    NormalizeResult {
        edits,
        exported_names,
        default_name,
    }
}

fn synthesize_default_name(all_names: &HashSet<String>) -> String {
    let mut candidate = "export_default".to_string();
    while all_names.contains(&candidate) {
        candidate = format!("_{candidate}");
    }
    candidate
}

fn strip_named_import_types(clause: &dts_parser::ImportClause, edits: &mut Vec<Edit>) {
    use dts_parser::ImportClause;
    let named = match clause {
        ImportClause::Named(named) => Some(named),
        ImportClause::Default { named, .. } => named.as_ref(),
        ImportClause::Namespace { .. } | ImportClause::DefaultAndNamespace { .. } => None,
    };
    if let Some(named) = named {
        for el in &named.elements {
            if let Some(sp) = el.type_keyword_span {
                edits.push(Edit::delete(sp));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_declaration(
    item: &Item,
    decl: &dts_parser::Declaration,
    text: &str,
    edits: &mut Vec<Edit>,
    exported_names: &mut Vec<String>,
    default_name: &mut Option<String>,
    all_names: &HashSet<String>,
) {
    if decl.decl_kind == DeclKind::Variable {
        let kw_text = decl.keyword_span.slice(text);
        let parts: Vec<String> = decl
            .names
            .iter()
            .map(|n| {
                let declarator_text = n.decl_span.slice(text);
                format!("declare {kw_text} {declarator_text};")
            })
            .collect();
        edits.push(Edit::replace(item.span, parts.join(" ")));
    } else {
        let declare_needed = decl.modifiers.declare.is_none() && decl.decl_kind.accepts_declare();
        let strip_span = Span::new(item.span.start, decl.modifiers_start);
        if strip_span.start != strip_span.end || declare_needed {
            let replacement = if declare_needed { "declare ".to_string() } else { String::new() };
            edits.push(Edit::replace(strip_span, replacement));
        }
        if decl.decl_kind == DeclKind::Module {
            if let Some(body) = &decl.body {
                apply_namespace_export_duplication(body, edits);
            }
        }
    }

    if decl.modifiers.export.is_some() {
        match decl.decl_kind {
            DeclKind::Variable => {
                for n in &decl.names {
                    push_unique(exported_names, n.name.clone());
                }
            }
            _ => {
                if let Some(n) = decl.names.first() {
                    push_unique(exported_names, n.name.clone());
                }
            }
        }
    }

    if decl.modifiers.default.is_some() {
        match decl.names.first() {
            Some(n) => *default_name = Some(n.name.clone()),
            None => {
                // Anonymous `export default class {}` / `export default
                // function () {}`: the synthesized name has to be spliced
                // into the declaration itself, not just referenced by the
                // trailing `export default <name>;` — otherwise that
                // statement points at a name nothing ever declared.
                let name = synthesize_default_name(all_names);
                edits.push(Edit::insert(decl.keyword_span.end, format!(" {name}")));
                *default_name = Some(name);
            }
        }
    }
}

fn apply_namespace_export_duplication(body: &[Item], edits: &mut Vec<Edit>) {
    for inner in body {
        if let ItemKind::ExportNamed(en) = &inner.kind {
            for el in &en.elements {
                if el.exported_name.is_none() {
                    edits.push(Edit::insert(el.span.end, format!(" as {}", el.local_name)));
                }
            }
        }
    }
}

// ---- steps 9-10: reordering and aggregated exports ----

fn reorder_and_finalize(
    text: &str,
    file: &SourceFile,
    exported_names: Vec<String>,
    default_name: Option<String>,
) -> String {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (i, item) in file.items.iter().enumerate() {
        if let ItemKind::Declaration(d) = &item.kind {
            if let Some(n) = d.names.first() {
                first_seen.entry(n.name.clone()).or_insert(i);
            }
        }
    }

    let mut indexed: Vec<(usize, &Item)> = file.items.iter().enumerate().collect();
    indexed.sort_by_key(|(i, item)| {
        if let ItemKind::Declaration(d) = &item.kind {
            if let Some(n) = d.names.first() {
                let group = first_seen.get(&n.name).copied().unwrap_or(*i);
                return (group, *i);
            }
        }
        (*i, *i)
    });

    let mut pieces: Vec<&str> = indexed.iter().map(|(_, item)| item.span.slice(text)).collect();
    pieces.retain(|s| !s.trim().is_empty());

    let mut code = pieces.join("\n\n");

    if !exported_names.is_empty() {
        if !code.is_empty() {
            code.push('\n');
        }
        code.push_str(&format!("export {{ {} }};\n", exported_names.join(", ")));
    }
    if let Some(name) = default_name {
        code.push_str(&format!("export default {name};\n"));
    }
    code
}

#[cfg(test)]
#[path = "../tests/pre_process_tests.rs"]
mod tests;
