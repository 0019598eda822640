//! A position-addressed rewrite buffer.
//!
//! Every transform in this crate works the same way: walk a parsed tree (or
//! a token stream) once, decide what needs to change, and record *where*
//! without touching the source text directly. `apply` then performs a
//! single left-to-right copy of the original text, splicing in each edit's
//! replacement and skipping the span it covers. This keeps every unedited
//! byte — comments, blank lines, formatting — exactly as the compiler wrote
//! it.

use dts_common::Span;

/// Replace the text in `span` with `replacement`. An empty `replacement`
/// deletes the span; a zero-length `span` (via `Span::at`) inserts text
/// without deleting anything.
#[derive(Clone, Debug)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

impl Edit {
    #[must_use]
    pub fn delete(span: Span) -> Self {
        Edit {
            span,
            replacement: String::new(),
        }
    }

    #[must_use]
    pub fn insert(pos: u32, text: impl Into<String>) -> Self {
        Edit {
            span: Span::at(pos),
            replacement: text.into(),
        }
    }

    #[must_use]
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Edit {
            span,
            replacement: text.into(),
        }
    }
}

/// Apply a set of non-overlapping edits to `source`, producing the rewritten
/// text. Edits are sorted by start position first. An edit whose start falls
/// inside a span already consumed by an earlier edit is dropped — callers
/// are expected not to author overlapping edits, but a silent drop is safer
/// than a panic or garbled output for a tool this position-sensitive.
#[must_use]
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.span.start);
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0u32;
    for edit in edits {
        if edit.span.start < cursor {
            continue;
        }
        out.push_str(&source[cursor as usize..edit.span.start as usize]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end.max(cursor);
    }
    out.push_str(&source[cursor as usize..]);
    out
}
