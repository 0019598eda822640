//! The diagnostic shape returned by the compiler adapter's `emit` call.
//!
//! The compiler itself is an external collaborator (§1); this crate only
//! needs a shape stable enough for the orchestrator to decide whether a
//! build failed and to format a `TypeCheck` summary (§7).

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Render the first-error-location summary used by the `TypeCheck` error path.
///
/// Groups diagnostics by file and reports the file count plus the first
/// error's location, matching the "per-file summary and first-error
/// location" wording of §7.
#[must_use]
pub fn format_type_check_summary(diagnostics: &[Diagnostic], line_maps: &[(&str, LineMapRef)]) -> String {
    let errors: Vec<&Diagnostic> = diagnostics.iter().filter(|d| d.is_error()).collect();
    if errors.is_empty() {
        return String::new();
    }

    let mut files: Vec<&str> = errors.iter().map(|d| d.file.as_str()).collect();
    files.sort_unstable();
    files.dedup();

    let first = errors[0];
    let location = line_maps
        .iter()
        .find(|(f, _)| *f == first.file)
        .map(|(_, map)| {
            let pos = map.offset_to_position(first.start);
            format!("{}:{}", pos.line + 1, pos.character + 1)
        })
        .unwrap_or_else(|| first.start.to_string());

    format!(
        "{} error(s) across {} file(s); first error at {}:{} - {}",
        errors.len(),
        files.len(),
        first.file,
        location,
        first.message_text
    )
}

/// A narrow facade over `crate::position::LineMap` so `format_type_check_summary`
/// does not need to depend on source text directly.
pub struct LineMapRef<'a> {
    map: &'a crate::position::LineMap,
    source: &'a str,
}

impl<'a> LineMapRef<'a> {
    #[must_use]
    pub fn new(map: &'a crate::position::LineMap, source: &'a str) -> Self {
        Self { map, source }
    }

    fn offset_to_position(&self, offset: u32) -> crate::position::Position {
        self.map.offset_to_position(offset, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_errors_yields_empty_summary() {
        let warning = Diagnostic {
            category: DiagnosticCategory::Warning,
            code: 1,
            file: "a.ts".into(),
            start: 0,
            length: 1,
            message_text: "unused".into(),
        };
        assert_eq!(format_type_check_summary(&[warning], &[]), "");
    }

    #[test]
    fn summary_reports_file_count_and_first_location() {
        let map = crate::position::LineMap::build("abc\ndef\n");
        let d1 = Diagnostic::error("a.ts", 4, 1, "oops", 100);
        let d2 = Diagnostic::error("b.ts", 0, 1, "oops2", 101);
        let refs = [("a.ts", LineMapRef::new(&map, "abc\ndef\n"))];
        let summary = format_type_check_summary(&[d1, d2], &refs);
        assert!(summary.contains("2 error(s) across 2 file(s)"));
        assert!(summary.contains("a.ts"));
    }
}
