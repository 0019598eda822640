use dts_common::Span;

/// Errors the processor can raise while rewriting a declaration file.
///
/// Pre-process never fails outright on unrecognized syntax — it degrades to
/// `Other` spans and leaves them untouched — except for one shape it cannot
/// safely rewrite: an inline `import(...)` type reference whose argument is
/// not a string literal.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("unsupported inline import syntax at {span}: argument is not a string literal")]
    UnsupportedSyntax { span: Span },
}

pub type ProcessResult<T> = Result<T, ProcessError>;
