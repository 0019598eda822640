//! Common types and utilities shared across the declaration-bundling crates.
//!
//! This crate provides foundational types used by the scanner, parser,
//! processor, graph builder, and composer:
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`, `ByteSpan`)
//! - Position/line-map types for diagnostic locations
//! - Comment and triple-slash-directive scanning utilities
//! - A small diagnostic shape shared by the `TypeCheck` error path

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};

// Position/line-map types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Comment and triple-slash directive scanning
pub mod comments;

// Diagnostic shape used by the compiler adapter contract (§6, §7)
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};
