//! A shallow, declaration-file-shaped AST.
//!
//! Declaration files carry signatures, not executable bodies, so this tree
//! only needs enough structure to name and locate every top-level construct
//! the processor and the bundler care about (§4.1, §4.4, §4.5): imports,
//! exports, and top-level declarations with their modifiers and declared
//! names. Nested type expressions, class/interface/enum members, and
//! function bodies are left as opaque spans — rewriting them is never
//! required by the pre-process/post-process transforms or the bundler's
//! identifier rename pass, both of which only ever touch top-level text.
//!
//! Module/namespace bodies are the one exception: they are recursed into,
//! because both namespace export duplication (§4.1 step 8) and identifier
//! map collection (§4.4) operate one level inside them.

pub use dts_common::Span;

#[derive(Clone, Debug, Default)]
pub struct SourceFile {
    pub items: Vec<Item>,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub span: Span,
    pub kind: ItemKind,
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Import(ImportDecl),
    ExportFrom(ExportFromDecl),
    ExportNamed(ExportNamedDecl),
    ExportDefault(ExportDefaultDecl),
    /// `export = Name;` — passed through untouched; this construct never
    /// appears in the bundling scenarios of §8 but must not be mistaken
    /// for an unrecognized statement.
    ExportAssignment(Span),
    Declaration(Declaration),
    /// A lone `;`.
    Empty,
    /// Anything this parser does not need to understand structurally
    /// (ambient `declare global { ... }` blocks, stray expression
    /// statements). Preserved verbatim by the processor.
    Other(Span),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub export: Option<Span>,
    pub default: Option<Span>,
    pub declare: Option<Span>,
}

impl Modifiers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.export.is_none() && self.default.is_none() && self.declare.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Function,
    Interface,
    TypeAlias,
    Enum,
    Module,
    Variable,
}

impl DeclKind {
    /// Interface and type-alias declarations never receive `declare`
    /// (§4.1 step 2) — they have no runtime existence to begin with.
    #[must_use]
    pub fn accepts_declare(&self) -> bool {
        !matches!(self, DeclKind::Interface | DeclKind::TypeAlias)
    }
}

#[derive(Clone, Debug)]
pub struct NamedBinding {
    pub name: String,
    pub name_span: Span,
    /// Span of just this declarator, used when splitting a multi-name
    /// variable statement (§4.1 step 4).
    pub decl_span: Span,
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub modifiers: Modifiers,
    /// Byte offset where a missing `declare` modifier should be inserted:
    /// immediately before the first token of the declaration proper (after
    /// any `export`/`default` already stripped by the caller, before any
    /// `abstract`/`const` prefix or the defining keyword itself).
    pub modifiers_start: u32,
    pub decl_kind: DeclKind,
    /// The span of the defining keyword (`class`, `function`, `interface`,
    /// `type`, `enum`, `module`/`namespace`, `const`/`let`/`var`).
    pub keyword_span: Span,
    /// One entry for most declarations; more than one for a
    /// comma-separated variable statement.
    pub names: Vec<NamedBinding>,
    /// For a `module`/`namespace` declaration with a brace body, the
    /// recursively parsed inner items. `None` for an ambient
    /// `declare module "spec";` with no body, and for every other kind.
    pub body: Option<Vec<Item>>,
}

#[derive(Clone, Debug)]
pub struct ImportDecl {
    pub type_only: bool,
    pub type_keyword_span: Option<Span>,
    pub clause: Option<ImportClause>,
    pub specifier: String,
    pub specifier_span: Span,
}

#[derive(Clone, Debug)]
pub enum ImportClause {
    Default {
        name: String,
        named: Option<NamedImports>,
    },
    Namespace {
        name: String,
    },
    Named(NamedImports),
    DefaultAndNamespace {
        default_name: String,
        ns_name: String,
    },
}

#[derive(Clone, Debug)]
pub struct NamedImports {
    pub span: Span,
    pub elements: Vec<ImportSpecifierItem>,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifierItem {
    pub type_only: bool,
    pub type_keyword_span: Option<Span>,
    pub imported_name: String,
    pub local_name: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ExportFromDecl {
    pub type_only: bool,
    pub type_keyword_span: Option<Span>,
    pub kind: ExportFromKind,
    pub specifier: String,
    pub specifier_span: Span,
}

#[derive(Clone, Debug)]
pub enum ExportFromKind {
    Star,
    StarAs(String),
    Named(Vec<ExportSpecifierItem>),
}

#[derive(Clone, Debug)]
pub struct ExportNamedDecl {
    pub type_only: bool,
    pub type_keyword_span: Option<Span>,
    pub elements: Vec<ExportSpecifierItem>,
    /// Span of the `{ ... }` clause, needed by namespace export
    /// duplication (§4.1 step 8) to know where to insert `as Name`.
    pub braces_span: Span,
}

#[derive(Clone, Debug)]
pub struct ExportSpecifierItem {
    pub type_only: bool,
    pub type_keyword_span: Option<Span>,
    pub local_name: String,
    /// `None` when the specifier has no `as` clause; distinguishes
    /// `export { Name }` (needs duplication in a namespace body) from
    /// `export { Name as Name }` (already explicit).
    pub exported_name: Option<String>,
    pub span: Span,
}

impl ExportSpecifierItem {
    #[must_use]
    pub fn exported_name_or_local(&self) -> &str {
        self.exported_name.as_deref().unwrap_or(&self.local_name)
    }
}

#[derive(Clone, Debug)]
pub struct ExportDefaultDecl {
    /// `Some` for `export default class Foo {}` / `export default function
    /// foo() {}`; `None` for an anonymous declaration or a plain
    /// expression default.
    pub declared_name: Option<String>,
    /// Span of everything after the `default` keyword, up to (excluding)
    /// the terminating `;`.
    pub expr_span: Span,
}
