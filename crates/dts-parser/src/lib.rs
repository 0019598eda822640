//! Shallow parser over the declaration-file subset of TypeScript.
//!
//! Produces a flat list of top-level items with structured headers
//! (import/export clauses, declaration modifiers and names) and opaque
//! spans for everything a declaration-bundling pass never needs to look
//! inside: type-expression bodies, class/interface/enum members, and
//! function signatures. Module and namespace bodies are the only bodies
//! recursed into, since the processor and bundler both operate one level
//! inside them (§4.1 step 8, §4.4).
//!
//! The parser never fails outright. Unrecognized constructs become
//! `ItemKind::Other` spans, preserved verbatim by the processor — this
//! mirrors the "AST-driven rewriting ... only on spans already bounded by
//! parser positions" guidance this design follows rather than a full
//! general-purpose TypeScript grammar.

pub mod ast;

pub use ast::*;
use dts_scanner::{tokenize, SyntaxKind, Token};

#[must_use]
pub fn parse(source: &str) -> SourceFile {
    let tokens = tokenize(source);
    let mut parser = Parser {
        source,
        tokens,
        idx: 0,
    };
    let items = parser.parse_items_until_close();
    SourceFile { items }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    idx: usize,
}

impl<'a> Parser<'a> {
    fn cur(&self) -> Token {
        self.tokens[self.idx]
    }

    fn cur_kind(&self) -> SyntaxKind {
        self.cur().kind
    }

    fn cur_span(&self) -> Span {
        self.cur().span
    }

    fn cur_start(&self) -> u32 {
        self.cur().span.start
    }

    fn cur_text(&self) -> &'a str {
        self.cur().text(self.source)
    }

    fn peek_kind(&self, ahead: usize) -> SyntaxKind {
        self.tokens
            .get(self.idx + ahead)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    fn is_word(&self, word: &str) -> bool {
        self.cur_kind() == SyntaxKind::Identifier && self.cur_text() == word
    }

    fn is_word_at(&self, ahead: usize, word: &str) -> bool {
        self.tokens
            .get(self.idx + ahead)
            .is_some_and(|t| t.kind == SyntaxKind::Identifier && t.text(self.source) == word)
    }

    fn bump(&mut self) -> Token {
        let tok = self.cur();
        if self.idx + 1 < self.tokens.len() {
            self.idx += 1;
        }
        tok
    }

    fn bump_text(&mut self) -> String {
        self.bump().text(self.source).to_string()
    }

    fn prev_end(&self) -> u32 {
        if self.idx == 0 {
            0
        } else {
            self.tokens[self.idx - 1].span.end
        }
    }

    fn expect_word(&mut self, word: &str) {
        if self.is_word(word) {
            self.bump();
        }
    }

    fn expect_string_literal(&mut self) -> (String, Span) {
        if self.cur_kind() == SyntaxKind::StringLiteral {
            let tok = self.bump();
            (strip_quotes(tok.text(self.source)).to_string(), tok.span)
        } else {
            (String::new(), self.cur_span())
        }
    }

    fn consume_semicolon_or_prev_end(&mut self) -> u32 {
        if self.cur_kind() == SyntaxKind::Semicolon {
            self.bump().span.end
        } else {
            self.prev_end()
        }
    }

    /// Consumes from the current `{` through its matching `}`, without
    /// looking at what is inside — used for class/interface/enum/function
    /// bodies, none of which this tool needs to rewrite.
    fn skip_balanced_braces(&mut self) {
        let mut depth = 0i32;
        loop {
            match self.cur_kind() {
                SyntaxKind::Eof => break,
                SyntaxKind::OpenBrace => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::CloseBrace => {
                    depth -= 1;
                    self.bump();
                    if depth <= 0 {
                        break;
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Advances past balanced `(){}[]<>` groups, stopping (without
    /// consuming) at the first token in `stops` seen at depth zero, or at
    /// EOF. `<`/`>` are tracked alongside brackets because declaration
    /// headers never contain a real comparison or shift operator — only
    /// generic parameter lists and type arguments — so treating every
    /// angle bracket as a nesting delimiter is safe here.
    fn scan_top_level(&mut self, stops: &[SyntaxKind]) -> u32 {
        let mut depth: i32 = 0;
        loop {
            let kind = self.cur_kind();
            if kind == SyntaxKind::Eof {
                return self.cur_start();
            }
            if depth == 0 && stops.contains(&kind) {
                return self.cur_start();
            }
            match kind {
                SyntaxKind::OpenBrace
                | SyntaxKind::OpenParen
                | SyntaxKind::OpenBracket
                | SyntaxKind::LessThan => depth += 1,
                SyntaxKind::CloseBrace
                | SyntaxKind::CloseParen
                | SyntaxKind::CloseBracket
                | SyntaxKind::GreaterThan => {
                    if depth > 0 {
                        depth -= 1;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_items_until_close(&mut self) -> Vec<Item> {
        let mut items = Vec::new();
        loop {
            if matches!(self.cur_kind(), SyntaxKind::Eof | SyntaxKind::CloseBrace) {
                break;
            }
            items.push(self.parse_item());
        }
        items
    }

    fn parse_item(&mut self) -> Item {
        let start = self.cur_start();
        if self.cur_kind() == SyntaxKind::Semicolon {
            let span = self.bump().span;
            return Item {
                span,
                kind: ItemKind::Empty,
            };
        }
        if self.is_word("import") {
            return self.parse_import(start);
        }
        if self.is_word("export") {
            return self.parse_export_item(start);
        }
        if let Some(item) = self.parse_declaration(start, None, None) {
            return item;
        }
        self.parse_other(start)
    }

    fn parse_other(&mut self, start: u32) -> Item {
        let mut depth: i32 = 0;
        let mut opened = false;
        loop {
            let kind = self.cur_kind();
            if kind == SyntaxKind::Eof {
                break;
            }
            if depth == 0 && kind == SyntaxKind::Semicolon {
                self.bump();
                break;
            }
            match kind {
                SyntaxKind::OpenBrace | SyntaxKind::OpenParen | SyntaxKind::OpenBracket => {
                    depth += 1;
                    opened = true;
                    self.bump();
                }
                SyntaxKind::CloseBrace | SyntaxKind::CloseParen | SyntaxKind::CloseBracket => {
                    if depth > 0 {
                        depth -= 1;
                    }
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
            if depth == 0 && opened {
                break;
            }
        }
        let end = self.prev_end().max(start);
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Other(Span::new(start, end)),
        }
    }

    // ---- imports ----

    fn parse_import(&mut self, start: u32) -> Item {
        let saved = self.idx;
        self.bump(); // 'import'

        if self.cur_kind() == SyntaxKind::StringLiteral {
            let (specifier, specifier_span) = self.expect_string_literal();
            let end = self.consume_semicolon_or_prev_end();
            return Item {
                span: Span::new(start, end),
                kind: ItemKind::Import(ImportDecl {
                    type_only: false,
                    type_keyword_span: None,
                    clause: None,
                    specifier,
                    specifier_span,
                }),
            };
        }

        let mut type_only = false;
        let mut type_keyword_span = None;
        if self.is_word("type")
            && !self.is_word_at(1, "from")
            && self.peek_kind(1) != SyntaxKind::Comma
            && self.peek_kind(1) != SyntaxKind::Equals
        {
            type_keyword_span = Some(self.cur_span());
            type_only = true;
            self.bump();
        }

        let clause = self.parse_import_clause();
        if !self.is_word("from") {
            self.idx = saved;
            return self.parse_other(start);
        }
        self.bump(); // 'from'
        let (specifier, specifier_span) = self.expect_string_literal();
        let end = self.consume_semicolon_or_prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Import(ImportDecl {
                type_only,
                type_keyword_span,
                clause: Some(clause),
                specifier,
                specifier_span,
            }),
        }
    }

    fn parse_import_clause(&mut self) -> ImportClause {
        if self.cur_kind() == SyntaxKind::Asterisk {
            self.bump();
            self.expect_word("as");
            let name = self.bump_text();
            return ImportClause::Namespace { name };
        }
        if self.cur_kind() == SyntaxKind::OpenBrace {
            let (elements, span) = self.parse_named_import_list();
            return ImportClause::Named(NamedImports { span, elements });
        }
        let default_name = self.bump_text();
        if self.cur_kind() == SyntaxKind::Comma {
            self.bump();
            if self.cur_kind() == SyntaxKind::Asterisk {
                self.bump();
                self.expect_word("as");
                let ns_name = self.bump_text();
                return ImportClause::DefaultAndNamespace {
                    default_name,
                    ns_name,
                };
            }
            if self.cur_kind() == SyntaxKind::OpenBrace {
                let (elements, span) = self.parse_named_import_list();
                return ImportClause::Default {
                    name: default_name,
                    named: Some(NamedImports { span, elements }),
                };
            }
        }
        ImportClause::Default {
            name: default_name,
            named: None,
        }
    }

    fn parse_named_import_list(&mut self) -> (Vec<ImportSpecifierItem>, Span) {
        let open_start = self.bump().span.start; // '{'
        let mut elements = Vec::new();
        loop {
            if matches!(self.cur_kind(), SyntaxKind::CloseBrace | SyntaxKind::Eof) {
                break;
            }
            let item_start = self.cur_start();
            let mut type_only = false;
            let mut type_keyword_span = None;
            if self.is_word("type")
                && self.peek_kind(1) != SyntaxKind::Comma
                && self.peek_kind(1) != SyntaxKind::CloseBrace
                && !self.is_word_at(1, "as")
            {
                type_keyword_span = Some(self.cur_span());
                type_only = true;
                self.bump();
            }
            let imported_name = self.bump_text();
            let mut local_name = imported_name.clone();
            if self.is_word("as") {
                self.bump();
                local_name = self.bump_text();
            }
            let item_end = self.prev_end();
            elements.push(ImportSpecifierItem {
                type_only,
                type_keyword_span,
                imported_name,
                local_name,
                span: Span::new(item_start, item_end),
            });
            if self.cur_kind() == SyntaxKind::Comma {
                self.bump();
                continue;
            }
            break;
        }
        let close_end = if self.cur_kind() == SyntaxKind::CloseBrace {
            self.bump().span.end
        } else {
            self.prev_end()
        };
        (elements, Span::new(open_start, close_end))
    }

    // ---- exports ----

    fn parse_export_item(&mut self, start: u32) -> Item {
        let saved = self.idx;
        let export_span = self.bump().span; // 'export'

        if self.is_word("default") {
            let default_span = self.bump().span;
            if self.is_word("abstract") || self.is_word("class") || self.is_word("function") {
                if let Some(item) = self.parse_declaration(start, Some(export_span), Some(default_span))
                {
                    return item;
                }
            }
            return self.parse_export_default_expr(start);
        }

        if self.cur_kind() == SyntaxKind::Equals {
            self.bump();
            self.scan_top_level(&[SyntaxKind::Semicolon]);
            let end = self.consume_semicolon_or_prev_end();
            return Item {
                span: Span::new(start, end),
                kind: ItemKind::ExportAssignment(Span::new(start, end)),
            };
        }

        let mut type_only = false;
        let mut type_keyword_span = None;
        if self.is_word("type")
            && (self.peek_kind(1) == SyntaxKind::OpenBrace || self.peek_kind(1) == SyntaxKind::Asterisk)
        {
            type_keyword_span = Some(self.cur_span());
            type_only = true;
            self.bump();
        }

        if self.cur_kind() == SyntaxKind::Asterisk {
            return self.parse_export_star(start, type_only, type_keyword_span);
        }

        if self.cur_kind() == SyntaxKind::OpenBrace {
            return self.parse_export_named_or_from(start, type_only, type_keyword_span);
        }

        self.idx = saved;
        self.bump(); // 'export'
        if let Some(item) = self.parse_declaration(start, Some(export_span), None) {
            return item;
        }
        self.idx = saved;
        self.parse_other(start)
    }

    fn parse_export_star(&mut self, start: u32, type_only: bool, type_keyword_span: Option<Span>) -> Item {
        self.bump(); // '*'
        let mut as_name = None;
        if self.is_word("as") {
            self.bump();
            as_name = Some(self.bump_text());
        }
        self.expect_word("from");
        let (specifier, specifier_span) = self.expect_string_literal();
        let end = self.consume_semicolon_or_prev_end();
        let kind = as_name.map_or(ExportFromKind::Star, ExportFromKind::StarAs);
        Item {
            span: Span::new(start, end),
            kind: ItemKind::ExportFrom(ExportFromDecl {
                type_only,
                type_keyword_span,
                kind,
                specifier,
                specifier_span,
            }),
        }
    }

    fn parse_export_named_or_from(
        &mut self,
        start: u32,
        type_only: bool,
        type_keyword_span: Option<Span>,
    ) -> Item {
        let (elements, braces_span) = self.parse_export_specifier_list();
        if self.is_word("from") {
            self.bump();
            let (specifier, specifier_span) = self.expect_string_literal();
            let end = self.consume_semicolon_or_prev_end();
            return Item {
                span: Span::new(start, end),
                kind: ItemKind::ExportFrom(ExportFromDecl {
                    type_only,
                    type_keyword_span,
                    kind: ExportFromKind::Named(elements),
                    specifier,
                    specifier_span,
                }),
            };
        }
        let end = self.consume_semicolon_or_prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::ExportNamed(ExportNamedDecl {
                type_only,
                type_keyword_span,
                elements,
                braces_span,
            }),
        }
    }

    fn parse_export_specifier_list(&mut self) -> (Vec<ExportSpecifierItem>, Span) {
        let open_start = self.bump().span.start; // '{'
        let mut elements = Vec::new();
        loop {
            if matches!(self.cur_kind(), SyntaxKind::CloseBrace | SyntaxKind::Eof) {
                break;
            }
            let item_start = self.cur_start();
            let mut type_only = false;
            let mut type_keyword_span = None;
            if self.is_word("type")
                && self.peek_kind(1) != SyntaxKind::Comma
                && self.peek_kind(1) != SyntaxKind::CloseBrace
                && !self.is_word_at(1, "as")
            {
                type_keyword_span = Some(self.cur_span());
                type_only = true;
                self.bump();
            }
            let local_name = self.bump_text();
            let mut exported_name = None;
            if self.is_word("as") {
                self.bump();
                exported_name = Some(self.bump_text());
            }
            let item_end = self.prev_end();
            elements.push(ExportSpecifierItem {
                type_only,
                type_keyword_span,
                local_name,
                exported_name,
                span: Span::new(item_start, item_end),
            });
            if self.cur_kind() == SyntaxKind::Comma {
                self.bump();
                continue;
            }
            break;
        }
        let close_end = if self.cur_kind() == SyntaxKind::CloseBrace {
            self.bump().span.end
        } else {
            self.prev_end()
        };
        (elements, Span::new(open_start, close_end))
    }

    fn parse_export_default_expr(&mut self, start: u32) -> Item {
        let expr_start = self.cur_start();
        let declared_name = if self.cur_kind() == SyntaxKind::Identifier {
            Some(self.cur_text().to_string())
        } else {
            None
        };
        self.scan_top_level(&[SyntaxKind::Semicolon]);
        let end = self.consume_semicolon_or_prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::ExportDefault(ExportDefaultDecl {
                declared_name,
                expr_span: Span::new(expr_start, end),
            }),
        }
    }

    // ---- top-level declarations ----

    fn parse_declaration(&mut self, start: u32, export: Option<Span>, default: Option<Span>) -> Option<Item> {
        let saved = self.idx;
        let modifiers_start = self.cur_start();
        let mut declare_span = None;
        loop {
            if self.is_word("declare") {
                declare_span = Some(self.cur_span());
                self.bump();
                continue;
            }
            if self.is_word("abstract") {
                self.bump();
                continue;
            }
            break;
        }
        let modifiers = Modifiers {
            export,
            default,
            declare: declare_span,
        };

        if self.is_word("const") && self.is_word_at(1, "enum") {
            self.bump(); // 'const'
            return Some(self.parse_enum(start, modifiers, modifiers_start));
        }
        if self.is_word("class") {
            return Some(self.parse_class_like(start, modifiers, modifiers_start, DeclKind::Class));
        }
        if self.is_word("function") {
            return Some(self.parse_function(start, modifiers, modifiers_start));
        }
        if self.is_word("interface") {
            return Some(self.parse_class_like(start, modifiers, modifiers_start, DeclKind::Interface));
        }
        if self.is_word("enum") {
            return Some(self.parse_enum(start, modifiers, modifiers_start));
        }
        if self.is_word("module") || self.is_word("namespace") {
            return Some(self.parse_module(start, modifiers, modifiers_start));
        }
        if self.is_word("type") {
            return Some(self.parse_type_alias(start, modifiers, modifiers_start));
        }
        if self.is_word("const") || self.is_word("let") || self.is_word("var") {
            return Some(self.parse_variable(start, modifiers, modifiers_start));
        }

        self.idx = saved;
        None
    }

    fn parse_class_like(
        &mut self,
        start: u32,
        modifiers: Modifiers,
        modifiers_start: u32,
        decl_kind: DeclKind,
    ) -> Item {
        let keyword_span = self.bump().span;
        let names = self.parse_optional_single_name();
        self.scan_top_level(&[SyntaxKind::OpenBrace, SyntaxKind::Semicolon]);
        if self.cur_kind() == SyntaxKind::OpenBrace {
            self.skip_balanced_braces();
        } else if self.cur_kind() == SyntaxKind::Semicolon {
            self.bump();
        }
        let end = self.prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind,
                keyword_span,
                names,
                body: None,
            }),
        }
    }

    fn parse_function(&mut self, start: u32, modifiers: Modifiers, modifiers_start: u32) -> Item {
        let keyword_span = self.bump().span;
        if self.cur_kind() == SyntaxKind::Asterisk {
            self.bump();
        }
        let names = self.parse_optional_single_name();
        self.scan_top_level(&[SyntaxKind::OpenBrace, SyntaxKind::Semicolon]);
        if self.cur_kind() == SyntaxKind::OpenBrace {
            self.skip_balanced_braces();
        } else if self.cur_kind() == SyntaxKind::Semicolon {
            self.bump();
        }
        let end = self.prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind: DeclKind::Function,
                keyword_span,
                names,
                body: None,
            }),
        }
    }

    fn parse_enum(&mut self, start: u32, modifiers: Modifiers, modifiers_start: u32) -> Item {
        let keyword_span = self.bump().span;
        let names = self.parse_optional_single_name();
        self.scan_top_level(&[SyntaxKind::OpenBrace, SyntaxKind::Semicolon]);
        if self.cur_kind() == SyntaxKind::OpenBrace {
            self.skip_balanced_braces();
        } else if self.cur_kind() == SyntaxKind::Semicolon {
            self.bump();
        }
        let end = self.prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind: DeclKind::Enum,
                keyword_span,
                names,
                body: None,
            }),
        }
    }

    fn parse_module(&mut self, start: u32, modifiers: Modifiers, modifiers_start: u32) -> Item {
        let keyword_span = self.bump().span;
        let (name, name_span) = if self.cur_kind() == SyntaxKind::StringLiteral {
            let tok = self.bump();
            (strip_quotes(tok.text(self.source)).to_string(), tok.span)
        } else {
            let name_start = self.cur_start();
            let mut parts = Vec::new();
            loop {
                if self.cur_kind() != SyntaxKind::Identifier {
                    break;
                }
                parts.push(self.bump_text());
                if self.cur_kind() == SyntaxKind::Dot {
                    self.bump();
                    continue;
                }
                break;
            }
            let name_end = self.prev_end();
            (parts.join("."), Span::new(name_start, name_end))
        };
        let body = if self.cur_kind() == SyntaxKind::OpenBrace {
            self.bump();
            let items = self.parse_items_until_close();
            if self.cur_kind() == SyntaxKind::CloseBrace {
                self.bump();
            }
            Some(items)
        } else {
            if self.cur_kind() == SyntaxKind::Semicolon {
                self.bump();
            }
            None
        };
        let end = self.prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind: DeclKind::Module,
                keyword_span,
                names: vec![NamedBinding {
                    name,
                    name_span,
                    decl_span: name_span,
                }],
                body,
            }),
        }
    }

    fn parse_type_alias(&mut self, start: u32, modifiers: Modifiers, modifiers_start: u32) -> Item {
        let keyword_span = self.bump().span;
        let names = self.parse_optional_single_name();
        self.scan_top_level(&[SyntaxKind::Semicolon]);
        let end = self.consume_semicolon_or_prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind: DeclKind::TypeAlias,
                keyword_span,
                names,
                body: None,
            }),
        }
    }

    fn parse_variable(&mut self, start: u32, modifiers: Modifiers, modifiers_start: u32) -> Item {
        let keyword_span = self.bump().span;
        let mut names = Vec::new();
        loop {
            if self.cur_kind() != SyntaxKind::Identifier {
                break;
            }
            let decl_start = self.cur_start();
            let name_tok = self.bump();
            let name = name_tok.text(self.source).to_string();
            let name_span = name_tok.span;
            let decl_end = self.scan_top_level(&[SyntaxKind::Comma, SyntaxKind::Semicolon]);
            names.push(NamedBinding {
                name,
                name_span,
                decl_span: Span::new(decl_start, decl_end),
            });
            if self.cur_kind() == SyntaxKind::Comma {
                self.bump();
                continue;
            }
            break;
        }
        let end = self.consume_semicolon_or_prev_end();
        Item {
            span: Span::new(start, end),
            kind: ItemKind::Declaration(Declaration {
                modifiers,
                modifiers_start,
                decl_kind: DeclKind::Variable,
                keyword_span,
                names,
                body: None,
            }),
        }
    }

    fn parse_optional_single_name(&mut self) -> Vec<NamedBinding> {
        if self.cur_kind() == SyntaxKind::Identifier {
            let tok = self.bump();
            vec![NamedBinding {
                name: tok.text(self.source).to_string(),
                name_span: tok.span,
                decl_span: tok.span,
            }]
        } else {
            Vec::new()
        }
    }
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

#[cfg(test)]
#[path = "../tests/parser.rs"]
mod tests;
