//! Lexer for the declaration-file subset of TypeScript.
//!
//! A declaration file carries signatures, not executable code, so this
//! scanner only needs to recognize the token shapes that appear in type
//! positions, import/export clauses, and top-level declaration headers.
//! Keyword identity is resolved by the parser from token text rather than
//! by the scanner, matching the reference compiler's contextual-keyword
//! handling (`break`, `interface`, `type`, etc. are all plain `Identifier`
//! tokens here).

use dts_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxKind {
    Eof,
    Identifier,
    StringLiteral,
    NumericLiteral,
    TemplateLiteral,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    DotDotDot,
    Question,
    QuestionDot,
    Exclamation,
    Equals,
    EqualsGreaterThan,
    Bar,
    Amp,
    Asterisk,
    At,
    LessThan,
    GreaterThan,
    Plus,
    Minus,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }

    #[must_use]
    pub fn is_word(&self, source: &str, word: &str) -> bool {
        self.kind == SyntaxKind::Identifier && self.text(source) == word
    }
}

/// Tokenize declaration-file source into a flat token stream.
///
/// Comments (including triple-slash directives, which are extracted
/// separately by `dts_common::comments`) are skipped silently. The final
/// token is always `SyntaxKind::Eof` so callers can peek without bounds
/// checks.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    len: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            len: source.len(),
            tokens: Vec::with_capacity(source.len() / 4),
        }
    }

    fn run(mut self) -> Vec<Token> {
        loop {
            self.skip_trivia();
            if self.pos >= self.len {
                self.push(SyntaxKind::Eof, self.pos, self.pos);
                break;
            }
            self.scan_token();
        }
        self.tokens
    }

    fn push(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(
                u32::try_from(start).unwrap_or(u32::MAX),
                u32::try_from(end).unwrap_or(u32::MAX),
            ),
        });
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.bytes.get(self.pos) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    self.pos += 2;
                    while self.pos < self.len
                        && self.bytes[self.pos] != b'\n'
                        && self.bytes[self.pos] != b'\r'
                    {
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.pos += 2;
                    while self.pos + 1 < self.len
                        && !(self.bytes[self.pos] == b'*' && self.bytes[self.pos + 1] == b'/')
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.len);
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) {
        let start = self.pos;
        let ch = self.bytes[self.pos];

        match ch {
            b'{' => self.single(SyntaxKind::OpenBrace),
            b'}' => self.single(SyntaxKind::CloseBrace),
            b'(' => self.single(SyntaxKind::OpenParen),
            b')' => self.single(SyntaxKind::CloseParen),
            b'[' => self.single(SyntaxKind::OpenBracket),
            b']' => self.single(SyntaxKind::CloseBracket),
            b',' => self.single(SyntaxKind::Comma),
            b';' => self.single(SyntaxKind::Semicolon),
            b'@' => self.single(SyntaxKind::At),
            b'*' => self.single(SyntaxKind::Asterisk),
            b'+' => self.single(SyntaxKind::Plus),
            b'-' => self.single(SyntaxKind::Minus),
            b'|' => self.single(SyntaxKind::Bar),
            b'&' => self.single(SyntaxKind::Amp),
            b'<' => self.single(SyntaxKind::LessThan),
            b'>' => self.single(SyntaxKind::GreaterThan),
            b':' => self.single(SyntaxKind::Colon),
            b'=' => {
                if self.bytes.get(self.pos + 1) == Some(&b'>') {
                    self.pos += 2;
                    self.push(SyntaxKind::EqualsGreaterThan, start, self.pos);
                } else {
                    self.single(SyntaxKind::Equals);
                }
            }
            b'!' => self.single(SyntaxKind::Exclamation),
            b'?' => {
                if self.bytes.get(self.pos + 1) == Some(&b'.')
                    && !self.bytes.get(self.pos + 2).is_some_and(u8::is_ascii_digit)
                {
                    self.pos += 2;
                    self.push(SyntaxKind::QuestionDot, start, self.pos);
                } else {
                    self.single(SyntaxKind::Question);
                }
            }
            b'.' => {
                if self.bytes.get(self.pos + 1) == Some(&b'.')
                    && self.bytes.get(self.pos + 2) == Some(&b'.')
                {
                    self.pos += 3;
                    self.push(SyntaxKind::DotDotDot, start, self.pos);
                } else {
                    self.single(SyntaxKind::Dot);
                }
            }
            b'"' | b'\'' => self.scan_string(ch),
            b'`' => self.scan_template(),
            b'0'..=b'9' => self.scan_number(),
            _ if is_ident_start(ch) => self.scan_identifier(),
            _ => self.single(SyntaxKind::Unknown),
        }
    }

    fn single(&mut self, kind: SyntaxKind) {
        let start = self.pos;
        self.pos += 1;
        self.push(kind, start, self.pos);
    }

    fn scan_string(&mut self, quote: u8) {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.len {
            let b = self.bytes[self.pos];
            if b == b'\\' {
                self.pos += 2;
                continue;
            }
            if b == quote {
                self.pos += 1;
                break;
            }
            self.pos += 1;
        }
        self.push(SyntaxKind::StringLiteral, start, self.pos);
    }

    /// Template literals can embed `${ ... }` substitutions containing
    /// arbitrary nested braces; we track brace depth so an embedded `}`
    /// inside a substitution does not look like the end of the template.
    fn scan_template(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let mut brace_depth = 0usize;
        while self.pos < self.len {
            let b = self.bytes[self.pos];
            if b == b'\\' {
                self.pos += 2;
                continue;
            }
            if brace_depth == 0 && b == b'`' {
                self.pos += 1;
                break;
            }
            if b == b'$' && self.bytes.get(self.pos + 1) == Some(&b'{') {
                brace_depth += 1;
                self.pos += 2;
                continue;
            }
            if brace_depth > 0 {
                if b == b'{' {
                    brace_depth += 1;
                } else if b == b'}' {
                    brace_depth -= 1;
                }
            }
            self.pos += 1;
        }
        self.push(SyntaxKind::TemplateLiteral, start, self.pos);
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        while self.pos < self.len
            && (self.bytes[self.pos].is_ascii_alphanumeric()
                || self.bytes[self.pos] == b'.'
                || self.bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
        self.push(SyntaxKind::NumericLiteral, start, self.pos);
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        while self.pos < self.len && is_ident_part(self.bytes[self.pos]) {
            self.pos += 1;
        }
        self.push(SyntaxKind::Identifier, start, self.pos);
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}
