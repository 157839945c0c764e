//! Logos-based lexer for one line of Pawn code
//!
//! Comments are already blanked out by the line scanner, so the lexer only
//! sees code. Whitespace is skipped; unknown characters become
//! [`TokenKind::Error`] tokens and are otherwise ignored by the parser.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `#include`, `# define`, ...
    Directive,
    /// Identifier, possibly `@`-prefixed
    Ident,
    Number,
    String,
    Char,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    Backslash,
    /// Any run of operator characters (`=`, `&`, `<`, `+=`, ...)
    Operator,
    Error,
}

/// A token with its kind, text, and byte range within the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl Token<'_> {
    pub fn start(&self) -> usize {
        self.range.start().into()
    }

    pub fn end(&self) -> usize {
        self.range.end().into()
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, range })
    }
}

/// Tokenize a whole line into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum LogosToken {
    #[regex(r"#[ \t]*[A-Za-z_]+")]
    Directive,

    // Same classes as `syntax::is_identifier_start` / `is_identifier_char`
    #[regex(r"[\p{XID_Start}_@][\p{XID_Continue}@]*")]
    Ident,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    // Pawn escapes with `^` (AMX Mod X) or `\`; an unterminated literal runs
    // to the end of the line.
    #[regex(r#""([^"\\^]|[\\^].)*"?"#)]
    String,

    #[regex(r"'([^'\\^]|[\\^].)*'?")]
    Char,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("\\")]
    Backslash,

    #[regex(r"[-+*/%<>!|^~?=&]+")]
    Operator,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Directive => TokenKind::Directive,
            Ident => TokenKind::Ident,
            Number => TokenKind::Number,
            String => TokenKind::String,
            Char => TokenKind::Char,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            Comma => TokenKind::Comma,
            Semicolon => TokenKind::Semicolon,
            Colon => TokenKind::Colon,
            Dot => TokenKind::Dot,
            Ellipsis => TokenKind::Ellipsis,
            Backslash => TokenKind::Backslash,
            Operator => TokenKind::Operator,
        }
    }
}
