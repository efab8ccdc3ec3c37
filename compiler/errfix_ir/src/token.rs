//! Go tokens.
//!
//! Defined here rather than in the lexer so the parser can consume a
//! [`TokenList`] without depending on the scanner.

use std::fmt;

use crate::{Name, Span};

/// Token kinds. Literal tokens keep their raw source text interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident(Name),
    Int(Name),
    Float(Name),
    Imag(Name),
    Char(Name),
    String(Name),

    // Keywords
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,

    // Operators
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    LogAnd,
    LogOr,
    Arrow,
    Inc,
    Dec,
    Eql,
    Lss,
    Gtr,
    Assign,
    Not,
    Neq,
    Leq,
    Geq,
    Define,
    Ellipsis,
    Tilde,

    // Delimiters
    LParen,
    LBrack,
    LBrace,
    Comma,
    Period,
    RParen,
    RBrack,
    RBrace,
    Semicolon,
    Colon,

    Eof,
}

impl TokenKind {
    /// Keyword for an identifier-shaped word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        Some(match word {
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "chan" => TokenKind::Chan,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "default" => TokenKind::Default,
            "defer" => TokenKind::Defer,
            "else" => TokenKind::Else,
            "fallthrough" => TokenKind::Fallthrough,
            "for" => TokenKind::For,
            "func" => TokenKind::Func,
            "go" => TokenKind::Go,
            "goto" => TokenKind::Goto,
            "if" => TokenKind::If,
            "import" => TokenKind::Import,
            "interface" => TokenKind::Interface,
            "map" => TokenKind::Map,
            "package" => TokenKind::Package,
            "range" => TokenKind::Range,
            "return" => TokenKind::Return,
            "select" => TokenKind::Select,
            "struct" => TokenKind::Struct,
            "switch" => TokenKind::Switch,
            "type" => TokenKind::Type,
            "var" => TokenKind::Var,
            _ => return None,
        })
    }

    /// Whether a newline after this token ends the statement.
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Imag(_)
                | TokenKind::Char(_)
                | TokenKind::String(_)
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Fallthrough
                | TokenKind::Return
                | TokenKind::Inc
                | TokenKind::Dec
                | TokenKind::RParen
                | TokenKind::RBrack
                | TokenKind::RBrace
        )
    }

    /// Fixed spelling of punctuation and keywords; `None` for tokens with a
    /// payload and for EOF.
    pub fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Imag(_)
            | TokenKind::Char(_)
            | TokenKind::String(_)
            | TokenKind::Eof => return None,
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Chan => "chan",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Default => "default",
            TokenKind::Defer => "defer",
            TokenKind::Else => "else",
            TokenKind::Fallthrough => "fallthrough",
            TokenKind::For => "for",
            TokenKind::Func => "func",
            TokenKind::Go => "go",
            TokenKind::Goto => "goto",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::Interface => "interface",
            TokenKind::Map => "map",
            TokenKind::Package => "package",
            TokenKind::Range => "range",
            TokenKind::Return => "return",
            TokenKind::Select => "select",
            TokenKind::Struct => "struct",
            TokenKind::Switch => "switch",
            TokenKind::Type => "type",
            TokenKind::Var => "var",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Quo => "/",
            TokenKind::Rem => "%",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Xor => "^",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::AndNot => "&^",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::QuoAssign => "/=",
            TokenKind::RemAssign => "%=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            TokenKind::ShlAssign => "<<=",
            TokenKind::ShrAssign => ">>=",
            TokenKind::AndNotAssign => "&^=",
            TokenKind::LogAnd => "&&",
            TokenKind::LogOr => "||",
            TokenKind::Arrow => "<-",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::Eql => "==",
            TokenKind::Lss => "<",
            TokenKind::Gtr => ">",
            TokenKind::Assign => "=",
            TokenKind::Not => "!",
            TokenKind::Neq => "!=",
            TokenKind::Leq => "<=",
            TokenKind::Geq => ">=",
            TokenKind::Define => ":=",
            TokenKind::Ellipsis => "...",
            TokenKind::Tilde => "~",
            TokenKind::LParen => "(",
            TokenKind::LBrack => "[",
            TokenKind::LBrace => "{",
            TokenKind::Comma => ",",
            TokenKind::Period => ".",
            TokenKind::RParen => ")",
            TokenKind::RBrack => "]",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
        })
    }
}

/// Per-token layout flags.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// A newline (or a comment containing one) preceded this token.
    pub const NEWLINE_BEFORE: u8 = 1 << 0;
    /// Semicolon inserted at a line end or EOF rather than written.
    pub const IMPLICIT: u8 = 1 << 1;

    pub const EMPTY: Self = TokenFlags(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TokenFlags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub const fn has_newline_before(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }

    #[inline]
    pub const fn is_implicit(self) -> bool {
        self.contains(Self::IMPLICIT)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Token { kind, span, flags }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(text) => f.write_str(text),
            None => match self {
                TokenKind::Ident(_) => f.write_str("identifier"),
                TokenKind::Eof => f.write_str("end of file"),
                _ => f.write_str("literal"),
            },
        }
    }
}

/// Tokens of one file; always ends with [`TokenKind::Eof`].
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kinds only, for tests.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("func"), Some(TokenKind::Func));
        assert_eq!(TokenKind::keyword("fallthrough"), Some(TokenKind::Fallthrough));
        assert_eq!(TokenKind::keyword("err"), None);
    }

    #[test]
    fn test_statement_enders() {
        assert!(TokenKind::Return.ends_statement());
        assert!(TokenKind::RBrace.ends_statement());
        assert!(!TokenKind::Comma.ends_statement());
        assert!(!TokenKind::LBrace.ends_statement());
    }

    #[test]
    fn test_flags() {
        let mut flags = TokenFlags::EMPTY;
        flags.set(TokenFlags::IMPLICIT);
        assert!(flags.is_implicit());
        assert!(!flags.has_newline_before());
    }
}
