//! Go scanner.
//!
//! Produces a [`TokenList`] with Go's automatic semicolons already inserted
//! (flagged [`TokenFlags::IMPLICIT`]) and collects comments into a separate
//! [`CommentList`] so the printer can put them back.
//!
//! Literal tokens keep their exact source text; nothing is unescaped or
//! evaluated because the rewrite never needs literal values.

mod cursor;
mod lex_error;

pub use lex_error::{LexError, LexErrorKind};

use cursor::Cursor;
use errfix_ir::{
    Comment, CommentKind, CommentList, Name, Span, StringInterner, Token, TokenFlags,
    TokenKind, TokenList,
};

/// Everything the scanner produces for one file.
#[derive(Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub comments: CommentList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan a whole file.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut scanner = Scanner::new(source, interner);
    scanner.run();
    LexOutput {
        tokens: scanner.tokens,
        comments: scanner.comments,
        errors: scanner.errors,
    }
}

fn span(start: usize, end: usize) -> Span {
    // Files larger than 4 GiB are rejected by the loader before lexing.
    Span::from_range(start..end).unwrap_or(Span::DUMMY)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    tokens: TokenList,
    comments: CommentList,
    errors: Vec<LexError>,
    /// Kind of the last real (non-comment) token pushed.
    last: Option<TokenKind>,
    newline_before: bool,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        let mut cursor = Cursor::new(source);
        if source.starts_with('\u{feff}') {
            cursor.advance_n('\u{feff}'.len_utf8());
        }
        Scanner {
            source,
            cursor,
            interner,
            tokens: TokenList::with_capacity(source.len() / 4),
            comments: CommentList::new(),
            errors: Vec::new(),
            last: None,
            newline_before: false,
        }
    }

    fn run(&mut self) {
        loop {
            self.cursor.eat_horizontal_space();
            let start = self.cursor.pos();

            if self.cursor.is_eof() {
                self.insert_semicolon(start);
                self.push(TokenKind::Eof, start, start);
                return;
            }

            match (self.cursor.current(), self.cursor.peek()) {
                (b'\n', _) => {
                    self.insert_semicolon(start);
                    self.cursor.advance();
                    self.newline_before = true;
                }
                (b'/', b'/') => self.line_comment(start),
                (b'/', b'*') => self.block_comment(start),
                _ => self.token(start),
            }
        }
    }

    /// Insert an automatic semicolon if the previous token ends a statement.
    fn insert_semicolon(&mut self, at: usize) {
        if self.last.is_some_and(TokenKind::ends_statement) {
            let mut flags = TokenFlags::from_bits(TokenFlags::IMPLICIT);
            if self.newline_before {
                flags.set(TokenFlags::NEWLINE_BEFORE);
            }
            self.tokens
                .push(Token::new(TokenKind::Semicolon, span(at, at), flags));
            self.last = Some(TokenKind::Semicolon);
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let mut flags = TokenFlags::EMPTY;
        if self.newline_before {
            flags.set(TokenFlags::NEWLINE_BEFORE);
        }
        self.newline_before = false;
        self.tokens.push(Token::new(kind, span(start, end), flags));
        self.last = Some(kind);
    }

    fn push_comment(&mut self, kind: CommentKind, start: usize, end: usize) {
        let text = self.source.get(start..end).unwrap_or_default();
        self.comments.push(Comment {
            kind,
            text: text.to_owned(),
            span: span(start, end),
        });
    }

    fn error(&mut self, kind: LexErrorKind, start: usize, end: usize) {
        self.errors.push(LexError::new(span(start, end), kind));
    }

    fn text(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or_default()
    }

    // Comments

    fn line_comment(&mut self, start: usize) {
        self.cursor.skip_to_newline();
        let mut end = self.cursor.pos();
        // `\r\n` line endings: the `\r` is not part of the comment.
        if end > start && self.source.as_bytes().get(end - 1) == Some(&b'\r') {
            end -= 1;
        }
        self.push_comment(CommentKind::Line, start, end);
    }

    fn block_comment(&mut self, start: usize) {
        self.cursor.advance_n(2);
        let end = match self.cursor.find_seq(b"*/") {
            Some(close) => close + 2,
            None => {
                self.error(LexErrorKind::UnterminatedComment, start, start + 2);
                self.source.len()
            }
        };
        self.cursor.seek(end);
        // A block comment spanning lines acts like a newline.
        if self.cursor.has_newline(start, end) {
            self.insert_semicolon(start);
            self.newline_before = true;
        }
        self.push_comment(CommentKind::Block, start, end);
    }

    // Tokens

    fn token(&mut self, start: usize) {
        let c = self.cursor.current();
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(start),
            b'"' => self.string(start),
            b'`' => self.raw_string(start),
            b'\'' => self.rune(start),
            0x80..=0xFF => self.unicode(start),
            _ => self.operator(start),
        }
    }

    fn identifier(&mut self, start: usize) {
        loop {
            self.cursor.eat_while(is_ident_byte);
            // Unicode letters and digits continue an identifier.
            match self.char_at_cursor() {
                Some(ch) if !ch.is_ascii() && ch.is_alphanumeric() => {
                    self.cursor.advance_n(ch.len_utf8());
                }
                _ => break,
            }
        }
        let end = self.cursor.pos();
        let word = self.text(start, end);
        let kind = TokenKind::keyword(word)
            .unwrap_or_else(|| TokenKind::Ident(self.interner.intern(word)));
        self.push(kind, start, end);
    }

    fn char_at_cursor(&self) -> Option<char> {
        self.source.get(self.cursor.pos()..)?.chars().next()
    }

    fn unicode(&mut self, start: usize) {
        match self.char_at_cursor() {
            Some(ch) if ch.is_alphabetic() => self.identifier(start),
            Some(ch) => {
                self.cursor.advance_n(ch.len_utf8());
                self.error(LexErrorKind::InvalidCharacter(ch), start, self.cursor.pos());
            }
            None => self.cursor.advance(),
        }
    }

    fn number(&mut self, start: usize) {
        let mut is_float = false;
        let first = self.cursor.current();
        let prefix = self.cursor.peek().to_ascii_lowercase();

        if first == b'0' && matches!(prefix, b'x' | b'b' | b'o') {
            self.cursor.advance_n(2);
            let digits_start = self.cursor.pos();
            let hex = prefix == b'x';
            let is_digit = |b: u8| {
                b == b'_' || (hex && b.is_ascii_hexdigit()) || (!hex && b.is_ascii_digit())
            };
            self.cursor.eat_while(is_digit);
            let mut has_digits = self.cursor.pos() > digits_start;
            if hex && self.cursor.current() == b'.' {
                is_float = true;
                self.cursor.advance();
                let frac_start = self.cursor.pos();
                self.cursor.eat_while(|b| b == b'_' || b.is_ascii_hexdigit());
                has_digits |= self.cursor.pos() > frac_start;
            }
            if hex && matches!(self.cursor.current(), b'p' | b'P') {
                is_float = true;
                self.exponent(start);
            }
            if !has_digits {
                self.error(LexErrorKind::InvalidNumber, start, self.cursor.pos());
            }
        } else {
            self.cursor.eat_while(|b| b == b'_' || b.is_ascii_digit());
            if self.cursor.current() == b'.' {
                is_float = true;
                self.cursor.advance();
                self.cursor.eat_while(|b| b == b'_' || b.is_ascii_digit());
            }
            if matches!(self.cursor.current(), b'e' | b'E') {
                is_float = true;
                self.exponent(start);
            }
        }

        let kind_of: fn(Name) -> TokenKind = if self.cursor.current() == b'i' {
            self.cursor.advance();
            TokenKind::Imag
        } else if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        let end = self.cursor.pos();
        let raw = self.interner.intern(self.text(start, end));
        self.push(kind_of(raw), start, end);
    }

    /// `e`/`p` exponent with optional sign; reports a missing value.
    fn exponent(&mut self, start: usize) {
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(|b| b == b'_' || b.is_ascii_digit());
        if self.cursor.pos() == digits_start {
            self.error(LexErrorKind::InvalidNumber, start, self.cursor.pos());
        }
    }

    /// Scan a quoted literal up to `quote`, honouring backslash escapes.
    /// Returns `false` if a newline or EOF came first.
    fn quoted(&mut self, quote: u8) -> bool {
        self.cursor.advance();
        loop {
            let Some(at) = self.cursor.find3(quote, b'\\', b'\n') else {
                self.cursor.seek(self.source.len());
                return false;
            };
            self.cursor.seek(at);
            match self.cursor.current() {
                b'\\' => self.cursor.advance_n(2),
                b'\n' => return false,
                _ => {
                    self.cursor.advance();
                    return true;
                }
            }
        }
    }

    fn string(&mut self, start: usize) {
        if !self.quoted(b'"') {
            self.error(LexErrorKind::UnterminatedString, start, self.cursor.pos());
        }
        let end = self.cursor.pos();
        let raw = self.interner.intern(self.text(start, end));
        self.push(TokenKind::String(raw), start, end);
    }

    fn rune(&mut self, start: usize) {
        if !self.quoted(b'\'') {
            self.error(LexErrorKind::UnterminatedRune, start, self.cursor.pos());
        }
        let end = self.cursor.pos();
        let raw = self.interner.intern(self.text(start, end));
        self.push(TokenKind::Char(raw), start, end);
    }

    fn raw_string(&mut self, start: usize) {
        self.cursor.advance();
        let end = match self.cursor.find_byte(b'`') {
            Some(close) => close + 1,
            None => {
                self.error(LexErrorKind::UnterminatedRawString, start, start + 1);
                self.source.len()
            }
        };
        self.cursor.seek(end);
        let raw = self.interner.intern(self.text(start, end));
        self.push(TokenKind::String(raw), start, end);
    }

    fn operator(&mut self, start: usize) {
        let c0 = self.cursor.current();
        let c1 = self.cursor.peek();
        let c2 = self.cursor.peek2();

        let (kind, len) = match (c0, c1, c2) {
            (b'<', b'<', b'=') => (TokenKind::ShlAssign, 3),
            (b'>', b'>', b'=') => (TokenKind::ShrAssign, 3),
            (b'&', b'^', b'=') => (TokenKind::AndNotAssign, 3),
            (b'.', b'.', b'.') => (TokenKind::Ellipsis, 3),
            (b'+', b'=', _) => (TokenKind::AddAssign, 2),
            (b'-', b'=', _) => (TokenKind::SubAssign, 2),
            (b'*', b'=', _) => (TokenKind::MulAssign, 2),
            (b'/', b'=', _) => (TokenKind::QuoAssign, 2),
            (b'%', b'=', _) => (TokenKind::RemAssign, 2),
            (b'&', b'=', _) => (TokenKind::AndAssign, 2),
            (b'|', b'=', _) => (TokenKind::OrAssign, 2),
            (b'^', b'=', _) => (TokenKind::XorAssign, 2),
            (b'<', b'<', _) => (TokenKind::Shl, 2),
            (b'>', b'>', _) => (TokenKind::Shr, 2),
            (b'&', b'^', _) => (TokenKind::AndNot, 2),
            (b'&', b'&', _) => (TokenKind::LogAnd, 2),
            (b'|', b'|', _) => (TokenKind::LogOr, 2),
            (b'<', b'-', _) => (TokenKind::Arrow, 2),
            (b'+', b'+', _) => (TokenKind::Inc, 2),
            (b'-', b'-', _) => (TokenKind::Dec, 2),
            (b'=', b'=', _) => (TokenKind::Eql, 2),
            (b'!', b'=', _) => (TokenKind::Neq, 2),
            (b'<', b'=', _) => (TokenKind::Leq, 2),
            (b'>', b'=', _) => (TokenKind::Geq, 2),
            (b':', b'=', _) => (TokenKind::Define, 2),
            (b'+', _, _) => (TokenKind::Add, 1),
            (b'-', _, _) => (TokenKind::Sub, 1),
            (b'*', _, _) => (TokenKind::Mul, 1),
            (b'/', _, _) => (TokenKind::Quo, 1),
            (b'%', _, _) => (TokenKind::Rem, 1),
            (b'&', _, _) => (TokenKind::And, 1),
            (b'|', _, _) => (TokenKind::Or, 1),
            (b'^', _, _) => (TokenKind::Xor, 1),
            (b'<', _, _) => (TokenKind::Lss, 1),
            (b'>', _, _) => (TokenKind::Gtr, 1),
            (b'=', _, _) => (TokenKind::Assign, 1),
            (b'!', _, _) => (TokenKind::Not, 1),
            (b'~', _, _) => (TokenKind::Tilde, 1),
            (b'(', _, _) => (TokenKind::LParen, 1),
            (b'[', _, _) => (TokenKind::LBrack, 1),
            (b'{', _, _) => (TokenKind::LBrace, 1),
            (b',', _, _) => (TokenKind::Comma, 1),
            (b'.', _, _) => (TokenKind::Period, 1),
            (b')', _, _) => (TokenKind::RParen, 1),
            (b']', _, _) => (TokenKind::RBrack, 1),
            (b'}', _, _) => (TokenKind::RBrace, 1),
            (b';', _, _) => (TokenKind::Semicolon, 1),
            (b':', _, _) => (TokenKind::Colon, 1),
            _ => {
                self.cursor.advance();
                self.error(
                    LexErrorKind::InvalidCharacter(char::from(c0)),
                    start,
                    start + 1,
                );
                return;
            }
        };
        self.cursor.advance_n(len);
        self.push(kind, start, start + len);
    }
}
