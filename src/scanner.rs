//! On-demand scanner over a borrowed source buffer.
//!
//! [`Scanner`] is a small `Copy` cursor. [`Scanner::peek`] scans on a copy,
//! and [`Scanner::checkpoint`]/[`Scanner::restore`] let the parser back up
//! after a speculative look at the input.

use crate::token::{BinaryOp, Span, Token, TokenKind};

/// Saved cursor state, see [`Scanner::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    line: usize,
    column: usize,
}

/// Stateful cursor producing one token per [`Scanner::get`] call.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'src> {
    src: &'src str,
    pos: usize,
    line: usize,
    column: usize,
    breakpoints: &'src [usize],
    /// Line of the last token returned by `get`.
    last_line: Option<usize>,
}

impl<'src> Scanner<'src> {
    #[must_use]
    pub const fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            line: 0,
            column: 0,
            breakpoints: &[],
            last_line: None,
        }
    }

    /// Report (at `debug` level) the first token [`Scanner::get`] returns
    /// on each of these one-based source lines.
    #[must_use]
    pub const fn with_breakpoints(mut self, lines: &'src [usize]) -> Self {
        self.breakpoints = lines;
        self
    }

    /// Consume and return the next token.
    pub fn get(&mut self) -> Token<'src> {
        let token = self.scan_token();
        tracing::trace!(%token, line = token.span.line, column = token.span.column, "scanned");
        if token.kind != TokenKind::End && self.last_line != Some(token.span.line) {
            self.last_line = Some(token.span.line);
            let line = token.span.line + 1;
            if self.breakpoints.contains(&line) {
                breakpoint_hit(line);
            }
        }
        token
    }

    /// Return the next token without advancing.
    #[must_use]
    pub fn peek(&self) -> Token<'src> {
        let mut ahead = *self;
        ahead.scan_token()
    }

    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub const fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Current cursor position (before any pending whitespace).
    #[must_use]
    pub const fn cursor_span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    /// Byte offset of the cursor into the source.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    fn scan_token(&mut self) -> Token<'src> {
        loop {
            self.skip_whitespace();
            let span = self.cursor_span();
            let Some(byte) = self.byte_at(0) else {
                return Self::token(TokenKind::End, span);
            };

            let (kind, len) = match byte {
                b'(' => (TokenKind::LParen, 1),
                b')' => (TokenKind::RParen, 1),
                b'[' => (TokenKind::LBracket, 1),
                b']' => (TokenKind::RBracket, 1),
                b'{' => (TokenKind::LBrace, 1),
                b'}' => (TokenKind::RBrace, 1),
                b';' => (TokenKind::Semicolon, 1),
                b',' => (TokenKind::Comma, 1),
                b'\'' => (TokenKind::SingleQuote, 1),
                b'"' => (TokenKind::DoubleQuote, 1),
                b'%' => (TokenKind::Op(BinaryOp::Mod), 1),
                b'^' => (TokenKind::Op(BinaryOp::Xor), 1),
                b'+' => (TokenKind::Op(BinaryOp::Plus), 1),
                b'=' => (TokenKind::Op(BinaryOp::Eq), 1),
                b'.' => (TokenKind::Op(BinaryOp::Dot), 1),
                b'!' => self.one_or_two(BinaryOp::Neg, b'=', BinaryOp::Neq),
                b'*' => self.one_or_two(BinaryOp::Mul, b'=', BinaryOp::MulEq),
                b'-' => self.one_or_two(BinaryOp::Minus, b'>', BinaryOp::Access),
                b'<' => self.one_or_two(BinaryOp::Less, b'=', BinaryOp::LessEq),
                b'>' => self.one_or_two(BinaryOp::Greater, b'=', BinaryOp::GreaterEq),
                b'&' => match self.byte_at(1) {
                    Some(b'&') => (TokenKind::Op(BinaryOp::LogicAnd), 2),
                    Some(b'=') => (TokenKind::Op(BinaryOp::AndEq), 2),
                    _ => (TokenKind::Op(BinaryOp::And), 1),
                },
                b'|' => match self.byte_at(1) {
                    Some(b'|') => (TokenKind::Op(BinaryOp::LogicOr), 2),
                    Some(b'=') => (TokenKind::Op(BinaryOp::OrEq), 2),
                    _ => (TokenKind::Op(BinaryOp::Or), 1),
                },
                b'/' => match self.byte_at(1) {
                    Some(b'=') => (TokenKind::Op(BinaryOp::DivEq), 2),
                    Some(b'/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    _ => (TokenKind::Op(BinaryOp::Div), 1),
                },
                b':' => match self.byte_at(1) {
                    Some(b':') => (TokenKind::Namespace, 2),
                    _ => (TokenKind::Colon, 1),
                },
                _ => return self.identifier(span),
            };

            self.pos += len;
            self.column += len;
            return Self::token(kind, span);
        }
    }

    const fn token(kind: TokenKind, span: Span) -> Token<'src> {
        Token {
            kind,
            text: "",
            span,
        }
    }

    fn one_or_two(&self, single: BinaryOp, second: u8, double: BinaryOp) -> (TokenKind, usize) {
        if self.byte_at(1) == Some(second) {
            (TokenKind::Op(double), 2)
        } else {
            (TokenKind::Op(single), 1)
        }
    }

    /// Any character without a fixed rule starts an identifier, so
    /// stray punctuation ends up as identifier text rather than an error.
    fn identifier(&mut self, span: Span) -> Token<'src> {
        let start = self.pos;
        // the cursor always sits on a char boundary
        let first_len = self.src[start..].chars().next().map_or(1, char::len_utf8);
        self.pos += first_len;
        self.column += 1;

        while self.byte_at(0).is_some_and(is_identifier_byte) {
            self.pos += 1;
            self.column += 1;
        }

        Token {
            kind: TokenKind::Ident,
            text: &self.src[start..self.pos],
            span,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.byte_at(0) {
            if !is_whitespace_byte(byte) {
                return;
            }
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    /// `//` comments run to the end of the line; the newline is left for
    /// whitespace skipping so line counting stays in one place.
    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.byte_at(0) {
            if byte == b'\n' {
                return;
            }
            self.pos += 1;
            if is_char_start(byte) {
                self.column += 1;
            }
        }
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }
}

/// Yields tokens up to, but not including, [`TokenKind::End`].
impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get();
        (token.kind != TokenKind::End).then_some(token)
    }
}

/// Scan the whole input eagerly, excluding the final [`TokenKind::End`].
#[must_use]
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    Scanner::new(src).collect()
}

/// ASCII letters, digits, and the contiguous `_`..=`` ` `` range.
#[must_use]
pub const fn is_identifier_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'_'..=b'`' | b'a'..=b'z' | b'A'..=b'Z')
}

/// ASCII whitespace plus vertical tab.
const fn is_whitespace_byte(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\x0B'
}

const fn is_char_start(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

/// Stable symbol to break on when a configured source line is reached.
#[inline(never)]
fn breakpoint_hit(line: usize) {
    tracing::debug!(line, "breakpoint line reached");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Scanner::new(src).map(|t| t.kind).collect()
    }

    #[test]
    fn two_char_operators_win_over_prefix() {
        assert_eq!(kinds("!="), vec![TokenKind::Op(BinaryOp::Neq)]);
        assert_eq!(
            kinds("! ="),
            vec![TokenKind::Op(BinaryOp::Neg), TokenKind::Op(BinaryOp::Eq)]
        );
        assert_eq!(kinds("->"), vec![TokenKind::Op(BinaryOp::Access)]);
        assert_eq!(kinds("::"), vec![TokenKind::Namespace]);
        assert_eq!(
            kinds("|=||"),
            vec![
                TokenKind::Op(BinaryOp::OrEq),
                TokenKind::Op(BinaryOp::LogicOr)
            ]
        );
    }

    #[test]
    fn identifier_stops_at_punctuation() {
        let mut scanner = Scanner::new("abc123;");
        let ident = scanner.get();
        assert_eq!(ident.kind, TokenKind::Ident);
        assert_eq!(ident.text, "abc123");
        assert_eq!(scanner.get().kind, TokenKind::Semicolon);
        assert_eq!(scanner.get().kind, TokenKind::End);
    }

    #[test]
    fn comment_skipped_to_end_of_line() {
        let mut scanner = Scanner::new("a // b c\nd");
        assert_eq!(scanner.get().text, "a");
        let d = scanner.get();
        assert_eq!(d.text, "d");
        assert_eq!(d.span, Span::new(1, 0));
    }

    #[test]
    fn peek_does_not_advance() {
        let mut scanner = Scanner::new("x y");
        assert_eq!(scanner.peek(), scanner.peek());
        assert_eq!(scanner.peek().text, "x");
        assert_eq!(scanner.get().text, "x");
        assert_eq!(scanner.get().text, "y");
    }

    #[test]
    fn restore_rewinds_position() {
        let mut scanner = Scanner::new("a\nb c");
        let saved = scanner.checkpoint();
        scanner.get();
        scanner.get();
        assert_eq!(scanner.cursor_span(), Span::new(1, 1));
        scanner.restore(saved);
        assert_eq!(scanner.cursor_span(), Span::new(0, 0));
        assert_eq!(scanner.get().text, "a");
    }

    #[test]
    fn vertical_tab_is_whitespace() {
        let mut scanner = Scanner::new("a\x0Bb");
        assert_eq!(scanner.get().text, "a");
        let b = scanner.get();
        assert_eq!(b.text, "b");
        assert_eq!(b.span, Span::new(0, 2));
    }

    #[test]
    fn non_ascii_start_is_one_identifier() {
        let mut scanner = Scanner::new("ébc;");
        let tok = scanner.get();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.text, "ébc");
        assert_eq!(scanner.get().span, Span::new(0, 3));
    }
}
