//! Flat lexer feeding the structural re-assembly pass.
//!
//! Tokens are deliberately forgiving: anything quoted becomes `Str` with its
//! escapes decoded, numeric-looking segments become `Num` only when they
//! would survive a strict parse, and everything else is a `Word` for the
//! assembler to quote or coerce.

use crate::classify::{is_double_quote_like, is_single_quote_like, is_ws};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    /// Quoted literal with escapes already decoded.
    Str(String),
    /// Numeric segment, kept verbatim.
    Num(String),
    /// Bare word: keyword candidates and unquoted strings.
    Word(String),
}

pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    Lexer {
        chars: input.chars().collect(),
        pos: 0,
    }
    .run()
}

/// Structural characters, whitespace and the double quote bound bare words
/// and numbers. Single quotes do not: apostrophes in prose are content.
#[inline]
fn is_boundary(c: char) -> bool {
    is_ws(c) || matches!(c, ',' | '{' | '}' | '[' | ']' | ':' | '"')
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(c) = self.current() {
            if is_ws(c) {
                self.pos += 1;
                continue;
            }
            let tok = match c {
                '{' => self.single(Token::LBrace),
                '}' => self.single(Token::RBrace),
                '[' => self.single(Token::LBracket),
                ']' => self.single(Token::RBracket),
                ':' => self.single(Token::Colon),
                ',' => self.single(Token::Comma),
                c if is_double_quote_like(c) || is_single_quote_like(c) => self.string(c),
                c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
                _ => self.word(),
            };
            tokens.push(tok);
        }
        tokens
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn single(&mut self, tok: Token) -> Token {
        self.pos += 1;
        tok
    }

    /// Decode a quoted literal. Smart quotes pair with their own kind or the
    /// ASCII twin; an unterminated literal runs to the line break so a missing
    /// end quote cannot swallow the rest of the document.
    fn string(&mut self, open: char) -> Token {
        let close = match open {
            '\u{201C}' => '\u{201D}',
            '\u{2018}' => '\u{2019}',
            other => other,
        };
        self.pos += 1;
        let mut buf = String::new();
        while let Some(c) = self.current() {
            if c == close || c == open {
                self.pos += 1;
                return Token::Str(buf);
            }
            if c == '\\' {
                self.pos += 1;
                self.escape(&mut buf);
                continue;
            }
            if matches!(c, '\n' | '\r') {
                return Token::Str(buf);
            }
            buf.push(c);
            self.pos += 1;
        }
        Token::Str(buf)
    }

    fn escape(&mut self, buf: &mut String) {
        let Some(c) = self.current() else {
            return;
        };
        self.pos += 1;
        match c {
            '"' => buf.push('"'),
            '\'' => buf.push('\''),
            '\\' => buf.push('\\'),
            '/' => buf.push('/'),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'b' => buf.push('\u{0008}'),
            'f' => buf.push('\u{000C}'),
            'u' => self.unicode_escape(buf),
            other => buf.push(other),
        }
    }

    fn unicode_escape(&mut self, buf: &mut String) {
        let Some(hi) = self.hex4() else {
            return;
        };
        if (0xD800..=0xDBFF).contains(&hi) {
            // high surrogate: try to pair it with a following \uXXXX
            if self.current() == Some('\\') && self.peek(1) == Some('u') {
                let save = self.pos;
                self.pos += 2;
                if let Some(lo) = self.hex4() {
                    if (0xDC00..=0xDFFF).contains(&lo) {
                        let code = 0x1_0000 + (((hi as u32 - 0xD800) << 10) | (lo as u32 - 0xDC00));
                        if let Some(ch) = char::from_u32(code) {
                            buf.push(ch);
                        }
                        return;
                    }
                }
                self.pos = save;
            }
            // isolated surrogate: drop it
        } else if !(0xDC00..=0xDFFF).contains(&hi) {
            if let Some(ch) = char::from_u32(hi as u32) {
                buf.push(ch);
            }
        }
    }

    fn hex4(&mut self) -> Option<u16> {
        let mut v: u16 = 0;
        for k in 0..4 {
            let d = self.peek(k)?.to_digit(16)? as u16;
            v = (v << 4) | d;
        }
        self.pos += 4;
        Some(v)
    }

    fn number(&mut self) -> Token {
        let seg = self.segment();
        if numeric_shape_ok(&seg) {
            Token::Num(seg)
        } else {
            Token::Word(seg)
        }
    }

    fn word(&mut self) -> Token {
        Token::Word(self.segment())
    }

    fn segment(&mut self) -> String {
        let start = self.pos;
        self.pos += 1;
        while let Some(c) = self.current() {
            if is_boundary(c) {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }
}

/// Accept only segments a strict parser could take as a number after the
/// assembler's cosmetic fixes. Dates (2024-05-13), fractions (1/3) and other
/// number-adjacent text are demoted to words so they end up quoted.
fn numeric_shape_ok(seg: &str) -> bool {
    if !seg.is_ascii() {
        return false;
    }
    let bytes = seg.as_bytes();
    if bytes
        .iter()
        .any(|&b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return false;
    }
    if bytes.contains(&b'/') {
        return false;
    }
    if bytes.iter().filter(|&&b| b == b'.').count() > 1 {
        return false;
    }
    for (idx, &b) in bytes.iter().enumerate() {
        if (b == b'-' || b == b'+') && idx > 0 && !matches!(bytes[idx - 1], b'e' | b'E') {
            return false;
        }
    }
    match seg.parse::<f64>() {
        Ok(v) => v.is_finite(),
        Err(_) => false,
    }
}
