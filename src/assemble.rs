//! Structural re-assembly: turn a forgiving token stream back into strict
//! JSON text.
//!
//! The pass is a single walk over the tokens with an explicit bracket stack,
//! no recursion. Commas are deferred: one is scheduled when a separator is
//! due and only written once the next value arrives, which erases trailing
//! and duplicated commas without ever looking back at the output.

use std::fmt::Write as _;

use crate::classify::is_safe_plain_number;
use crate::options::Options;
use crate::repair::{RepairLog, RepairPass};
use crate::token::Token;

/// Re-assemble `tokens` into compact JSON text. Returns None when the stream
/// has no object or array structure and more than one value token: that is
/// prose, not JSON, and inventing brackets around it would not help.
pub(crate) fn assemble(tokens: &[Token], opts: &Options, log: &mut RepairLog) -> Option<String> {
    let structured = tokens
        .iter()
        .any(|t| matches!(t, Token::LBrace | Token::LBracket));
    if !structured {
        match tokens {
            [Token::Str(_) | Token::Num(_) | Token::Word(_)] => {}
            _ => return None,
        }
    }
    let mut asm = Assembler {
        tokens,
        pos: 0,
        out: String::with_capacity(tokens.len() * 8),
        stack: Vec::new(),
        need: Need::Value,
        pending_comma: false,
        opts,
        log,
    };
    while asm.pos < asm.tokens.len() {
        asm.step();
    }
    asm.finish();
    Some(asm.out)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

/// What the grammar expects at the current position.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Need {
    Value,
    Key,
    Colon,
    Sep,
}

struct Assembler<'a> {
    tokens: &'a [Token],
    pos: usize,
    out: String,
    stack: Vec<Frame>,
    need: Need,
    pending_comma: bool,
    opts: &'a Options,
    log: &'a mut RepairLog,
}

impl Assembler<'_> {
    fn step(&mut self) {
        let tok = self.tokens[self.pos].clone();

        // a due separator becomes a pending comma when the next token starts
        // another value or member instead of closing the container
        if self.need == Need::Sep
            && !matches!(tok, Token::Comma | Token::RBrace | Token::RBracket)
        {
            if self.stack.is_empty() {
                self.out.push(' ');
                self.log
                    .note(RepairPass::Structural, "extra root value", String::new());
            } else {
                self.pending_comma = true;
                self.log.note(
                    RepairPass::Structural,
                    "inserted missing comma",
                    String::new(),
                );
            }
            self.need = self.member_start();
        }

        match tok {
            Token::LBrace => {
                if self.enter_value("{") {
                    self.out.push('{');
                    self.stack.push(Frame::Object);
                    self.need = Need::Key;
                }
                self.pos += 1;
            }
            Token::LBracket => {
                if self.enter_value("[") {
                    self.out.push('[');
                    self.stack.push(Frame::Array);
                    self.need = Need::Value;
                }
                self.pos += 1;
            }
            Token::RBrace => {
                if matches!(self.stack.last(), Some(Frame::Object)) {
                    self.pending_comma = false;
                    match self.need {
                        Need::Colon => {
                            self.out.push_str(":null");
                            self.log.note(
                                RepairPass::Structural,
                                "inserted null for missing value",
                                String::new(),
                            );
                        }
                        Need::Value => {
                            self.out.push_str("null");
                            self.log.note(
                                RepairPass::Structural,
                                "inserted null for missing value",
                                String::new(),
                            );
                        }
                        _ => {}
                    }
                    self.stack.pop();
                    self.out.push('}');
                    self.need = Need::Sep;
                } else {
                    self.log.note(
                        RepairPass::Structural,
                        "dropped stray closer",
                        "}".to_string(),
                    );
                }
                self.pos += 1;
            }
            Token::RBracket => {
                if matches!(self.stack.last(), Some(Frame::Array)) {
                    self.pending_comma = false;
                    self.stack.pop();
                    self.out.push(']');
                    self.need = Need::Sep;
                } else {
                    self.log.note(
                        RepairPass::Structural,
                        "dropped stray closer",
                        "]".to_string(),
                    );
                }
                self.pos += 1;
            }
            Token::Colon => {
                match self.need {
                    Need::Colon => {
                        self.out.push(':');
                        self.need = Need::Value;
                    }
                    Need::Key => {
                        // a colon with no key ahead of it
                        self.flush_comma();
                        self.out.push_str("\"\":");
                        self.log.note(
                            RepairPass::Structural,
                            "inserted empty key",
                            String::new(),
                        );
                        self.need = Need::Value;
                    }
                    _ => {
                        self.log.note(
                            RepairPass::Structural,
                            "dropped stray colon",
                            String::new(),
                        );
                    }
                }
                self.pos += 1;
            }
            Token::Comma => {
                match self.need {
                    Need::Sep => {
                        self.pending_comma = true;
                        self.need = self.member_start();
                    }
                    Need::Colon => {
                        // `{a, b: 1}`: close the dangling member first, then
                        // let the comma schedule the separator
                        self.out.push_str(":null");
                        self.log.note(
                            RepairPass::Structural,
                            "inserted null for missing value",
                            String::new(),
                        );
                        self.need = Need::Sep;
                        return; // reprocess this comma
                    }
                    // `{"a":, ...}`: the member's value slot is empty
                    Need::Value if matches!(self.stack.last(), Some(Frame::Object)) => {
                        self.out.push_str("null");
                        self.log.note(
                            RepairPass::Structural,
                            "inserted null for missing value",
                            String::new(),
                        );
                        self.need = Need::Sep;
                        return; // reprocess this comma
                    }
                    _ => {
                        self.log.note(
                            RepairPass::Structural,
                            "dropped redundant comma",
                            String::new(),
                        );
                    }
                }
                self.pos += 1;
            }
            Token::Str(s) => {
                if self.need == Need::Key {
                    self.flush_comma();
                    write_json_string(&mut self.out, &s);
                    self.need = Need::Colon;
                } else if self.enter_value("string") {
                    self.emit_string_value(&s);
                    self.need = Need::Sep;
                }
                self.pos += 1;
            }
            Token::Num(n) => {
                if self.need == Need::Key {
                    self.flush_comma();
                    let key = self.take_key_run(&n);
                    write_json_string(&mut self.out, &key);
                    self.log
                        .note(RepairPass::Structural, "quoted bare key", key);
                    self.need = Need::Colon;
                } else if self.enter_value("number") {
                    self.emit_number(&n);
                    self.need = Need::Sep;
                }
                self.pos += 1;
            }
            Token::Word(w) => {
                if self.need == Need::Key {
                    self.flush_comma();
                    let key = self.take_key_run(&w);
                    write_json_string(&mut self.out, &key);
                    self.log
                        .note(RepairPass::Structural, "quoted bare key", key);
                    self.need = Need::Colon;
                } else if self.enter_value("word") {
                    self.emit_word_value(&w);
                    self.need = Need::Sep;
                }
                self.pos += 1;
            }
        }
    }

    /// Close whatever the token stream left open: a dangling key gets a null
    /// value, every unterminated container gets its closer.
    fn finish(&mut self) {
        match self.need {
            Need::Colon => {
                self.out.push_str(":null");
                self.log.note(
                    RepairPass::Structural,
                    "inserted null for missing value",
                    String::new(),
                );
            }
            Need::Value if matches!(self.stack.last(), Some(Frame::Object)) => {
                self.out.push_str("null");
                self.log.note(
                    RepairPass::Structural,
                    "inserted null for missing value",
                    String::new(),
                );
            }
            _ => {}
        }
        self.pending_comma = false;
        while let Some(frame) = self.stack.pop() {
            self.out.push(match frame {
                Frame::Object => '}',
                Frame::Array => ']',
            });
            self.log.note(
                RepairPass::Structural,
                "closed unterminated container",
                String::new(),
            );
        }
    }

    fn member_start(&self) -> Need {
        match self.stack.last() {
            Some(Frame::Object) => Need::Key,
            _ => Need::Value,
        }
    }

    /// Prepare for a value at the current position: flush a scheduled comma,
    /// or synthesize the colon a key is still waiting for. Returns false in
    /// key position, where a structural value cannot stand and the caller
    /// should drop the token.
    fn enter_value(&mut self, what: &str) -> bool {
        match self.need {
            Need::Value => {
                self.flush_comma();
                true
            }
            Need::Colon => {
                self.out.push(':');
                self.log.note(
                    RepairPass::Structural,
                    "inserted missing colon",
                    String::new(),
                );
                true
            }
            Need::Key => {
                self.log.note(
                    RepairPass::Structural,
                    "dropped stray token",
                    what.to_string(),
                );
                false
            }
            // separators are resolved before dispatch
            Need::Sep => false,
        }
    }

    fn flush_comma(&mut self) {
        if self.pending_comma {
            self.out.push(',');
            self.pending_comma = false;
        }
    }

    /// Bare words directly before a colon form one key: `{my key: 1}` keys on
    /// "my key". Without a colon in sight the first word stands alone so that
    /// `{a 1 b 2}` still yields two members.
    fn take_key_run(&mut self, first: &str) -> String {
        let mut end = self.pos + 1;
        while matches!(self.tokens.get(end), Some(Token::Word(_) | Token::Num(_))) {
            end += 1;
        }
        if end > self.pos + 1 && matches!(self.tokens.get(end), Some(Token::Colon)) {
            let mut key = String::from(first);
            for t in &self.tokens[self.pos + 1..end] {
                key.push(' ');
                match t {
                    Token::Word(w) => key.push_str(w),
                    Token::Num(n) => key.push_str(n),
                    _ => {}
                }
            }
            self.pos = end - 1;
            key
        } else {
            first.to_string()
        }
    }

    fn emit_string_value(&mut self, s: &str) {
        if self.opts.unwrap_quoted_numbers && is_safe_plain_number(s, self.opts.max_safe_digits) {
            self.out.push_str(s);
            self.log
                .note(RepairPass::Structural, "unquoted plain number", s.to_string());
            return;
        }
        write_json_string(&mut self.out, s);
    }

    fn emit_number(&mut self, seg: &str) {
        let t = seg.strip_prefix('+').unwrap_or(seg);
        if is_overlong_integer(t, self.opts.max_safe_digits) {
            // doubles round these; hand the digits over as a string
            write_json_string(&mut self.out, t);
            self.log.note(
                RepairPass::Structural,
                "quoted oversized integer",
                t.to_string(),
            );
            return;
        }
        if has_leading_zero(t) {
            write_json_string(&mut self.out, t);
            self.log.note(
                RepairPass::Structural,
                "quoted number with leading zeros",
                t.to_string(),
            );
            return;
        }
        if let Some(rest) = t.strip_prefix('.') {
            self.out.push('0');
            self.out.push('.');
            self.out.push_str(rest);
        } else if let Some(rest) = t.strip_prefix("-.") {
            self.out.push_str("-0.");
            self.out.push_str(rest);
        } else if t.ends_with('.') {
            self.out.push_str(t);
            self.out.push('0');
        } else {
            self.out.push_str(t);
        }
    }

    /// Emit a bare word as a value: keyword coercion first, otherwise the
    /// word and its bare neighbors merge into one quoted string, stopping
    /// where a `word:` run starts the next member.
    fn emit_word_value(&mut self, first: &str) {
        if !self.next_token_merges()
            && let Some(kw) = self.coerce_keyword(first)
        {
            self.out.push_str(kw);
            if kw != first {
                self.log.note(
                    RepairPass::Structural,
                    "normalized keyword",
                    first.to_string(),
                );
            }
            return;
        }
        let mut value = String::from(first);
        while self.next_token_merges() {
            match &self.tokens[self.pos + 1] {
                Token::Word(w) => {
                    value.push(' ');
                    value.push_str(w);
                }
                Token::Num(n) => {
                    value.push(' ');
                    value.push_str(n);
                }
                _ => break,
            }
            self.pos += 1;
        }
        write_json_string(&mut self.out, &value);
        self.log
            .note(RepairPass::Structural, "quoted unquoted value", value);
    }

    /// The next token joins the current bare value unless it begins a new
    /// `key:` member.
    fn next_token_merges(&self) -> bool {
        matches!(
            self.tokens.get(self.pos + 1),
            Some(Token::Word(_) | Token::Num(_))
        ) && !matches!(self.tokens.get(self.pos + 2), Some(Token::Colon))
    }

    fn coerce_keyword(&self, word: &str) -> Option<&'static str> {
        if !self.opts.coerce_keywords {
            return matches!(word, "true" | "false" | "null").then(|| match word {
                "true" => "true",
                "false" => "false",
                _ => "null",
            });
        }
        let lower = word.to_ascii_lowercase();
        match lower.as_str() {
            "true" => Some("true"),
            "false" => Some("false"),
            "null" | "none" => Some("null"),
            "undefined" | "nan" | "infinity" | "-infinity" => Some("null"),
            _ => None,
        }
    }
}

fn is_overlong_integer(seg: &str, max_digits: usize) -> bool {
    let t = seg.strip_prefix('-').unwrap_or(seg);
    !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) && t.len() > max_digits
}

fn has_leading_zero(seg: &str) -> bool {
    let b = seg.strip_prefix('-').unwrap_or(seg).as_bytes();
    b.len() > 1 && b[0] == b'0' && b[1].is_ascii_digit()
}

/// Write `s` as a JSON string literal, escaping the minimum strict JSON
/// requires. Multi-byte characters pass through unescaped.
pub(crate) fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        let esc: Option<&str> = match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\u{0008}' => Some("\\b"),
            '\u{000C}' => Some("\\f"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            c if (c as u32) < 0x20 => None,
            _ => continue,
        };
        if i > start {
            out.push_str(&s[start..i]);
        }
        match esc {
            Some(e) => out.push_str(e),
            None => {
                let _ = write!(out, "\\u{:04X}", ch as u32);
            }
        }
        start = i + ch.len_utf8();
    }
    if start < s.len() {
        out.push_str(&s[start..]);
    }
    out.push('"');
}
