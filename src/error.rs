use std::fmt;

use thiserror::Error;

/// Failure of a strict operation. The repair pipeline itself never returns
/// errors; it reports them through `RepairOutcome::Failed`.
#[derive(Debug, Error)]
pub enum Error {
    /// Strict parsing rejected the input.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The repair pipeline gave up on the input.
    #[error("unrepairable input: {0}")]
    Unrepairable(Diagnostic),
}

/// Why a candidate could not be parsed, with the error position and a short
/// excerpt when they can be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// Character offset into the original candidate.
    pub position: Option<usize>,
    /// Text around `position`, with line breaks flattened to spaces.
    pub excerpt: Option<String>,
}

impl Diagnostic {
    pub(crate) fn from_parse_error(err: &serde_json::Error, source: &str, window: usize) -> Self {
        let message = describe(err);
        let position = offset_from_line_column(source, err.line(), err.column());
        let excerpt = position.map(|pos| excerpt_around(source, pos, window));
        Self {
            message,
            position,
            excerpt,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.position, &self.excerpt) {
            (Some(p), Some(e)) => write!(f, "{} near position {}: '{}'", self.message, p, e),
            (Some(p), None) => write!(f, "{} near position {}", self.message, p),
            _ => f.write_str(&self.message),
        }
    }
}

/// Turn serde_json's message into a phrase a paste-and-fix user can act on.
fn describe(err: &serde_json::Error) -> String {
    let raw = err.to_string();
    if err.is_eof() {
        return "the input ends unexpectedly (truncated JSON?)".to_string();
    }
    if raw.contains("trailing characters") {
        return "unexpected text after the end of the JSON value".to_string();
    }
    if raw.contains("key must be a string") {
        return "object keys must be double-quoted strings".to_string();
    }
    if raw.contains("control character") {
        return "a string contains an unescaped control character".to_string();
    }
    if raw.contains("invalid escape") || raw.contains("unicode code point") {
        return "a string contains an invalid escape sequence".to_string();
    }
    if raw.contains("invalid number") || raw.contains("number out of range") {
        return "malformed number literal".to_string();
    }
    if raw.contains("expected value") {
        return "expected a JSON value".to_string();
    }
    // keep serde's phrase, minus its own " at line X column Y" suffix
    match raw.rfind(" at line ") {
        Some(idx) => raw[..idx].to_string(),
        None => raw,
    }
}

/// serde_json reports 1-based line and column; the column counts bytes from
/// the start of the line. Convert to a character offset into `source`.
fn offset_from_line_column(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let mut line_start = 0usize;
    for _ in 1..line {
        let nl = memchr::memchr(b'\n', source[line_start..].as_bytes())?;
        line_start += nl + 1;
    }
    let mut byte = (line_start + column - 1).min(source.len());
    while byte > 0 && !source.is_char_boundary(byte) {
        byte -= 1;
    }
    Some(source[..byte].chars().count())
}

fn excerpt_around(source: &str, pos: usize, window: usize) -> String {
    let chars: Vec<char> = source.chars().collect();
    let start = pos.saturating_sub(window);
    let end = (pos + window).min(chars.len());
    chars[start..end]
        .iter()
        .map(|&c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}
