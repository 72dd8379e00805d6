//! Text-level cleanups that run before tokenization.
//!
//! Every pass here rewrites the candidate as a whole and protects string
//! interiors: a full-width comma inside `"燕麦奶，拿铁"` is data, the same
//! character between two members is punctuation. The passes run in a fixed
//! order so each one sees the previous one's output.

use memchr::{memchr, memchr2};

use crate::classify::{fullwidth_to_ascii, is_stray_control};
use crate::options::Options;
use crate::repair::{RepairLog, RepairPass};

pub(crate) fn normalize(input: &str, opts: &Options, log: &mut RepairLog) -> String {
    let mut text = strip_comments(input, opts, log);
    text = strip_stray_controls(&text, log);
    if opts.normalize_fullwidth {
        text = map_fullwidth(&text, log);
    }
    text = unify_quotes(&text, log);
    if opts.unescape_blobs {
        text = unescape_blob(&text, log);
    }
    text
}

/// Strip `//` and `/* */` comments, plus `#` lines when tolerated. Both
/// double- and single-quoted runs are copied verbatim so `"http://x"` and
/// `'http://x'` keep their slashes.
fn strip_comments(input: &str, opts: &Options, log: &mut RepairLog) -> String {
    if memchr2(b'/', b'#', input.as_bytes()).is_none() {
        return input.to_string();
    }
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0usize;
    let mut removed = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            i = copy_quoted_run(&chars, i, &mut out);
            continue;
        }
        if c == '/' && matches!(chars.get(i + 1), Some('/')) {
            while i < chars.len() && !matches!(chars[i], '\n' | '\r') {
                i += 1;
            }
            removed += 1;
            continue;
        }
        if c == '/' && matches!(chars.get(i + 1), Some('*')) {
            i += 2;
            while i < chars.len() {
                if chars[i] == '*' && matches!(chars.get(i + 1), Some('/')) {
                    i += 2;
                    break;
                }
                i += 1;
            }
            removed += 1;
            continue;
        }
        if c == '#' && opts.tolerate_hash_comments {
            while i < chars.len() && !matches!(chars[i], '\n' | '\r') {
                i += 1;
            }
            removed += 1;
            continue;
        }
        out.push(c);
        i += 1;
    }
    if removed > 0 {
        log.note(
            RepairPass::Normalize,
            "stripped comments",
            format!("{removed} removed"),
        );
    }
    out
}

/// Copy a quoted literal unchanged, stopping at the matching quote, a line
/// break or end of input. Returns the index after the copied run.
fn copy_quoted_run(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut i = start + 1;
    let mut escape = false;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if escape {
            escape = false;
            continue;
        }
        if c == '\\' {
            escape = true;
            continue;
        }
        if c == quote || matches!(c, '\n' | '\r') {
            break;
        }
    }
    i
}

/// Drop control characters and zero-width marks outside strings. Inside
/// strings they stay; re-assembly escapes them properly.
fn strip_stray_controls(input: &str, log: &mut RepairLog) -> String {
    if !input.chars().any(|c| is_stray_control(c)) {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut removed = 0usize;
    let mut in_string = false;
    let mut escape = false;
    for c in input.chars() {
        if in_string {
            out.push(c);
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' || matches!(c, '\n' | '\r') {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }
        if is_stray_control(c) {
            removed += 1;
            continue;
        }
        out.push(c);
    }
    if removed > 0 {
        log.note(
            RepairPass::Normalize,
            "removed stray control characters",
            format!("{removed} removed"),
        );
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteRun {
    None,
    Double,
    DoubleSmart,
    Single,
    SingleSmart,
}

/// Map full-width punctuation and smart quotes to ASCII outside strings.
/// A string opened by a full-width or smart quote closes on any quote of the
/// same kind, so `“a”` becomes `"a"` with its interior protected.
fn map_fullwidth(input: &str, log: &mut RepairLog) -> String {
    let mut out = String::with_capacity(input.len());
    let mut mapped = 0usize;
    let mut run = QuoteRun::None;
    let mut escape = false;
    for c in input.chars() {
        if run != QuoteRun::None {
            if escape {
                escape = false;
                out.push(c);
                continue;
            }
            if c == '\\' {
                escape = true;
                out.push(c);
                continue;
            }
            let closes = match run {
                QuoteRun::Double => c == '"',
                QuoteRun::DoubleSmart => matches!(c, '"' | '\u{FF02}' | '\u{201C}' | '\u{201D}'),
                QuoteRun::Single => c == '\'',
                QuoteRun::SingleSmart => matches!(c, '\'' | '\u{FF07}' | '\u{2018}' | '\u{2019}'),
                QuoteRun::None => false,
            };
            if closes {
                let ascii = if matches!(run, QuoteRun::Double | QuoteRun::DoubleSmart) {
                    '"'
                } else {
                    '\''
                };
                if c != ascii {
                    mapped += 1;
                }
                out.push(ascii);
                run = QuoteRun::None;
                continue;
            }
            if matches!(c, '\n' | '\r') {
                run = QuoteRun::None;
            }
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                run = QuoteRun::Double;
                out.push(c);
            }
            '\'' => {
                run = QuoteRun::Single;
                out.push(c);
            }
            '\u{FF02}' | '\u{201C}' | '\u{201D}' => {
                run = QuoteRun::DoubleSmart;
                mapped += 1;
                out.push('"');
            }
            '\u{FF07}' | '\u{2018}' | '\u{2019}' => {
                run = QuoteRun::SingleSmart;
                mapped += 1;
                out.push('\'');
            }
            _ => match fullwidth_to_ascii(c) {
                Some(a) => {
                    mapped += 1;
                    out.push(a);
                }
                None => out.push(c),
            },
        }
    }
    if mapped > 0 {
        log.note(
            RepairPass::Normalize,
            "normalized full-width punctuation",
            format!("{mapped} mapped"),
        );
    }
    out
}

/// Convert single-quoted literals to double-quoted ones where unambiguous:
/// the opening quote must follow a structural character and the closing one
/// must sit on the same line. Apostrophes inside words never qualify, so
/// `{note: it's fine}` is left alone.
fn unify_quotes(input: &str, log: &mut RepairLog) -> String {
    if !input.contains('\'') {
        return input.to_string();
    }
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0usize;
    let mut converted = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_quoted_run(&chars, i, &mut out);
            continue;
        }
        if c == '\'' && opens_literal(&chars, i) {
            if let Some(end) = closing_single_quote(&chars, i + 1) {
                out.push('"');
                let mut j = i + 1;
                while j < end {
                    let s = chars[j];
                    if s == '\\' && j + 1 < end {
                        let n = chars[j + 1];
                        if n == '\'' {
                            out.push('\'');
                        } else {
                            out.push('\\');
                            out.push(n);
                        }
                        j += 2;
                        continue;
                    }
                    if s == '"' {
                        out.push_str("\\\"");
                    } else {
                        out.push(s);
                    }
                    j += 1;
                }
                out.push('"');
                i = end + 1;
                converted += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    if converted > 0 {
        log.note(
            RepairPass::Normalize,
            "converted single-quoted literals",
            format!("{converted} converted"),
        );
    }
    out
}

fn opens_literal(chars: &[char], at: usize) -> bool {
    let mut k = at;
    while k > 0 {
        k -= 1;
        let c = chars[k];
        if c.is_whitespace() {
            continue;
        }
        return matches!(c, '{' | '[' | ',' | ':');
    }
    true
}

fn closing_single_quote(chars: &[char], from: usize) -> Option<usize> {
    let mut j = from;
    let mut escape = false;
    while j < chars.len() {
        let c = chars[j];
        if escape {
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else if c == '\'' {
            return Some(j);
        } else if matches!(c, '\n' | '\r') {
            return None;
        }
        j += 1;
    }
    None
}

/// Unwrap an escaped-string blob: text copied out of a JSON string value or
/// a log line, where every quote arrives as `\"` and line breaks as `\n`.
/// Applies only when the whole candidate has that shape.
fn unescape_blob(input: &str, log: &mut RepairLog) -> String {
    let trimmed = input.trim();
    if memchr(b'\\', trimmed.as_bytes()).is_none() {
        return input.to_string();
    }
    let looks_escaped = trimmed.contains("\\\"")
        || trimmed.contains("\\n")
        || trimmed.contains("\\t")
        || trimmed.contains("\\r");
    if !looks_escaped {
        return input.to_string();
    }
    // naked blob: no unescaped quote anywhere
    if count_unescaped_quotes(trimmed) == 0 {
        log.note(
            RepairPass::Normalize,
            "unwrapped escaped blob",
            String::new(),
        );
        return unescape_sequences(trimmed);
    }
    // wrapped blob: "..." around an interior with no unescaped quotes
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        let interior = &trimmed[1..trimmed.len() - 1];
        if count_unescaped_quotes(interior) == 0 && interior.contains("\\\"") {
            log.note(
                RepairPass::Normalize,
                "unwrapped escaped blob",
                String::new(),
            );
            return unescape_sequences(interior);
        }
    }
    input.to_string()
}

fn count_unescaped_quotes(s: &str) -> usize {
    let mut n = 0usize;
    let mut escape = false;
    for c in s.chars() {
        if escape {
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else if c == '"' {
            n += 1;
        }
    }
    n
}

fn unescape_sequences(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match it.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            // a doubled backslash collapses; whatever follows is literal again
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
