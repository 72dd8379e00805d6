//! Formatting of JSON fragments embedded in mixed text.

use memchr::memchr2;

use crate::format::{parse_strict, pretty_value};

/// Pretty-print every balanced `{...}` or `[...]` run in `text` that parses
/// as strict JSON, leaving all surrounding text byte-for-byte intact. Log
/// lines like `payload: {"a":1}` keep their prefixes; fragments that do not
/// parse stay exactly as they were. Total: never fails, never repairs.
pub fn format_embedded(text: &str) -> String {
    // the whole input being JSON is the common case
    if let Ok(v) = parse_strict(text.trim()) {
        return pretty_value(&v);
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0usize;
    while i < bytes.len() {
        let Some(rel) = memchr2(b'{', b'[', &bytes[i..]) else {
            out.push_str(&text[i..]);
            break;
        };
        let start = i + rel;
        out.push_str(&text[i..start]);
        match balanced_end(bytes, start) {
            Some(end) => {
                let fragment = &text[start..end];
                match parse_strict(fragment) {
                    Ok(v) => out.push_str(&pretty_value(&v)),
                    Err(_) => out.push_str(fragment),
                }
                i = end;
            }
            None => {
                // unbalanced opener: emit it and keep scanning inside
                out.push_str(&text[start..start + 1]);
                i = start + 1;
            }
        }
    }
    out
}

/// Byte offset just past the closer matching the opener at `start`, tracking
/// depth and string interiors. None when the input ends first.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
