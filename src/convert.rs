//! Query-string to JSON conversion.

use serde_json::{Map, Value};

use crate::format::pretty_value;

/// Convert an URL query string like `a=1&b=x%20y` into a pretty-printed JSON
/// object with string values. Everything up to a `?` is ignored, so a full
/// URL works too. Pairs without `=` become empty strings, a later duplicate
/// key wins, and broken percent escapes stay verbatim. Total: any input
/// yields some JSON object, possibly empty.
pub fn url_params_to_json(query: &str) -> String {
    let query = match query.find('?') {
        Some(idx) => &query[idx + 1..],
        None => query,
    };
    let mut map = Map::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (k, v) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        map.insert(percent_decode(k), Value::String(percent_decode(v)));
    }
    pretty_value(&Value::Object(map))
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let (Some(h), Some(l)) = (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2)))
        {
            out.push((h << 4) | l);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn hex_val(b: Option<&u8>) -> Option<u8> {
    b.and_then(|&b| (b as char).to_digit(16)).map(|d| d as u8)
}
