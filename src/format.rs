//! Strict parsing and printing on top of serde_json.
//!
//! serde_json is built with `preserve_order`, so pretty-printing keeps keys
//! in the order the source (or the repair pass) produced them.

use serde_json::Value;

use crate::error::Error;

pub(crate) fn parse_strict(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Two-space pretty form used everywhere the crate shows JSON.
pub(crate) fn pretty_value(value: &Value) -> String {
    // serializing a parsed Value to a String cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pretty-print already-valid JSON. No repair happens here; invalid input is
/// an error, not a candidate.
pub fn format(text: &str) -> Result<String, Error> {
    let v: Value = serde_json::from_str(text)?;
    Ok(pretty_value(&v))
}

/// Minify already-valid JSON onto a single line.
pub fn compress(text: &str) -> Result<String, Error> {
    let v: Value = serde_json::from_str(text)?;
    Ok(v.to_string())
}

/// Minify and escape double quotes, for pasting a document into a string
/// context such as a shell command or another JSON string.
pub fn compress_escaped(text: &str) -> Result<String, Error> {
    Ok(compress(text)?.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uses_two_space_indent() {
        let out = format("{\"a\": [1, 2]}").unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn format_keeps_key_order() {
        let out = format("{\"b\": 1, \"a\": 2}").unwrap();
        assert!(out.find("\"b\"").unwrap() < out.find("\"a\"").unwrap());
    }

    #[test]
    fn compress_minifies() {
        assert_eq!(
            compress("{\"a\": 1,\n  \"b\": [1, 2]}").unwrap(),
            "{\"a\":1,\"b\":[1,2]}"
        );
    }

    #[test]
    fn compress_escaped_quotes_everything() {
        let out = compress_escaped("{\"a\": \"x\"}").unwrap();
        assert_eq!(out, "{\\\"a\\\":\\\"x\\\"}");
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(format("{oops}").is_err());
        assert!(compress("").is_err());
    }
}
