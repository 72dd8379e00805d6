#[derive(Clone, Debug)]
pub struct Options {
    /// Treat `#` as a line comment (in addition to // and /* */) when not inside strings.
    pub tolerate_hash_comments: bool,
    /// Map full-width punctuation (，：｛｝［］ and smart quotes) to the ASCII forms
    /// when not inside double-quoted strings.
    pub normalize_fullwidth: bool,
    /// Unwrap escaped-string blobs like `{\"a\": 1}` when the whole candidate
    /// looks like one.
    pub unescape_blobs: bool,
    /// Normalize True/False/None (any case), undefined, NaN and Infinity while
    /// re-assembling values.
    pub coerce_keywords: bool,
    /// Unquote string values that hold a plain number, like "42" -> 42.
    pub unwrap_quoted_numbers: bool,
    /// Digit budget shared by number unwrapping and oversized-integer quoting.
    /// Double-precision consumers corrupt integers beyond 15 digits.
    pub max_safe_digits: usize,
    /// Consult the lenient fallback library when the structural pass fails.
    pub use_fallback: bool,
    /// Characters captured on each side of the error position when building
    /// diagnostic excerpts.
    pub context_window: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tolerate_hash_comments: true,
            normalize_fullwidth: true,
            unescape_blobs: true,
            coerce_keywords: true,
            unwrap_quoted_numbers: true,
            max_safe_digits: 15,
            use_fallback: true,
            context_window: 12,
        }
    }
}
