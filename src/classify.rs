#[inline]
pub(crate) fn is_ws(c: char) -> bool {
    // U+FEFF counts so a BOM surviving normalization never splits a token.
    matches!(
        c,
        '\u{0009}' | '\u{000A}' | '\u{000D}' | '\u{0020}' | '\u{FEFF}'
    )
}

#[inline]
pub(crate) fn is_double_quote_like(c: char) -> bool {
    matches!(c, '"' | '\u{201C}' | '\u{201D}' | '\u{FF02}')
}

#[inline]
pub(crate) fn is_single_quote_like(c: char) -> bool {
    matches!(c, '\u{27}' | '\u{2018}' | '\u{2019}' | '\u{60}' | '\u{B4}' | '\u{FF07}')
}

/// Full-width and smart punctuation that CJK input methods substitute for
/// the ASCII forms JSON requires.
#[inline]
pub(crate) fn fullwidth_to_ascii(c: char) -> Option<char> {
    Some(match c {
        '\u{FF0C}' => ',',
        '\u{FF1A}' => ':',
        '\u{FF1B}' => ';',
        '\u{FF5B}' => '{',
        '\u{FF5D}' => '}',
        '\u{FF3B}' => '[',
        '\u{FF3D}' => ']',
        '\u{FF08}' => '(',
        '\u{FF09}' => ')',
        '\u{FF0F}' => '/',
        '\u{FF5E}' => '~',
        '\u{FF5C}' => '|',
        '\u{3000}' => ' ',
        '\u{FF02}' | '\u{201C}' | '\u{201D}' => '"',
        '\u{FF07}' | '\u{2018}' | '\u{2019}' => '\'',
        _ => return None,
    })
}

/// C0/C1 controls plus the BOM and zero-width marks that ride along in
/// pasted text. Tab, newline and carriage return stay: they separate tokens.
#[inline]
pub(crate) fn is_stray_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    c.is_control() || matches!(c, '\u{FEFF}' | '\u{200B}' | '\u{200C}' | '\u{200D}')
}

/// A quoted literal we are willing to unquote into a bare number: plain
/// integer or float, no exponent, no leading zeros, and at most `max_digits`
/// digits so a double-precision consumer cannot round it.
pub(crate) fn is_safe_plain_number(s: &str, max_digits: usize) -> bool {
    let t = s.strip_prefix('-').unwrap_or(s);
    if t.is_empty() || t.starts_with('.') || t.ends_with('.') {
        return false;
    }
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in t.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || digits > max_digits || dots > 1 {
        return false;
    }
    if t.len() > 1 && t.starts_with('0') && !t.starts_with("0.") {
        return false;
    }
    true
}
