use super::*;
use serde_json::json;

#[test]
fn line_and_block_comments_are_stripped() {
    assert_eq!(repaired_value("{\"a\": 1} // done"), json!({"a": 1}));
    assert_eq!(repaired_value("{/* header */ \"a\": 1}"), json!({"a": 1}));
    assert_eq!(
        repaired_value("{\n  \"a\": 1, // first\n  \"b\": 2\n}"),
        json!({"a": 1, "b": 2})
    );
}

#[test]
fn hash_comments_are_stripped_by_default() {
    assert_eq!(repaired_value("# export\n{\"a\": 1}"), json!({"a": 1}));
}

#[test]
fn hash_comment_handling_can_be_disabled() {
    let mut opts = Options::default();
    opts.tolerate_hash_comments = false;
    opts.use_fallback = false;
    let repairer = Repairer::new(opts);

    let out = repairer.repair("{a: 1 # note");
    let value: serde_json::Value = serde_json::from_str(out.text()).unwrap();
    // with the gate off the hash is data, not a comment
    assert_eq!(value, json!({"a": 1, "#": "note"}));
}

#[test]
fn slashes_inside_strings_are_not_comments() {
    assert_eq!(
        repaired_value("{url: \"http://example.com\"}"),
        json!({"url": "http://example.com"})
    );
    assert_eq!(
        repaired_value("{'url': 'http://example.com'}"),
        json!({"url": "http://example.com"})
    );
}

#[test]
fn bom_and_zero_width_marks_are_dropped() {
    assert_eq!(repaired_value("\u{FEFF}{\"a\": 1}"), json!({"a": 1}));
    assert_eq!(repaired_value("{\"a\":\u{200B} 1}"), json!({"a": 1}));
}

#[test]
fn control_characters_inside_strings_are_escaped_not_lost() {
    assert_eq!(
        repaired_value("{\"a\": \"x\u{0007}y\"}"),
        json!({"a": "x\u{0007}y"})
    );
}

#[test]
fn fullwidth_punctuation_maps_to_ascii() {
    assert_eq!(
        repaired_value("{\"a\"\u{FF1A}1\u{FF0C}\"b\"\u{FF1A}2}"),
        json!({"a": 1, "b": 2})
    );
    assert_eq!(
        repaired_value("\u{FF5B}\"a\"\u{FF1A}\u{FF3B}1\u{FF0C}2\u{FF3D}\u{FF5D}"),
        json!({"a": [1, 2]})
    );
}

#[test]
fn fullwidth_punctuation_inside_strings_survives() {
    assert_eq!(
        repaired_value("{\"msg\"\u{FF1A} \"他说：你好，世界\"}"),
        json!({"msg": "他说：你好，世界"})
    );
}

#[test]
fn smart_quotes_become_plain_quotes() {
    assert_eq!(repaired_value("{\u{201C}a\u{201D}: \u{201C}x\u{201D}}"), json!({"a": "x"}));
    assert_eq!(repaired_value("{\u{2018}a\u{2019}: \u{2018}y\u{2019}}"), json!({"a": "y"}));
}

#[test]
fn single_quoted_strings_unify() {
    assert_eq!(
        repaired_value("{'name': '燕麦拿铁', 'price': 32}"),
        json!({"name": "燕麦拿铁", "price": 32})
    );
    assert_eq!(repaired_value("{'a': 'it\\'s'}"), json!({"a": "it's"}));
    assert_eq!(repaired_value("{'q': 'say \"hi\"'}"), json!({"q": "say \"hi\""}));
}

#[test]
fn apostrophes_in_prose_are_not_string_openers() {
    formatted_text("{\"note\": \"it's fine\"}");
    assert_eq!(
        repaired_value("{note: it's a test}"),
        json!({"note": "it's a test"})
    );
}

#[test]
fn naked_escaped_blob_unwraps() {
    assert_eq!(
        repaired_value("{\\\"a\\\": 1, \\\"b\\\": \\\"x\\\"}"),
        json!({"a": 1, "b": "x"})
    );
    assert_eq!(repaired_value("[\\\"a\\\", \\\"b\\\"]"), json!(["a", "b"]));
}

#[test]
fn wrapped_escaped_blob_unwraps_when_broken() {
    // the wrapper only parses as a JSON string when it is intact; a raw
    // newline inside breaks it, and the digest recovers the payload
    assert_eq!(
        repaired_value("\"{\\\"a\\\": 1,\n \\\"b\\\": 2}\""),
        json!({"a": 1, "b": 2})
    );
}

#[test]
fn intact_wrapped_blob_is_already_valid_and_stays_a_string() {
    let out = formatted_text("\"{\\\"a\\\": 1}\"");
    assert_eq!(out, "\"{\\\"a\\\": 1}\"");
}
