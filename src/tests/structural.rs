use super::*;
use serde_json::json;

#[test]
fn appends_missing_closers() {
    assert_eq!(repaired_value("{\"a\": [1, 2"), json!({"a": [1, 2]}));
    assert_eq!(repaired_value("[[[1"), json!([[[1]]]));
    assert_eq!(repaired_value("{\"a\": {\"b\": 1"), json!({"a": {"b": 1}}));
}

#[test]
fn drops_stray_closer_and_balances_rest() {
    // The `}` does not match the open `[`: it is dropped and the missing
    // `]` and `}` are appended instead.
    assert_eq!(repaired_value("{\"a\": [1,2,3}"), json!({"a": [1, 2, 3]}));
}

#[test]
fn drops_extra_closers_at_root() {
    assert_eq!(repaired_value("[1, 2]]"), json!([1, 2]));
    assert_eq!(repaired_value("{\"a\": 1}}}"), json!({"a": 1}));
}

#[test]
fn removes_trailing_commas() {
    assert_eq!(repaired_value("[1, 2, 3,]"), json!([1, 2, 3]));
    assert_eq!(repaired_value("{\"a\": 1,}"), json!({"a": 1}));
    assert_eq!(repaired_value("{\"a\": [1,],}"), json!({"a": [1]}));
}

#[test]
fn removes_duplicate_and_leading_commas() {
    assert_eq!(repaired_value("[1,, 2]"), json!([1, 2]));
    assert_eq!(repaired_value("[, 1, 2]"), json!([1, 2]));
    assert_eq!(repaired_value("{\"a\": 1,, \"b\": 2}"), json!({"a": 1, "b": 2}));
}

#[test]
fn inserts_missing_commas() {
    assert_eq!(repaired_value("[1 2 3]"), json!([1, 2, 3]));
    assert_eq!(repaired_value("{\"a\": 1 \"b\": 2}"), json!({"a": 1, "b": 2}));
}

#[test]
fn inserts_missing_colons() {
    assert_eq!(repaired_value("{\"a\" 1}"), json!({"a": 1}));
    assert_eq!(repaired_value("{\"a\" \"b\" \"c\" \"d\"}"), json!({"a": "b", "c": "d"}));
}

#[test]
fn fills_missing_values_with_null() {
    assert_eq!(repaired_value("{\"a\":, \"b\": 1}"), json!({"a": null, "b": 1}));
    assert_eq!(repaired_value("{\"a\":}"), json!({"a": null}));
    assert_eq!(repaired_value("{\"a\":"), json!({"a": null}));
}

#[test]
fn quotes_bare_keys() {
    assert_eq!(repaired_value("{a: 1, b: 2}"), json!({"a": 1, "b": 2}));
    assert_eq!(repaired_value("{item_id: 7}"), json!({"item_id": 7}));
}

#[test]
fn coalesces_multiword_bare_keys() {
    assert_eq!(
        repaired_value("{first name: \"li\", age: 3}"),
        json!({"first name": "li", "age": 3})
    );
    assert_eq!(repaired_value("{my key: 1}"), json!({"my key": 1}));
}

#[test]
fn quotes_bare_string_values() {
    assert_eq!(repaired_value("{\"note\": hello}"), json!({"note": "hello"}));
    assert_eq!(repaired_value("[alpha, beta]"), json!(["alpha", "beta"]));
}

#[test]
fn merges_adjacent_bare_words_into_one_string() {
    assert_eq!(
        repaired_value("{note: hello world}"),
        json!({"note": "hello world"})
    );
    // the next `key:` pair must not be swallowed into the merged value
    assert_eq!(repaired_value("{a: x y: 2}"), json!({"a": "x", "y": 2}));
}

#[test]
fn keyword_next_to_other_words_stays_text() {
    assert_eq!(repaired_value("[true story]"), json!(["true story"]));
}

#[test]
fn coerces_foreign_keywords() {
    assert_eq!(
        repaired_value("{\"a\": True, \"b\": FALSE, \"c\": None}"),
        json!({"a": true, "b": false, "c": null})
    );
    assert_eq!(
        repaired_value("[undefined, NaN, Infinity, -Infinity]"),
        json!([null, null, null, null])
    );
}

#[test]
fn keyword_coercion_can_be_disabled() {
    let mut opts = Options::default();
    opts.coerce_keywords = false;
    opts.use_fallback = false;
    let repairer = Repairer::new(opts);

    // exact JSON keywords still pass through untouched
    let out = repairer.repair("[true, false, null,]");
    let value: serde_json::Value = serde_json::from_str(out.text()).unwrap();
    assert_eq!(value, json!([true, false, null]));

    // foreign spellings become plain strings instead
    let out = repairer.repair("[True, None]");
    let value: serde_json::Value = serde_json::from_str(out.text()).unwrap();
    assert_eq!(value, json!(["True", "None"]));
}

#[test]
fn closes_unterminated_strings() {
    assert_eq!(repaired_value("{\"a\": \"hi"), json!({"a": "hi"}));
    assert_eq!(repaired_value("[\"partial"), json!(["partial"]));
}

#[test]
fn single_quoted_pairs_without_colons() {
    assert_eq!(repaired_value("{'a' 2 'b' 3}"), json!({"a": 2, "b": 3}));
}

#[test]
fn stray_colon_in_array_is_dropped() {
    assert_eq!(repaired_value("[1: 2]"), json!([1, 2]));
}

#[test]
fn object_closer_after_colon_gets_null() {
    assert_eq!(repaired_value("{\"a\": 1, \"b\":}"), json!({"a": 1, "b": null}));
}

#[test]
fn deeply_nested_mixed_damage() {
    assert_eq!(
        repaired_value("{users: [{name: 'li', tags: [a b],}, {name: \"wang\""),
        json!({
            "users": [
                {"name": "li", "tags": ["a b"]},
                {"name": "wang"}
            ]
        })
    );
}
