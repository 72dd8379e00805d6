use super::*;

#[test]
fn valid_input_is_unchanged_and_pretty() {
    match crate::repair("{\"b\": 1, \"a\": 2}") {
        RepairOutcome::Unchanged { formatted } => {
            assert_eq!(formatted, "{\n  \"b\": 1,\n  \"a\": 2\n}");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn valid_scalars_are_unchanged() {
    assert!(crate::repair("123").is_unchanged());
    assert!(crate::repair("true").is_unchanged());
    assert!(crate::repair("\"hi\"").is_unchanged());
    assert!(crate::repair("null").is_unchanged());
}

#[test]
fn repaired_keeps_the_original_and_parses() {
    let input = "{a: 1}";
    match crate::repair(input) {
        RepairOutcome::Repaired { original, repaired } => {
            assert_eq!(original, input);
            let v: serde_json::Value = serde_json::from_str(&repaired).unwrap();
            assert_eq!(v, serde_json::json!({"a": 1}));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn prose_fails_with_original_and_diagnostic() {
    let input = "just some prose, not json";
    match crate::repair(input) {
        RepairOutcome::Failed {
            original,
            diagnostic,
        } => {
            assert_eq!(original, input);
            assert!(!diagnostic.to_string().is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn empty_and_whitespace_fail() {
    assert!(crate::repair("").is_failed());
    assert!(crate::repair("   \n\t ").is_failed());
}

#[test]
fn single_quoted_scalar_repairs_to_string() {
    assert_eq!(repaired_text("'hi'"), "\"hi\"");
}

#[test]
fn python_scalar_keywords_repair() {
    assert_eq!(repaired_text("True"), "true");
    assert_eq!(repaired_text("None"), "null");
}

#[test]
fn outcome_text_accessor_matches_variant() {
    assert_eq!(crate::repair("{\"a\":1}").text(), "{\n  \"a\": 1\n}");
    assert_eq!(crate::repair("???does not parse???").text(), "???does not parse???");
}

#[test]
fn never_panics_on_nasty_inputs() {
    let cases = [
        "",
        "\"",
        "'",
        "{{{{{{",
        "]]]]]",
        "}{",
        "\\",
        "\\\\\\",
        ":::",
        ",,,",
        "{\"a\"",
        "{\"a\":",
        "[{\"a\": [",
        "\u{0}\u{1}\u{2}",
        "{\u{FEFF}}",
        "\"unterminated",
        "𝄞𝄞𝄞",
        "{\"k\": \"\\ud800\"}",
        "//",
        "/*",
        "%%%%",
        "9999999999999999999999999999999999999999",
    ];
    for case in cases {
        // any of the three outcomes is fine; reaching one is the point
        let _ = crate::repair(case);
        let _ = crate::repair_report(case);
    }

    let long_prose = "lorem ipsum ".repeat(20_000);
    let _ = crate::repair(&long_prose);

    // past serde_json's recursion limit this fails, but it must fail cleanly
    let very_deep = "[".repeat(2_000);
    let _ = crate::repair(&very_deep);
    assert!(crate::repair(&"[".repeat(100)).is_repaired());
}

#[test]
fn repair_with_options_respects_fallback_switch() {
    let opts = Options {
        use_fallback: false,
        ..Options::default()
    };
    // repairable without the fallback either way
    assert!(crate::repair_with_options("{a: 1,}", &opts).is_repaired());
}

#[test]
fn repairer_is_reusable() {
    let repairer = Repairer::default();
    assert!(repairer.repair("{a:1}").is_repaired());
    assert!(repairer.repair("{\"a\":1}").is_unchanged());
    assert!(repairer.repair("no json here at all").is_failed());
}

#[test]
fn repair_log_names_the_fixes() {
    let repairer = Repairer::default();
    let (outcome, entries) = repairer.repair_with_log("{a: 1, b: [1,2,}");
    assert!(outcome.is_repaired());
    assert!(entries.iter().any(|e| e.message == "quoted bare key"));
    assert!(
        entries
            .iter()
            .any(|e| e.message == "closed unterminated container"
                || e.message == "dropped stray closer")
    );
}

#[test]
fn valid_input_logs_nothing() {
    let repairer = Repairer::default();
    let (_, entries) = repairer.repair_with_log("{\"a\": 1}");
    assert!(entries.is_empty());
}
