use super::*;

fn report_json(input: &str) -> serde_json::Value {
    serde_json::to_value(Repairer::default().repair(input).report()).unwrap()
}

#[test]
fn report_keys_are_camel_case_and_in_bridge_order() {
    let report = report_json("{\"a\": 1}");
    let keys: Vec<&str> = report
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "success",
            "result",
            "error",
            "needsNoFix",
            "showDiff",
            "isDiffMode",
            "message"
        ]
    );
}

#[test]
fn unchanged_report_flags() {
    let report = report_json("{\"a\": 1}");
    assert_eq!(report["success"], true);
    assert_eq!(report["needsNoFix"], true);
    assert_eq!(report["showDiff"], false);
    assert_eq!(report["isDiffMode"], false);
    assert!(report["error"].is_null());
    assert_eq!(report["message"], "already valid JSON, nothing to fix");
    assert_eq!(report["result"], "{\n  \"a\": 1\n}");
}

#[test]
fn repaired_report_flags() {
    let report = report_json("{a: 1,}");
    assert_eq!(report["success"], true);
    assert_eq!(report["needsNoFix"], false);
    assert_eq!(report["showDiff"], true);
    assert_eq!(report["isDiffMode"], true);
    assert!(report["error"].is_null());
    assert_eq!(report["message"], "repaired JSON formatting issues");
    let repaired: serde_json::Value =
        serde_json::from_str(report["result"].as_str().unwrap()).unwrap();
    assert_eq!(repaired, serde_json::json!({"a": 1}));
}

#[test]
fn failed_report_flags() {
    let input = "definitely not json at all";
    let report = report_json(input);
    assert_eq!(report["success"], false);
    assert_eq!(report["needsNoFix"], false);
    assert_eq!(report["showDiff"], false);
    assert_eq!(report["isDiffMode"], false);
    assert_eq!(report["result"], input);
    assert_eq!(report["message"], "could not repair the input as JSON");
    let error = report["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("position"));
}

#[test]
fn report_round_trips_through_serde() {
    let report = Repairer::default().repair("{b: 2}").report();
    let text = serde_json::to_string(&report).unwrap();
    assert!(text.contains("\"needsNoFix\":false"));
    assert!(text.contains("\"showDiff\":true"));
    assert!(text.contains("\"success\":true"));
}
