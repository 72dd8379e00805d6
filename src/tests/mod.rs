use super::*;

// Shared test helpers

fn repaired_text(s: &str) -> String {
    match crate::repair(s) {
        RepairOutcome::Repaired { repaired, .. } => repaired,
        other => panic!("expected a repair for {s:?}, got {other:?}"),
    }
}

fn repaired_value(s: &str) -> serde_json::Value {
    let out = repaired_text(s);
    serde_json::from_str(&out).unwrap_or_else(|e| panic!("repaired text not valid JSON: {e}\n{out}"))
}

fn formatted_text(s: &str) -> String {
    match crate::repair(s) {
        RepairOutcome::Unchanged { formatted } => formatted,
        other => panic!("expected valid input for {s:?}, got {other:?}"),
    }
}

mod normalize_passes;
mod outcomes;
mod report_shape;
mod structural;
