use serde::Serialize;

use crate::error::Diagnostic;

pub(crate) const MSG_UNCHANGED: &str = "already valid JSON, nothing to fix";
pub(crate) const MSG_REPAIRED: &str = "repaired JSON formatting issues";
pub(crate) const MSG_FAILED: &str = "could not repair the input as JSON";

/// What the engine did with a candidate document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Already valid JSON; only reformatted.
    Unchanged { formatted: String },
    /// The text was changed and the result parses.
    Repaired { original: String, repaired: String },
    /// No pass produced valid JSON; the candidate comes back untouched.
    Failed {
        original: String,
        diagnostic: Diagnostic,
    },
}

impl RepairOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, RepairOutcome::Unchanged { .. })
    }

    pub fn is_repaired(&self) -> bool {
        matches!(self, RepairOutcome::Repaired { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RepairOutcome::Failed { .. })
    }

    /// The text a caller should show: the formatted or repaired document, or
    /// the untouched original on failure.
    pub fn text(&self) -> &str {
        match self {
            RepairOutcome::Unchanged { formatted } => formatted,
            RepairOutcome::Repaired { repaired, .. } => repaired,
            RepairOutcome::Failed { original, .. } => original,
        }
    }

    /// Flatten into the host-bridge report shape.
    pub fn report(&self) -> RepairReport {
        match self {
            RepairOutcome::Unchanged { formatted } => RepairReport {
                success: true,
                result: formatted.clone(),
                error: None,
                needs_no_fix: true,
                show_diff: false,
                is_diff_mode: false,
                message: MSG_UNCHANGED.to_string(),
            },
            RepairOutcome::Repaired { repaired, .. } => RepairReport {
                success: true,
                result: repaired.clone(),
                error: None,
                needs_no_fix: false,
                show_diff: true,
                is_diff_mode: true,
                message: MSG_REPAIRED.to_string(),
            },
            RepairOutcome::Failed {
                original,
                diagnostic,
            } => RepairReport {
                success: false,
                result: original.clone(),
                error: Some(diagnostic.to_string()),
                needs_no_fix: false,
                show_diff: false,
                is_diff_mode: false,
                message: MSG_FAILED.to_string(),
            },
        }
    }
}

/// Flat report consumed by webview hosts. The field names are part of the
/// bridge contract and serialize in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    pub success: bool,
    pub result: String,
    pub error: Option<String>,
    pub needs_no_fix: bool,
    pub show_diff: bool,
    pub is_diff_mode: bool,
    pub message: String,
}
