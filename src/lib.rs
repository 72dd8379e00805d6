//! jsonmend: best-effort repair and formatting for "almost JSON".
//!
//! Text pasted out of chat logs, shell output, config files or LLM replies
//! is often nearly valid JSON: single quotes, bare keys, trailing commas,
//! comments, full-width punctuation, an unclosed bracket. [`repair`] pushes
//! such a candidate through a fixed pipeline (strict parse, text
//! normalization, structural re-assembly, lenient fallback) and reports what
//! happened as a [`RepairOutcome`]:
//!
//! ```
//! use jsonmend::{repair, RepairOutcome};
//!
//! match repair("{name: '燕麦拿铁', price: 32,}") {
//!     RepairOutcome::Repaired { repaired, .. } => {
//!         assert!(repaired.contains("\"name\""));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! The engine is total and synchronous: it never panics, never blocks, and
//! when nothing works it hands the original back with a diagnostic instead
//! of an error. Valid input is returned pretty-printed with its key order
//! intact, with one deliberate exception: bare integers longer than 15
//! digits are re-emitted as strings before a double-precision consumer can
//! round them.

mod assemble;
mod classify;
pub mod cli;
mod convert;
mod error;
mod extract;
mod fallback;
mod format;
mod normalize;
mod options;
mod outcome;
mod repair;
mod token;

pub use convert::url_params_to_json;
pub use error::{Diagnostic, Error};
pub use extract::format_embedded;
#[cfg(feature = "fallback")]
pub use fallback::LlmJsonFallback;
pub use fallback::{FallbackRepair, NoFallback};
pub use format::{compress, compress_escaped, format};
pub use options::Options;
pub use outcome::{RepairOutcome, RepairReport};
pub use repair::{RepairLogEntry, RepairPass, Repairer};

/// Repair `candidate` with default [`Options`].
pub fn repair(candidate: &str) -> RepairOutcome {
    Repairer::default().repair(candidate)
}

/// Repair `candidate` with explicit options.
pub fn repair_with_options(candidate: &str, opts: &Options) -> RepairOutcome {
    Repairer::new(opts.clone()).repair(candidate)
}

/// Repair and flatten straight to the host-bridge report shape.
pub fn repair_report(candidate: &str) -> RepairReport {
    repair(candidate).report()
}

#[cfg(test)]
mod tests;
