//! The repair pipeline.
//!
//! A candidate document flows through up to four stages: a direct strict
//! parse, text-level normalization, structural re-assembly, and a lenient
//! library fallback. The first stage that yields valid JSON wins; if none
//! does, the caller gets the untouched original plus a diagnostic. Nothing
//! in here panics or blocks, whatever the input.

use crate::assemble::assemble;
use crate::error::Diagnostic;
use crate::fallback::{FallbackRepair, default_fallback};
use crate::format::{parse_strict, pretty_value};
use crate::normalize::normalize;
use crate::options::Options;
use crate::outcome::RepairOutcome;
use crate::token::{Token, tokenize};

/// The pipeline stage a log entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPass {
    Normalize,
    Structural,
    Fallback,
}

/// A note about one fix the pipeline applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairLogEntry {
    pub pass: RepairPass,
    pub message: &'static str,
    /// The text involved, or a count, when one helps; often empty.
    pub detail: String,
}

#[derive(Default)]
pub(crate) struct RepairLog {
    enable: bool,
    entries: Vec<RepairLogEntry>,
}

impl RepairLog {
    pub(crate) fn disabled() -> Self {
        Self {
            enable: false,
            entries: Vec::new(),
        }
    }

    pub(crate) fn enabled() -> Self {
        Self {
            enable: true,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn note(&mut self, pass: RepairPass, message: &'static str, detail: String) {
        if self.enable {
            self.entries.push(RepairLogEntry {
                pass,
                message,
                detail,
            });
        }
    }
}

/// The repair engine. It owns its options and the fallback handle, so the
/// caller decides how long it lives and how it is shared; there is no
/// module-level state behind it.
pub struct Repairer {
    opts: Options,
    fallback: Box<dyn FallbackRepair + Send + Sync>,
}

impl Default for Repairer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Repairer {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            fallback: default_fallback(),
        }
    }

    /// Swap the lenient fallback implementation.
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackRepair + Send + Sync>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Run the pipeline on `candidate`. Total: every input maps to exactly
    /// one of the three outcomes.
    pub fn repair(&self, candidate: &str) -> RepairOutcome {
        let mut log = RepairLog::disabled();
        self.run(candidate, &mut log)
    }

    /// Like [`Repairer::repair`], also returning a note for every fix that
    /// was applied along the way.
    pub fn repair_with_log(&self, candidate: &str) -> (RepairOutcome, Vec<RepairLogEntry>) {
        let mut log = RepairLog::enabled();
        let outcome = self.run(candidate, &mut log);
        (outcome, log.entries)
    }

    fn run(&self, candidate: &str, log: &mut RepairLog) -> RepairOutcome {
        let err = match parse_strict(candidate) {
            Ok(value) => {
                // valid input is only re-routed when it carries bare integers
                // a double-precision host would round
                if has_overlong_integers(candidate, self.opts.max_safe_digits)
                    && let Some(repaired) = self.mend(candidate, log)
                {
                    return RepairOutcome::Repaired {
                        original: candidate.to_string(),
                        repaired,
                    };
                }
                return RepairOutcome::Unchanged {
                    formatted: pretty_value(&value),
                };
            }
            Err(err) => err,
        };

        if let Some(repaired) = self.mend(candidate, log) {
            return RepairOutcome::Repaired {
                original: candidate.to_string(),
                repaired,
            };
        }

        RepairOutcome::Failed {
            original: candidate.to_string(),
            diagnostic: Diagnostic::from_parse_error(&err, candidate, self.opts.context_window),
        }
    }

    /// Normalization, structural re-assembly, then the fallback. Returns the
    /// pretty-printed repaired text once any stage yields valid JSON.
    fn mend(&self, candidate: &str, log: &mut RepairLog) -> Option<String> {
        let normalized = normalize(candidate, &self.opts, log);
        let tokens = tokenize(&normalized);

        if let Some(assembled) = assemble(&tokens, &self.opts, log)
            && let Ok(value) = parse_strict(&assembled)
        {
            return Some(pretty_value(&value));
        }

        // prose without any bracket structure never reaches the fallback;
        // there is nothing a lenient parser could responsibly make of it
        let structured = tokens
            .iter()
            .any(|t| matches!(t, Token::LBrace | Token::LBracket));
        if self.opts.use_fallback
            && structured
            && let Some(fixed) = self.fallback.attempt_repair(&normalized)
            && let Some(repaired) = self.vet_fallback(&fixed, log)
        {
            log.note(
                RepairPass::Fallback,
                "lenient fallback recovered the document",
                String::new(),
            );
            return Some(repaired);
        }

        None
    }

    /// Re-validate text the fallback produced. Valid output that still
    /// carries bare integers past the digit budget goes back through the
    /// assembler so they end up quoted; beyond `u64` the parsed value is
    /// already rounded, so the requote has to start from the text.
    fn vet_fallback(&self, fixed: &str, log: &mut RepairLog) -> Option<String> {
        let value = parse_strict(fixed).ok()?;
        if has_overlong_integers(fixed, self.opts.max_safe_digits) {
            let assembled = assemble(&tokenize(fixed), &self.opts, log)?;
            let value = parse_strict(&assembled).ok()?;
            return Some(pretty_value(&value));
        }
        Some(pretty_value(&value))
    }
}

/// Scan for a bare integer run of more than `max_digits` digits outside
/// strings. Digit runs that belong to a float or an exponent do not count;
/// those lose precision in any double-based consumer regardless.
fn has_overlong_integers(text: &str, max_digits: usize) -> bool {
    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut escape = false;
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'0'..=b'9' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let prev = start.checked_sub(1).map(|p| bytes[p]);
                let next = bytes.get(i).copied();
                let part_of_float = matches!(prev, Some(b'.' | b'e' | b'E'))
                    || matches!(next, Some(b'.' | b'e' | b'E'));
                if i - start > max_digits && !part_of_float {
                    return true;
                }
            }
            _ => i += 1,
        }
    }
    false
}
