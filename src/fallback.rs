//! Last-resort lenient repair behind a narrow seam.

/// A lenient repair library the pipeline may consult when its own passes
/// fail. Implementations return the repaired text or None; the pipeline
/// re-validates whatever comes back, so a misbehaving implementation can
/// never produce an invalid `Repaired` outcome.
pub trait FallbackRepair {
    fn attempt_repair(&self, text: &str) -> Option<String>;
}

/// Fallback backed by the llm_json crate.
#[cfg(feature = "fallback")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LlmJsonFallback;

#[cfg(feature = "fallback")]
impl FallbackRepair for LlmJsonFallback {
    fn attempt_repair(&self, text: &str) -> Option<String> {
        let opts = llm_json::RepairOptions {
            ensure_ascii: false,
            skip_json_loads: false,
            ..Default::default()
        };
        llm_json::repair_json(text, &opts).ok()
    }
}

/// Disables the fallback pass entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackRepair for NoFallback {
    fn attempt_repair(&self, _text: &str) -> Option<String> {
        None
    }
}

pub(crate) fn default_fallback() -> Box<dyn FallbackRepair + Send + Sync> {
    #[cfg(feature = "fallback")]
    {
        Box::new(LlmJsonFallback)
    }
    #[cfg(not(feature = "fallback"))]
    {
        Box::new(NoFallback)
    }
}
