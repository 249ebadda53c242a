//! Evaluation context configuration

/// Configuration passed through every evaluation call.
///
/// `for_primary` selects which comparisons participate: primary-variant
/// operators (`^P`, `!^P`) are only checked when it is set, and all other
/// comparisons only when it is clear. A skipped comparison is vacuously true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalContext {
    /// Evaluate for the primary replica slot
    pub for_primary: bool,

    /// Whether to trace evaluation (for debugging)
    pub trace: bool,
}

impl EvalContext {
    /// Create a context for non-primary placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for primary placement.
    pub fn primary() -> Self {
        Self {
            for_primary: true,
            ..Default::default()
        }
    }

    /// Create a context with the given primary mode.
    pub fn with_primary(for_primary: bool) -> Self {
        Self {
            for_primary,
            ..Default::default()
        }
    }

    /// Enable or disable per-node tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
