use thiserror::Error;

use crate::hooks::HookError;

/// Errors that abort a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("Callback panicked: {0}")]
    HookPanicked(String),
}

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Trigger not satisfied; the engine was not called.
    Skipped,
    /// Dataset was empty; `no_results` was invoked.
    NoResults,
    /// Headless mode; `feedback` received the result set.
    Feedback { match_count: usize },
    /// Results were handed to the renderer.
    Rendered { shown: usize },
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Skipped => "skipped",
            RunOutcome::NoResults => "no_results",
            RunOutcome::Feedback { .. } => "feedback",
            RunOutcome::Rendered { .. } => "rendered",
        }
    }

    /// True when the matching engine ran.
    pub fn matched(&self) -> bool {
        !matches!(self, RunOutcome::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_skipped_runs_bypass_engine() {
        assert!(!RunOutcome::Skipped.matched());
        assert!(RunOutcome::NoResults.matched());
        assert!(RunOutcome::Feedback { match_count: 0 }.matched());
        assert!(RunOutcome::Rendered { shown: 2 }.matched());
        assert_eq!(RunOutcome::Rendered { shown: 2 }.as_str(), "rendered");
    }
}
