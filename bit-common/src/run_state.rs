use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a run stopped. The display text is the label of the final history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum HaltReason {
    #[error("Out of bounds")]
    OutOfBounds,
    #[error("Blocked")]
    Blocked,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Running until the first invalid action, then halted for good.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Halted(HaltReason),
}

impl RunState {
    pub fn is_halted(&self) -> bool {
        matches!(self, RunState::Halted(_))
    }

    pub fn halt_reason(&self) -> Option<&HaltReason> {
        match self {
            RunState::Running => None,
            RunState::Halted(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_reasons_render_as_history_labels() {
        assert_eq!(HaltReason::OutOfBounds.to_string(), "Out of bounds");
        assert_eq!(HaltReason::Blocked.to_string(), "Blocked");
        assert_eq!(
            HaltReason::InvalidColor("purple".into()).to_string(),
            "Invalid color: purple"
        );
    }

    #[test]
    fn default_state_is_running() {
        let state = RunState::default();
        assert!(!state.is_halted());
        assert_eq!(state.halt_reason(), None);
        assert!(RunState::Halted(HaltReason::Blocked).is_halted());
    }
}
