use std::fmt;

/// Lifecycle state of a capture source.
///
/// Transitions: `Idle -> Running` and `Stopped -> Running` on `start`,
/// `Running -> Running` on restart-in-place, `Running -> Stopped` on `stop`.
/// `stop` while Idle or Stopped is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl SourceState {
    pub fn is_running(&self) -> bool {
        matches!(self, SourceState::Running)
    }
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceState::Idle => write!(f, "idle"),
            SourceState::Running => write!(f, "running"),
            SourceState::Stopped => write!(f, "stopped"),
        }
    }
}
