//! Searcher agent lifecycle state.

use std::fmt;

use parking_lot::RwLock;

/// Lifecycle phase of a searcher agent.
///
/// ```text
/// Created ──start()──▶ Subscribing ──ack──▶ Active ──disconnect──▶ Closed
///                           │                                        ▲
///                           └──────────── subscribe failed ──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Created,
    Subscribing,
    Active,
    Closed,
}

impl AgentState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Subscribing => "subscribing",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Subscribing)
                | (Self::Subscribing, Self::Active)
                | (Self::Subscribing, Self::Closed)
                | (Self::Active, Self::Closed)
        )
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe holder for the agent state.
#[derive(Debug)]
pub struct StateCell {
    state: RwLock<AgentState>,
}

impl StateCell {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AgentState::Created),
        }
    }

    pub fn get(&self) -> AgentState {
        *self.state.read()
    }

    /// Move to `next` if the transition is allowed.
    ///
    /// Returns the state found when the transition is refused.
    pub fn transition(&self, next: AgentState) -> Result<AgentState, AgentState> {
        let mut state = self.state.write();
        if state.can_transition_to(next) {
            let previous = *state;
            *state = next;
            Ok(previous)
        } else {
            Err(*state)
        }
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
