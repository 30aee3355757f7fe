//! Session phases.
//!
//! ```text
//! Menu -> Setup -> RoleReveal -> Day -> Vote -> Result -> Night -> Day -> ...
//!                                                 \
//!                                                  -> Terminal
//! ```
//!
//! Any phase may return to `Menu` through an explicit reset.

use serde::{Deserialize, Serialize};

/// Where the session is in the game loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Idle, no game loaded.
    #[default]
    Menu,
    /// Waiting for names and a role table.
    Setup,
    /// Players look at their own role one at a time.
    RoleReveal,
    /// Last night's summary is on display.
    Day,
    /// The table picks someone to execute, or skips.
    Vote,
    /// Waiting for the win check.
    Result,
    /// Living players take their night turns in seat order.
    Night,
    /// A winner has been declared.
    Terminal,
}

impl Phase {
    /// Whether players take turns one at a time in this phase.
    #[must_use]
    pub const fn has_turns(self) -> bool {
        matches!(self, Phase::RoleReveal | Phase::Night)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_menu() {
        assert_eq!(Phase::default(), Phase::Menu);
    }

    #[test]
    fn test_turn_phases() {
        assert!(Phase::RoleReveal.has_turns());
        assert!(Phase::Night.has_turns());
        assert!(!Phase::Day.has_turns());
        assert!(!Phase::Vote.has_turns());
    }
}
