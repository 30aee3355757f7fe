//! Win evaluation.
//!
//! Computed from the alive flags on demand, never maintained incrementally.
//! A living Fox takes every win the villagers or werewolves would otherwise
//! get.

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::roles::{Faction, Role};

/// Head count of the living.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub alive_total: usize,
    pub alive_wolves: usize,
    pub alive_foxes: usize,
}

impl Census {
    /// Count the living players by role.
    #[must_use]
    pub fn of(players: &[Player]) -> Self {
        players
            .iter()
            .filter(|p| p.is_alive())
            .fold(Self::default(), |mut census, p| {
                census.alive_total += 1;
                match p.role() {
                    Role::Werewolf => census.alive_wolves += 1,
                    Role::Fox => census.alive_foxes += 1,
                    _ => {}
                }
                census
            })
    }

    /// The winning faction, or `None` if play continues.
    ///
    /// Werewolves win once they make up at least half the living
    /// (`alive_total <= 2 * alive_wolves`).
    // NOTE: this threshold can fire while non-wolf survivors are still tied
    // with wolves; kept as-is, it is a balance question.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        let fox_alive = self.alive_foxes > 0;
        if self.alive_wolves == 0 {
            Some(if fox_alive { Faction::Fox } else { Faction::Villager })
        } else if self.alive_total <= 2 * self.alive_wolves {
            Some(if fox_alive { Faction::Fox } else { Faction::Werewolf })
        } else {
            None
        }
    }
}

/// Evaluate the winner for the current alive flags.
#[must_use]
pub fn evaluate(players: &[Player]) -> Option<Faction> {
    Census::of(players).winner()
}
