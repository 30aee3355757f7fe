//! Session configuration types.
//!
//! - `SessionConfig`: seed and table limits, fixed for a session's lifetime
//! - `RoleCounts`: how many of each role to deal at setup
//!
//! Both are serde-serializable so a host can load them from its own config.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::roles::Role;

/// Session-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the role shuffle and the attack draw.
    /// Same seed and same commands produce the same game.
    pub seed: u64,

    /// Smallest table accepted at setup.
    pub min_players: usize,

    /// Largest table accepted at setup.
    pub max_players: usize,

    /// Game log entries kept before the oldest is dropped.
    pub log_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_players: 4,
            max_players: 11,
            log_capacity: 20,
        }
    }
}

impl SessionConfig {
    /// Use a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a custom upper table size (capped at 255 seats).
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max.min(u8::MAX as usize);
        self
    }

    /// Use a custom log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }
}

/// Role-count table for setup.
///
/// Villagers are not configured; every seat left over after the listed
/// roles is filled with a Villager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCounts {
    pub werewolf: usize,
    pub seer: usize,
    pub guard: usize,
    pub medium: usize,
    pub madman: usize,
    pub fox: usize,
    pub fanatic: usize,
}

impl Default for RoleCounts {
    /// Two werewolves, a Seer and a Guard, as offered by a fresh setup screen.
    fn default() -> Self {
        Self {
            werewolf: 2,
            seer: 1,
            guard: 1,
            medium: 0,
            madman: 0,
            fox: 0,
            fanatic: 0,
        }
    }
}

impl RoleCounts {
    /// A table with no roles configured at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            werewolf: 0,
            seer: 0,
            guard: 0,
            medium: 0,
            madman: 0,
            fox: 0,
            fanatic: 0,
        }
    }

    /// Set the count for one role. Villager counts are derived, so setting
    /// `Role::Villager` is a no-op.
    #[must_use]
    pub fn with(mut self, role: Role, count: usize) -> Self {
        match role {
            Role::Villager => {}
            Role::Werewolf => self.werewolf = count,
            Role::Seer => self.seer = count,
            Role::Guard => self.guard = count,
            Role::Medium => self.medium = count,
            Role::Madman => self.madman = count,
            Role::Fox => self.fox = count,
            Role::Fanatic => self.fanatic = count,
        }
        self
    }

    /// Configured count for a non-villager role.
    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Villager => 0,
            Role::Werewolf => self.werewolf,
            Role::Seer => self.seer,
            Role::Guard => self.guard,
            Role::Medium => self.medium,
            Role::Madman => self.madman,
            Role::Fox => self.fox,
            Role::Fanatic => self.fanatic,
        }
    }

    /// Sum of all configured (non-villager) roles.
    #[must_use]
    pub fn special_total(&self) -> usize {
        Role::ALL.iter().map(|&r| self.count(r)).sum()
    }

    /// Villagers needed to fill a table of `player_count`, if it fits.
    #[must_use]
    pub fn villagers_for(&self, player_count: usize) -> Option<usize> {
        player_count.checked_sub(self.special_total())
    }

    /// Check the table against a player count.
    pub fn validate(&self, player_count: usize) -> Result<(), ValidationError> {
        for role in Role::ALL.into_iter().filter(|r| r.is_unique()) {
            let count = self.count(role);
            if count > 1 {
                return Err(ValidationError::UniqueRoleRepeated { role, count });
            }
        }

        let max = player_count / 2;
        if self.werewolf < 1 || self.werewolf > max {
            return Err(ValidationError::WerewolfCount {
                count: self.werewolf,
                max,
            });
        }

        if self.villagers_for(player_count).is_none() {
            return Err(ValidationError::RolesExceedPlayers {
                assigned: self.special_total(),
                players: player_count,
            });
        }

        Ok(())
    }

    /// The full multiset of role instances for `player_count` seats,
    /// villagers included, in catalog order.
    ///
    /// Call `validate` first; unfillable tables yield no villagers.
    #[must_use]
    pub fn deal(&self, player_count: usize) -> Vec<Role> {
        let villagers = self.villagers_for(player_count).unwrap_or(0);
        let mut roles = Vec::with_capacity(player_count);
        for role in Role::ALL {
            let count = if role == Role::Villager {
                villagers
            } else {
                self.count(role)
            };
            roles.extend(std::iter::repeat(role).take(count));
        }
        roles
    }
}
