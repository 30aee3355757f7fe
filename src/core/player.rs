//! Player identification and per-seat records.
//!
//! ## PlayerId
//!
//! Stable 0-based seat index, assigned at setup and never reused.
//!
//! ## Player
//!
//! One seat at the table: display name, the role drawn at setup, and the
//! alive flag. The flag only ever goes from `true` to `false`.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Player identifier supporting up to 255 seats.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a table of `player_count` seats.
    ///
    /// ```
    /// use werewolf_core::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(5).collect();
    /// assert_eq!(players.len(), 5);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[4], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(u8::MAX as usize + 1)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 as u16 + 1)
    }
}

/// A seat at the table.
///
/// `role` is fixed once the seat is created. `alive` is private so that the
/// session is the only code able to flip it, and it can only be flipped off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable seat index.
    pub id: PlayerId,
    /// Display name (unique within a session).
    pub name: String,
    role: Role,
    alive: bool,
}

impl Player {
    /// Create a living player holding `role`.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            alive: true,
        }
    }

    /// The role drawn for this seat.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the player is still in the game.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remove the player from the game. Idempotent.
    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "P1");
        assert!(p0 < p1);
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(players, vec![
            PlayerId::new(0),
            PlayerId::new(1),
            PlayerId::new(2),
            PlayerId::new(3),
        ]);
    }

    #[test]
    fn test_player_starts_alive() {
        let player = Player::new(PlayerId::new(2), "Carol", Role::Seer);
        assert!(player.is_alive());
        assert_eq!(player.role(), Role::Seer);
        assert_eq!(player.name, "Carol");
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut player = Player::new(PlayerId::new(0), "Alice", Role::Villager);
        player.kill();
        player.kill();
        assert!(!player.is_alive());
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(PlayerId::new(1), "Bob", Role::Werewolf);
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
