//! Role variants and their read-only capabilities.

use serde::{Deserialize, Serialize};

/// Winning side for victory purposes, also the label a Seer reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Villagers and every role that sides with them.
    Villager,
    /// The werewolf pack.
    Werewolf,
    /// The standalone third party.
    Fox,
}

impl Faction {
    /// User-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Faction::Villager => "Villager-faction",
            Faction::Werewolf => "Werewolf-faction",
            Faction::Fox => "Fox",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a role does on its night turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NightAbility {
    /// Vote for an attack target (Werewolf).
    Attack,
    /// Learn a player's Seer faction (Seer).
    Inspect,
    /// Shield one player from the attack (Guard).
    Protect,
    /// Read the last executed player's identity (Medium). Read-only.
    Commune,
}

impl NightAbility {
    /// Whether the turn must record an action before it can pass.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, NightAbility::Commune)
    }
}

/// One of the closed set of roles a seat can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Villager,
    Werewolf,
    Seer,
    Guard,
    Medium,
    Madman,
    Fox,
    Fanatic,
}

impl Role {
    /// Every role, in catalog order.
    pub const ALL: [Role; 8] = [
        Role::Villager,
        Role::Werewolf,
        Role::Seer,
        Role::Guard,
        Role::Medium,
        Role::Madman,
        Role::Fox,
        Role::Fanatic,
    ];

    /// Name shown to users.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Villager => "Villager",
            Role::Werewolf => "Werewolf",
            Role::Seer => "Seer",
            Role::Guard => "Guard",
            Role::Medium => "Medium",
            Role::Madman => "Madman",
            Role::Fox => "Fox",
            Role::Fanatic => "Fanatic",
        }
    }

    /// The night turn this role takes, if any.
    #[must_use]
    pub const fn night_ability(self) -> Option<NightAbility> {
        match self {
            Role::Werewolf => Some(NightAbility::Attack),
            Role::Seer => Some(NightAbility::Inspect),
            Role::Guard => Some(NightAbility::Protect),
            Role::Medium => Some(NightAbility::Commune),
            Role::Villager | Role::Madman | Role::Fox | Role::Fanatic => None,
        }
    }

    /// Whether this role has a night turn.
    #[must_use]
    pub const fn acts_at_night(self) -> bool {
        self.night_ability().is_some()
    }

    /// Faction reported to a Seer.
    ///
    /// Only werewolves read as Werewolf-faction; Fox and Madman mask as
    /// villagers.
    #[must_use]
    pub const fn seer_faction(self) -> Faction {
        match self {
            Role::Werewolf => Faction::Werewolf,
            Role::Villager
            | Role::Seer
            | Role::Guard
            | Role::Medium
            | Role::Madman
            | Role::Fox
            | Role::Fanatic => Faction::Villager,
        }
    }

    /// Identity reported to a Medium. Unlike the Seer, the Medium sees the Fox.
    #[must_use]
    pub const fn medium_identity(self) -> &'static str {
        self.display_name()
    }

    /// Whether at most one seat may hold this role.
    #[must_use]
    pub const fn is_unique(self) -> bool {
        !matches!(self, Role::Villager | Role::Werewolf)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
