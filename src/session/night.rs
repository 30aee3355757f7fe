//! Night actions and their resolution.
//!
//! Actions recorded during the night are collected in `NightActions` and
//! applied all at once by `resolve`. The order of application is fixed:
//!
//! 1. Curse: a Fox inspected by the Seer dies, regardless of any vote.
//! 2. Attack draw: one werewolf vote is drawn at random. Confident votes
//!    are drawn from first; only if there are none does the draw fall back
//!    to every vote. Draws are by vote, not by distinct target.
//! 3. Attack: the drawn target dies unless it is an uncursed Fox or the
//!    Guard's protected player.
//! 4. Summary: deaths are listed in the order they happened.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, Player, PlayerId};
use crate::roles::{Faction, NightAbility, Role};

/// One werewolf's attack vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfVote {
    pub target: PlayerId,
    /// Confident votes take precedence in the attack draw.
    pub confident: bool,
}

/// Everything recorded during one night. Cleared when the night resolves
/// and when the next night begins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NightActions {
    /// Who the Guard protects.
    pub guard_target: Option<PlayerId>,
    /// Who the Seer inspected.
    pub seer_target: Option<PlayerId>,
    /// What the Seer read on the target.
    pub seer_reading: Option<Faction>,
    /// Set when the Seer inspected the Fox.
    pub seer_causes_curse: Option<PlayerId>,
    /// At most one vote per werewolf; a later vote replaces an earlier one.
    pub wolf_votes: FxHashMap<PlayerId, WolfVote>,
}

impl NightActions {
    /// Create an empty set of actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a werewolf's vote, returning the vote it replaced.
    pub fn record_wolf_vote(&mut self, wolf: PlayerId, vote: WolfVote) -> Option<WolfVote> {
        self.wolf_votes.insert(wolf, vote)
    }

    /// Record the Seer's inspection of `target`, who holds `role`.
    ///
    /// Inspecting the Fox marks it for the curse.
    pub fn record_inspection(&mut self, target: PlayerId, role: Role) -> Faction {
        let faction = role.seer_faction();
        self.seer_target = Some(target);
        self.seer_reading = Some(faction);
        self.seer_causes_curse = (role == Role::Fox).then_some(target);
        faction
    }

    /// Record the Guard's protection, replacing any earlier choice.
    pub fn record_protection(&mut self, target: PlayerId) {
        self.guard_target = Some(target);
    }

    /// Whether `player` has recorded the action for `ability` tonight.
    #[must_use]
    pub fn has_acted(&self, player: PlayerId, ability: NightAbility) -> bool {
        match ability {
            NightAbility::Attack => self.wolf_votes.contains_key(&player),
            NightAbility::Inspect => self.seer_target.is_some(),
            NightAbility::Protect => self.guard_target.is_some(),
            NightAbility::Commune => true,
        }
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Votes ordered by werewolf seat, so draws do not depend on hash order.
    fn votes_by_seat(&self) -> Vec<WolfVote> {
        let mut votes: Vec<_> = self.wolf_votes.iter().map(|(&w, &v)| (w, v)).collect();
        votes.sort_unstable_by_key(|&(wolf, _)| wolf);
        votes.into_iter().map(|(_, vote)| vote).collect()
    }

    /// Draw the attack target.
    ///
    /// Returns `None` when no vote was cast.
    pub fn draw_attack_target(&self, rng: &mut GameRng) -> Option<PlayerId> {
        let votes = self.votes_by_seat();
        let confident: Vec<PlayerId> = votes
            .iter()
            .filter(|v| v.confident)
            .map(|v| v.target)
            .collect();

        if !confident.is_empty() {
            return rng.choose(&confident).copied();
        }

        let all: Vec<PlayerId> = votes.iter().map(|v| v.target).collect();
        rng.choose(&all).copied()
    }
}

/// What happened during one night.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightOutcome {
    /// Fox killed by the Seer's curse.
    pub cursed: Option<PlayerId>,
    /// Target drawn from the werewolf votes, whether or not it died.
    pub attack_target: Option<PlayerId>,
    /// Deaths in the order they happened (curse first).
    pub deaths: SmallVec<[PlayerId; 2]>,
    /// Announcement for the morning.
    pub summary: String,
}

/// Apply the night's actions to the players.
///
/// `players` must be indexed by seat.
pub fn resolve(players: &mut [Player], actions: &NightActions, rng: &mut GameRng) -> NightOutcome {
    let mut deaths: SmallVec<[PlayerId; 2]> = SmallVec::new();

    let mut cursed = None;
    if let Some(fox) = actions.seer_causes_curse {
        if let Some(player) = players.get_mut(fox.index()).filter(|p| p.is_alive()) {
            player.kill();
            deaths.push(fox);
            cursed = Some(fox);
        }
    }

    let wolves_alive = players
        .iter()
        .any(|p| p.is_alive() && p.role() == Role::Werewolf);
    let attack_target = if wolves_alive {
        actions.draw_attack_target(rng)
    } else {
        None
    };

    if let Some(target) = attack_target {
        if let Some(player) = players.get_mut(target.index()).filter(|p| p.is_alive()) {
            let fox_survives = player.role() == Role::Fox && !deaths.contains(&target);
            let guarded = actions.guard_target == Some(target);
            if !fox_survives && !guarded {
                player.kill();
                deaths.push(target);
            }
        }
    }

    let summary = if deaths.is_empty() {
        "no victims last night".to_string()
    } else {
        let names: Vec<&str> = deaths
            .iter()
            .map(|id| players[id.index()].name.as_str())
            .collect();
        format!("{} died", names.join(", "))
    };

    NightOutcome {
        cursed,
        attack_target,
        deaths,
        summary,
    }
}
