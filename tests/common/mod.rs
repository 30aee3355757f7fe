//! Shared helpers for driving a session through whole phases.

#![allow(dead_code)]

use werewolf_core::{GameSession, Phase, PlayerId, Role, RoleCounts, SessionConfig};

/// Names `P0`, `P1`, ... for a table of `n`.
pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

/// A session that has dealt roles and finished the reveal, sitting in Day 1.
pub fn started(seed: u64, player_count: usize, counts: &RoleCounts) -> GameSession {
    let config = SessionConfig::default().with_seed(seed).with_max_players(64);
    let mut session = GameSession::new(config);
    session.start_setup().unwrap();
    session.setup_game(&names(player_count)[..], counts).unwrap();
    while let Some(player) = session.current_turn() {
        session.advance_role_reveal(player).unwrap();
    }
    assert_eq!(session.phase(), Phase::Day);
    session
}

/// Seats holding `role`, in seat order.
pub fn seats_of(session: &GameSession, role: Role) -> Vec<PlayerId> {
    session
        .players()
        .iter()
        .filter(|p| p.role() == role)
        .map(|p| p.id)
        .collect()
}

/// The single seat holding `role`.
pub fn seat_of(session: &GameSession, role: Role) -> PlayerId {
    let seats = seats_of(session, role);
    assert_eq!(seats.len(), 1, "expected exactly one {role}");
    seats[0]
}

/// Choices for one night. Unset choices fall back to harmless defaults:
/// werewolves must vote, so `attack` is required whenever a wolf is alive.
#[derive(Clone, Debug, Default)]
pub struct NightPlan {
    /// Target for every werewolf, with confidence.
    pub attack: Option<(PlayerId, bool)>,
    /// Seer target; defaults to the first living non-Fox other than the Seer.
    pub inspect: Option<PlayerId>,
    /// Guard target; defaults to the Guard.
    pub protect: Option<PlayerId>,
}

/// Vote, skip or execute to get from Day into Night.
pub fn day_to_night(session: &mut GameSession, execute: Option<PlayerId>) {
    session.advance_to_vote().unwrap();
    match execute {
        Some(target) => session.execute_vote(target).unwrap(),
        None => session.skip_vote().unwrap(),
    }
    assert_eq!(session.evaluate_result().unwrap(), None);
    session.advance_to_next_night().unwrap();
}

/// Play every night turn according to `plan`, then resolve.
pub fn play_night(session: &mut GameSession, plan: &NightPlan) -> String {
    while let Some(player) = session.current_turn() {
        let role = session.player_by_index(player).unwrap().role();
        match role {
            Role::Werewolf => {
                let (target, confident) = plan.attack.expect("plan needs an attack target");
                session.submit_wolf_vote(player, target, confident).unwrap();
            }
            Role::Seer => {
                let target = plan.inspect.unwrap_or_else(|| {
                    session
                        .alive_players()
                        .find(|p| p.id != player && p.role() != Role::Fox)
                        .map(|p| p.id)
                        .unwrap()
                });
                session.submit_seer_action(player, target).unwrap();
            }
            Role::Guard => {
                let target = plan.protect.unwrap_or(player);
                session.submit_guard_action(player, target).unwrap();
            }
            _ => {}
        }
        session.advance_night_cursor().unwrap();
    }
    session.resolve_night().unwrap()
}
