//! The game session: one table, one game at a time.
//!
//! `GameSession` owns every player record and the night's pending actions.
//! The host drives it one command at a time and renders the queries; the
//! session refuses any command that does not fit the current phase.
//!
//! ## Turns
//!
//! RoleReveal and Night are played one player at a time. The turn cursor
//! walks every seat during RoleReveal and only the living seats at night.
//! At night, commands are accepted from the player holding the turn;
//! recording an action does not pass the turn, `advance_night_cursor` does,
//! and it refuses to pass a Werewolf, Seer or Guard turn with nothing
//! recorded.
//!
//! ## Example
//!
//! ```
//! use werewolf_core::{GameSession, Phase, RoleCounts, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::default().with_seed(5));
//! session.start_setup().unwrap();
//! session
//!     .setup_game(&["Ann", "Ben", "Cat", "Dan"], &RoleCounts::default())
//!     .unwrap();
//!
//! while let Some(player) = session.current_turn() {
//!     session.advance_role_reveal(player).unwrap();
//! }
//! assert_eq!(session.phase(), Phase::Day);
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::night::{self, NightActions, NightOutcome, WolfVote};
use super::phase::Phase;
use super::victory;
use crate::core::{
    GameError, GameLog, GameResult, GameRng, GameRngState, LogEntry, Player, PlayerId, RoleCounts,
    SessionConfig, TransitionError, ValidationError,
};
use crate::roles::{Faction, NightAbility, Role};

/// One game table and everything happening at it.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    phase: Phase,
    day_count: u32,
    players: Vec<Player>,
    cursor: usize,
    night: NightActions,
    last_night_summary: String,
    last_executed: Option<PlayerId>,
    winner: Option<Faction>,
    log: GameLog,
    role_rng: GameRng,
    night_rng: GameRng,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// Create an idle session in the menu.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let root = GameRng::new(config.seed);
        Self {
            phase: Phase::Menu,
            day_count: 1,
            players: Vec::new(),
            cursor: 0,
            night: NightActions::new(),
            last_night_summary: String::new(),
            last_executed: None,
            winner: None,
            log: GameLog::new(config.log_capacity),
            role_rng: root.for_context("roles"),
            night_rng: root.for_context("night"),
            config,
        }
    }

    // === Menu / Setup ===

    /// Leave the menu to configure a new game.
    pub fn start_setup(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Menu)?;
        self.phase = Phase::Setup;
        info!("entering setup");
        Ok(())
    }

    /// Discard the current game and return to the menu. Always succeeds.
    ///
    /// The random streams keep running, so the next game deals differently.
    pub fn reset_to_menu(&mut self) {
        self.phase = Phase::Menu;
        self.day_count = 1;
        self.players.clear();
        self.cursor = 0;
        self.night.clear();
        self.last_night_summary.clear();
        self.last_executed = None;
        self.winner = None;
        self.log.clear();
        info!("session reset to menu");
    }

    /// Seat the players and deal their roles.
    ///
    /// Names are seated in order at increasing indices; roles are drawn by
    /// shuffling the full role multiset, villagers included.
    pub fn setup_game<S: AsRef<str>>(&mut self, names: &[S], counts: &RoleCounts) -> GameResult<()> {
        self.expect_phase(Phase::Setup)?;
        self.validate_names(names)?;
        counts.validate(names.len())?;

        let mut roles = counts.deal(names.len());
        self.role_rng.shuffle(&mut roles);

        self.players = PlayerId::all(names.len())
            .zip(names.iter().zip(roles))
            .map(|(id, (name, role))| Player::new(id, name.as_ref().trim(), role))
            .collect();
        self.day_count = 1;
        self.cursor = 0;
        self.night.clear();
        self.last_night_summary.clear();
        self.last_executed = None;
        self.winner = None;
        self.log.clear();
        self.push_log("game started");
        self.phase = Phase::RoleReveal;

        info!(players = self.players.len(), werewolves = counts.werewolf, "game started");
        Ok(())
    }

    fn validate_names<S: AsRef<str>>(&self, names: &[S]) -> Result<(), ValidationError> {
        let count = names.len();
        if count < self.config.min_players {
            return Err(ValidationError::TooFewPlayers {
                count,
                min: self.config.min_players,
            });
        }
        let max = self.config.max_players.min(u8::MAX as usize);
        if count > max {
            return Err(ValidationError::TooManyPlayers { count, max });
        }

        let mut seen = FxHashSet::default();
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ValidationError::BlankName(PlayerId::new(i as u8)));
            }
            if !seen.insert(name) {
                return Err(ValidationError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Change a seated player's display name. Identity and role are kept.
    pub fn rename_player(&mut self, player: PlayerId, name: &str) -> GameResult<()> {
        let name = name.trim();
        self.player_checked(player)?;
        if name.is_empty() {
            return Err(ValidationError::BlankName(player).into());
        }
        if self.players.iter().any(|p| p.id != player && p.name == name) {
            return Err(ValidationError::DuplicateName(name.to_string()).into());
        }
        self.players[player.index()].name = name.to_string();
        Ok(())
    }

    // === RoleReveal ===

    /// The player holding the turn, during RoleReveal and Night.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        if !self.phase.has_turns() {
            return None;
        }
        if self.phase == Phase::RoleReveal {
            self.players.get(self.cursor).map(|p| p.id)
        } else {
            self.night_order().get(self.cursor).copied()
        }
    }

    /// Show the player holding the reveal turn their own role.
    pub fn revealed_role(&self, player: PlayerId) -> GameResult<Role> {
        self.expect_phase(Phase::RoleReveal)?;
        self.expect_turn(player)?;
        Ok(self.players[player.index()].role())
    }

    /// Confirm that `player` has seen their role and pass the turn.
    pub fn advance_role_reveal(&mut self, player: PlayerId) -> GameResult<()> {
        self.expect_phase(Phase::RoleReveal)?;
        self.expect_turn(player)?;

        self.cursor += 1;
        debug!(%player, "role confirmed");
        if self.cursor >= self.players.len() {
            self.push_log("all roles confirmed");
            self.phase = Phase::Day;
            self.cursor = 0;
            info!("all roles confirmed, day begins");
        }
        Ok(())
    }

    // === Night ===

    /// Record a werewolf's attack vote, replacing any earlier vote tonight.
    pub fn submit_wolf_vote(&mut self, wolf: PlayerId, target: PlayerId, confident: bool) -> GameResult<()> {
        self.night_actor(wolf, NightAbility::Attack)?;
        self.living_target(target)?;
        if wolf == target {
            return Err(TransitionError::SelfTarget(wolf).into());
        }

        let replaced = self.night.record_wolf_vote(wolf, WolfVote { target, confident });
        debug!(%wolf, %target, confident, revote = replaced.is_some(), "wolf vote recorded");
        Ok(())
    }

    /// Inspect `target` and return the faction the Seer reads.
    ///
    /// Inspecting the Fox curses it; it dies when the night resolves.
    pub fn submit_seer_action(&mut self, seer: PlayerId, target: PlayerId) -> GameResult<Faction> {
        self.night_actor(seer, NightAbility::Inspect)?;
        self.living_target(target)?;
        if seer == target {
            return Err(TransitionError::SelfTarget(seer).into());
        }
        if self.night.seer_target.is_some() {
            return Err(TransitionError::AlreadyInspected.into());
        }

        let role = self.players[target.index()].role();
        let faction = self.night.record_inspection(target, role);
        debug!(%seer, %target, %faction, curse = self.night.seer_causes_curse.is_some(), "seer inspected");
        Ok(faction)
    }

    /// Protect `target` from tonight's attack. The Guard may pick themselves.
    pub fn submit_guard_action(&mut self, guard: PlayerId, target: PlayerId) -> GameResult<()> {
        self.night_actor(guard, NightAbility::Protect)?;
        self.living_target(target)?;

        self.night.record_protection(target);
        debug!(%guard, %target, "guard protecting");
        Ok(())
    }

    /// "`name`: `identity`" for the most recently executed player, if any.
    #[must_use]
    pub fn query_medium_report(&self) -> Option<String> {
        let player = self.players.get(self.last_executed?.index())?;
        Some(format!("{}: {}", player.name, player.role().medium_identity()))
    }

    /// What the Seer read tonight, as (target, faction).
    #[must_use]
    pub fn seer_reading(&self) -> Option<(PlayerId, Faction)> {
        self.night.seer_target.zip(self.night.seer_reading)
    }

    /// Pass the night turn to the next living player.
    pub fn advance_night_cursor(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Night)?;
        let current = self.current_turn().ok_or(TransitionError::NoTurnPending)?;

        let role = self.players[current.index()].role();
        if let Some(ability) = role.night_ability() {
            if ability.is_required() && !self.night.has_acted(current, ability) {
                return Err(TransitionError::ActionRequired(current).into());
            }
        }

        self.cursor += 1;
        debug!(player = %current, "night turn done");
        Ok(())
    }

    /// Living players still to take their night turn.
    #[must_use]
    pub fn night_turns_remaining(&self) -> usize {
        if self.phase != Phase::Night {
            return 0;
        }
        self.night_order().len().saturating_sub(self.cursor)
    }

    /// Apply the night's actions and start the next day.
    ///
    /// Returns the morning summary.
    pub fn resolve_night(&mut self) -> GameResult<String> {
        self.resolve_night_outcome().map(|outcome| outcome.summary)
    }

    /// Like `resolve_night`, returning the full outcome.
    pub fn resolve_night_outcome(&mut self) -> GameResult<NightOutcome> {
        self.expect_phase(Phase::Night)?;
        let remaining = self.night_turns_remaining();
        if remaining > 0 {
            return Err(TransitionError::NightUnfinished { remaining }.into());
        }

        let outcome = night::resolve(&mut self.players, &self.night, &mut self.night_rng);
        self.night.clear();

        self.last_night_summary = outcome.summary.clone();
        self.push_log(outcome.summary.clone());
        self.push_log(format!("day {} dawns", self.day_count + 1));
        self.day_count += 1;
        self.phase = Phase::Day;
        self.cursor = 0;

        info!(
            day = self.day_count,
            deaths = outcome.deaths.len(),
            attack_target = ?outcome.attack_target,
            "night resolved"
        );
        Ok(outcome)
    }

    // === Day / Vote ===

    /// Close the morning summary and open the vote.
    pub fn advance_to_vote(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Day)?;
        self.phase = Phase::Vote;
        debug!("vote opened");
        Ok(())
    }

    /// Execute a living player.
    pub fn execute_vote(&mut self, target: PlayerId) -> GameResult<()> {
        self.expect_phase(Phase::Vote)?;
        self.living_target(target)?;

        let player = &mut self.players[target.index()];
        player.kill();
        let message = format!("{} was executed", player.name);
        self.last_executed = Some(target);
        self.push_log(message);
        self.phase = Phase::Result;

        info!(%target, "player executed");
        Ok(())
    }

    /// End the vote without an execution. The last execution stays on record
    /// for the Medium.
    pub fn skip_vote(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Vote)?;
        self.push_log("no execution");
        self.phase = Phase::Result;
        info!("vote skipped");
        Ok(())
    }

    // === Result ===

    /// Check for a winner.
    ///
    /// A winner ends the game; asking again afterwards returns the same
    /// winner.
    pub fn evaluate_result(&mut self) -> GameResult<Option<Faction>> {
        if self.phase == Phase::Terminal {
            return Ok(self.winner);
        }
        self.expect_phase(Phase::Result)?;

        let winner = victory::evaluate(&self.players);
        if let Some(faction) = winner {
            self.winner = Some(faction);
            self.push_log(format!("{} wins", faction.label()));
            self.phase = Phase::Terminal;
            info!(%faction, "game over");
        }
        Ok(winner)
    }

    /// Start the next night. Refused once somebody has won.
    pub fn advance_to_next_night(&mut self) -> GameResult<()> {
        if self.phase == Phase::Terminal {
            return Err(TransitionError::GameOver.into());
        }
        self.expect_phase(Phase::Result)?;
        if victory::evaluate(&self.players).is_some() {
            return Err(TransitionError::GameOver.into());
        }

        self.night.clear();
        self.cursor = 0;
        self.phase = Phase::Night;
        info!(day = self.day_count, "night falls");
        Ok(())
    }

    // === Checkpoints ===

    /// Positions of the role and night streams, in that order.
    ///
    /// Saved alongside the host's own record of the table, these let a
    /// restored session deal and draw exactly as the original would have.
    #[must_use]
    pub fn rng_states(&self) -> (GameRngState, GameRngState) {
        (self.role_rng.state(), self.night_rng.state())
    }

    /// Rewind or fast-forward both streams to saved positions.
    ///
    /// Only the random streams change; players, phase and log are untouched.
    pub fn restore_rng_states(&mut self, roles: &GameRngState, night: &GameRngState) {
        self.role_rng = GameRng::from_state(roles);
        self.night_rng = GameRng::from_state(night);
        debug!(roles_pos = ?roles.word_pos, night_pos = ?night.word_pos, "rng streams restored");
    }

    // === Queries ===

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Day counter, starting at 1 and incremented by each resolved night.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Every seat, in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by seat.
    #[must_use]
    pub fn player_by_index(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player.index())
    }

    /// Living players, in seat order.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Living werewolves, in seat order. Shown to werewolves so they know
    /// their pack.
    pub fn alive_werewolves(&self) -> impl Iterator<Item = &Player> {
        self.alive_players().filter(|p| p.role() == Role::Werewolf)
    }

    /// Legal attack targets for `wolf`: every living player but the wolf.
    #[must_use]
    pub fn attack_targets(&self, wolf: PlayerId) -> Vec<PlayerId> {
        self.alive_players().map(|p| p.id).filter(|&id| id != wolf).collect()
    }

    /// Legal inspection targets for `seer`: every living player but the Seer.
    #[must_use]
    pub fn inspect_targets(&self, seer: PlayerId) -> Vec<PlayerId> {
        self.attack_targets(seer)
    }

    /// Legal protection targets: every living player, the Guard included.
    #[must_use]
    pub fn protect_targets(&self) -> Vec<PlayerId> {
        self.alive_players().map(|p| p.id).collect()
    }

    /// Tonight's recorded actions.
    #[must_use]
    pub fn night_actions(&self) -> &NightActions {
        &self.night
    }

    /// Announcement from the most recent night.
    #[must_use]
    pub fn last_night_summary(&self) -> &str {
        &self.last_night_summary
    }

    /// Most recently executed player. Survives skipped votes.
    #[must_use]
    pub fn last_executed(&self) -> Option<PlayerId> {
        self.last_executed
    }

    /// Winner, once declared.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    /// The game log.
    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// The `n` most recent log entries, oldest first.
    pub fn recent_log(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.log.recent(n)
    }

    // === Helpers ===

    fn push_log(&mut self, message: impl Into<String>) {
        self.log.push(self.day_count, message);
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), TransitionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn expect_turn(&self, player: PlayerId) -> Result<(), TransitionError> {
        let expected = self.current_turn();
        if expected == Some(player) {
            Ok(())
        } else {
            Err(TransitionError::NotYourTurn {
                expected,
                actual: player,
            })
        }
    }

    fn player_checked(&self, player: PlayerId) -> Result<&Player, TransitionError> {
        self.players
            .get(player.index())
            .ok_or(TransitionError::UnknownPlayer(player))
    }

    fn living_target(&self, target: PlayerId) -> Result<&Player, TransitionError> {
        let player = self.player_checked(target)?;
        if player.is_alive() {
            Ok(player)
        } else {
            Err(TransitionError::DeadPlayer(target))
        }
    }

    /// Validate a night command from `actor` using `ability`.
    fn night_actor(&self, actor: PlayerId, ability: NightAbility) -> Result<&Player, GameError> {
        self.expect_phase(Phase::Night)?;
        let player = self.living_target(actor)?;
        self.expect_turn(actor)?;
        if player.role().night_ability() != Some(ability) {
            return Err(TransitionError::WrongRole {
                player: actor,
                role: player.role(),
            }
            .into());
        }
        Ok(player)
    }

    /// Living seats in seat order; the night cursor walks this list.
    fn night_order(&self) -> Vec<PlayerId> {
        self.alive_players().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in_setup() -> GameSession {
        let mut session = GameSession::new(SessionConfig::default().with_seed(1));
        session.start_setup().unwrap();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::default();
        assert_eq!(session.phase(), Phase::Menu);
        assert_eq!(session.day_count(), 1);
        assert!(session.players().is_empty());
        assert_eq!(session.current_turn(), None);
    }

    #[test]
    fn test_setup_requires_setup_phase() {
        let mut session = GameSession::default();
        let err = session
            .setup_game(&["A", "B", "C", "D"], &RoleCounts::default())
            .unwrap_err();
        assert_eq!(
            err,
            GameError::Transition(TransitionError::WrongPhase {
                expected: Phase::Setup,
                actual: Phase::Menu
            })
        );
    }

    #[test]
    fn test_setup_validates_names() {
        let mut session = session_in_setup();

        let err = session.setup_game(&["A", "B", "C"], &RoleCounts::default()).unwrap_err();
        assert_eq!(err, GameError::from(ValidationError::TooFewPlayers { count: 3, min: 4 }));

        let err = session.setup_game(&["A", "B", "A", "D"], &RoleCounts::default()).unwrap_err();
        assert_eq!(err, GameError::from(ValidationError::DuplicateName("A".into())));

        let err = session.setup_game(&["A", " ", "C", "D"], &RoleCounts::default()).unwrap_err();
        assert_eq!(err, GameError::from(ValidationError::BlankName(PlayerId::new(1))));

        let twelve: Vec<String> = (0..12).map(|i| format!("P{i}")).collect();
        let err = session.setup_game(&twelve[..], &RoleCounts::default()).unwrap_err();
        assert_eq!(err, GameError::from(ValidationError::TooManyPlayers { count: 12, max: 11 }));

        // Nothing changed.
        assert_eq!(session.phase(), Phase::Setup);
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_setup_seats_players_in_order() {
        let mut session = session_in_setup();
        session
            .setup_game(&["Ann", "Ben", "Cat", "Dan", "Eve"], &RoleCounts::default())
            .unwrap();

        assert_eq!(session.phase(), Phase::RoleReveal);
        let names: Vec<_> = session.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben", "Cat", "Dan", "Eve"]);
        let ids: Vec<_> = session.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, PlayerId::all(5).collect::<Vec<_>>());
        assert!(session.players().iter().all(Player::is_alive));
        assert_eq!(session.current_turn(), Some(PlayerId::new(0)));
        assert_eq!(session.log().iter().next().unwrap().message, "game started");
    }

    #[test]
    fn test_role_reveal_walks_every_seat() {
        let mut session = session_in_setup();
        session.setup_game(&["A", "B", "C", "D"], &RoleCounts::default()).unwrap();

        let err = session.advance_role_reveal(PlayerId::new(2)).unwrap_err();
        assert!(matches!(err, GameError::Transition(TransitionError::NotYourTurn { .. })));

        for i in 0..4 {
            let id = PlayerId::new(i);
            let role = session.revealed_role(id).unwrap();
            assert_eq!(role, session.players()[i as usize].role());
            session.advance_role_reveal(id).unwrap();
        }

        assert_eq!(session.phase(), Phase::Day);
        assert_eq!(session.current_turn(), None);
        let last = session.recent_log(1).next().unwrap();
        assert_eq!(last.message, "all roles confirmed");
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut session = session_in_setup();
        session.setup_game(&["A", "B", "C", "D"], &RoleCounts::default()).unwrap();
        let role = session.players()[1].role();

        session.rename_player(PlayerId::new(1), "Bea").unwrap();
        assert_eq!(session.players()[1].name, "Bea");
        assert_eq!(session.players()[1].role(), role);

        let err = session.rename_player(PlayerId::new(1), "C").unwrap_err();
        assert_eq!(err, GameError::from(ValidationError::DuplicateName("C".into())));

        let err = session.rename_player(PlayerId::new(9), "Zed").unwrap_err();
        assert_eq!(err, GameError::from(TransitionError::UnknownPlayer(PlayerId::new(9))));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut session = session_in_setup();
        session.setup_game(&["A", "B", "C", "D"], &RoleCounts::default()).unwrap();

        session.reset_to_menu();

        assert_eq!(session.phase(), Phase::Menu);
        assert!(session.players().is_empty());
        assert!(session.log().is_empty());
        assert_eq!(session.winner(), None);
        assert_eq!(session.last_executed(), None);
        assert_eq!(session.current_turn(), None);
    }

    #[test]
    fn test_turns_only_in_turn_phases() {
        let mut session = session_in_setup();
        assert_eq!(session.current_turn(), None);
        session.setup_game(&["A", "B", "C", "D"], &RoleCounts::default()).unwrap();
        assert_eq!(session.current_turn(), Some(PlayerId::new(0)));

        for i in 0..4 {
            session.advance_role_reveal(PlayerId::new(i)).unwrap();
        }
        assert!(!session.phase().has_turns());
        assert_eq!(session.current_turn(), None);
        assert_eq!(session.night_turns_remaining(), 0);
    }

    #[test]
    fn test_restored_streams_deal_the_same_roles() {
        let mut session = session_in_setup();
        let (roles, night) = session.rng_states();
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];

        session.setup_game(&names, &RoleCounts::default()).unwrap();
        let first: Vec<_> = session.players().iter().map(Player::role).collect();

        session.reset_to_menu();
        session.start_setup().unwrap();
        session.restore_rng_states(&roles, &night);
        session.setup_game(&names, &RoleCounts::default()).unwrap();
        let second: Vec<_> = session.players().iter().map(Player::role).collect();

        assert_eq!(first, second);
        assert_eq!(session.rng_states().1, night);
    }
}
