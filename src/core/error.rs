//! Error types returned by session commands.
//!
//! Every command validates before it mutates, so an `Err` always means the
//! session is exactly as it was before the call.

use super::PlayerId;
use crate::roles::Role;
use crate::session::Phase;

/// Malformed setup input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("need at least {min} players, got {count}")]
    TooFewPlayers { count: usize, min: usize },

    #[error("at most {max} players supported, got {count}")]
    TooManyPlayers { count: usize, max: usize },

    #[error("player name must not be blank (seat {0})")]
    BlankName(PlayerId),

    #[error("duplicate player name: {0}")]
    DuplicateName(String),

    #[error("{role} may appear at most once, configured {count}")]
    UniqueRoleRepeated { role: Role, count: usize },

    #[error("werewolf count must be between 1 and {max}, got {count}")]
    WerewolfCount { count: usize, max: usize },

    #[error("{assigned} special roles configured for only {players} players")]
    RolesExceedPlayers { assigned: usize, players: usize },
}

/// A command issued in the wrong phase or against an illegal target.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("command requires phase {expected:?}, session is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("no player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is dead")]
    DeadPlayer(PlayerId),

    #[error("player {0} cannot target themselves")]
    SelfTarget(PlayerId),

    #[error("it is not {actual}'s turn (current turn: {expected:?})")]
    NotYourTurn {
        expected: Option<PlayerId>,
        actual: PlayerId,
    },

    #[error("player {player} holds {role}, which cannot do that")]
    WrongRole { player: PlayerId, role: Role },

    #[error("no turn is pending")]
    NoTurnPending,

    #[error("player {0} must act before the turn can pass")]
    ActionRequired(PlayerId),

    #[error("the seer has already inspected someone tonight")]
    AlreadyInspected,

    #[error("{remaining} living players have not taken their night turn")]
    NightUnfinished { remaining: usize },

    #[error("the game is over")]
    GameOver,
}

/// Any failure a session command can report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid setup: {0}")]
    Validation(#[from] ValidationError),

    #[error("illegal command: {0}")]
    Transition(#[from] TransitionError),
}

/// Result alias for session commands.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::WerewolfCount { count: 3, max: 2 };
        assert_eq!(err.to_string(), "werewolf count must be between 1 and 2, got 3");

        let err: GameError = TransitionError::DeadPlayer(PlayerId::new(1)).into();
        assert_eq!(err.to_string(), "illegal command: player P2 is dead");
    }

    #[test]
    fn test_from_conversions() {
        let err: GameError = ValidationError::DuplicateName("Ann".into()).into();
        assert!(matches!(err, GameError::Validation(ValidationError::DuplicateName(_))));

        let err: GameError = TransitionError::GameOver.into();
        assert_eq!(err, GameError::Transition(TransitionError::GameOver));
    }
}
