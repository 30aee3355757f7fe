//! Core session types: players, RNG, configuration, log, errors.
//!
//! These are the building blocks the session state machine is made of.
//! None of them know about phases.

pub mod player;
pub mod rng;
pub mod config;
pub mod log;
pub mod error;

pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use config::{RoleCounts, SessionConfig};
pub use log::{GameLog, LogEntry};
pub use error::{GameError, GameResult, TransitionError, ValidationError};
