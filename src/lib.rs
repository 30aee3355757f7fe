//! # werewolf-core
//!
//! Rules engine for a werewolf-style social deduction game played at one
//! table: roles are dealt in secret, players act at night, and the table
//! votes someone out by day.
//!
//! ## Design Principles
//!
//! 1. **Closed role set**: roles are an enum and every capability is an
//!    exhaustive `match`. There is no runtime "unknown role".
//!
//! 2. **Explicit session**: all state lives in a `GameSession` owned by the
//!    caller. No globals, so any number of sessions can run side by side.
//!
//! 3. **Deterministic**: the only randomness (role shuffle, attack draw)
//!    comes from a seeded ChaCha8 stream, so games replay exactly.
//!
//! ## Architecture
//!
//! The host (a UI, a bot, a test) issues commands one at a time and reads
//! queries to render. The session rejects any command that does not fit
//! its phase and leaves its state untouched when it does. It never decides
//! who may see what; gating the display by viewer is the host's job.
//!
//! ## Modules
//!
//! - `core`: player IDs and records, RNG, configuration, log, errors
//! - `roles`: the role catalog
//! - `session`: phases, night resolution, win evaluation, `GameSession`

pub mod core;
pub mod roles;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameLog, GameResult, GameRng, GameRngState, LogEntry, Player, PlayerId,
    RoleCounts, SessionConfig, TransitionError, ValidationError,
};

pub use crate::roles::{Faction, NightAbility, Role};

pub use crate::session::{Census, GameSession, NightActions, NightOutcome, Phase, WolfVote};
