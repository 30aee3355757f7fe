//! The game session state machine.
//!
//! - `phase`: the phases and their order
//! - `night`: night actions and the resolution algorithm
//! - `victory`: win evaluation from the alive flags
//! - `game`: `GameSession`, the command/query surface a host drives

pub mod phase;
pub mod night;
pub mod victory;
pub mod game;

pub use phase::Phase;
pub use night::{NightActions, NightOutcome, WolfVote};
pub use victory::Census;
pub use game::GameSession;
