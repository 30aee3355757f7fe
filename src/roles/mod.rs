//! Role catalog: the closed set of roles and what each one can do.
//!
//! Roles are plain data. Every capability is answered by an exhaustive
//! `match`, so adding a variant is a compile error until every capability
//! covers it.

pub mod role;

pub use role::{Faction, NightAbility, Role};
