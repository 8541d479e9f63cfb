//! ECS systems that operate on the session world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` for read-only).
//! All state lives in components.

pub mod ai;
pub mod collision;
pub mod movement;
pub mod network;
pub mod perception;
pub mod search;
pub mod snapshot;
