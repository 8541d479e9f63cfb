//! Decision core for the Rolling Giant.
//!
//! Implements the searching/chasing state machine, the per-session variant
//! strategies, motion ramps and target selection. Host services are reached
//! only through the traits in [`world`].

pub mod controller;
pub mod fsm;
pub mod motion;
pub mod random;
pub mod targeting;
pub mod variants;
pub mod world;

pub use controller::CreatureController;
pub use rolling_giant_core as core;

#[cfg(test)]
mod tests;
