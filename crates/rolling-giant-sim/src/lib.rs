//! Headless reference host for the Rolling Giant controller.
//!
//! Owns a hecs ECS world of players, creatures and occluders, drives the
//! controller through a tick-source adapter, and produces
//! `SessionSnapshot`s. No engine dependency, so sessions are deterministic
//! for a given seed.

pub mod adapter;
pub mod components;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{Session, SessionConfig};
pub use rolling_giant_core as core;
