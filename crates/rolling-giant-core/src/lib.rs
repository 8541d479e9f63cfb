//! Core types and definitions for the Rolling Giant controller.
//!
//! This crate defines the vocabulary shared across all other crates:
//! configuration, replicated state, notifications, commands and constants.
//! It has no dependency on any host engine or runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
