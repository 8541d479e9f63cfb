//! Error types shared by the controller crates.
//!
//! None of these escape a host-callable entry point: the controller logs
//! them and degrades to a no-op.

use thiserror::Error;

use crate::types::ParticipantId;

/// Variant id received from the session selector that this build does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown ai variant id {0}")]
pub struct UnknownVariant(pub u8);

/// Rejected write to replicated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("participant {holder:?} holds a token but {owner:?} owns the creature")]
    StaleToken {
        holder: ParticipantId,
        owner: ParticipantId,
    },
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field}: min {min} exceeds max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("variant pool is empty")]
    EmptyVariantPool,
}
