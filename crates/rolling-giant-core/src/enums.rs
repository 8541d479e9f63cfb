//! Enumeration types used throughout the controller.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::UnknownVariant;

/// Top-level behavior state of a creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Roaming and scanning for players.
    #[default]
    Searching,
    /// Pursuing a locked target.
    Chasing,
}

impl BehaviorState {
    /// Wire index used by the host's state-switch protocol.
    pub fn index(self) -> u8 {
        match self {
            Self::Searching => 0,
            Self::Chasing => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Searching),
            1 => Some(Self::Chasing),
            _ => None,
        }
    }
}

/// Behavioral rule set selected once per session.
///
/// Each variant maps "being looked at" onto stopping and aggro accrual
/// differently. See `rolling_giant_ai::variants` for the rules.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum AiVariant {
    /// Stops exactly while observed.
    Coilhead,
    /// Stops while unobserved once aggro, as long as it can see a player.
    InverseCoilhead,
    /// Alternates random wait and move intervals while observed.
    RandomlyMoveWhileLooking,
    /// Being stared at long enough makes aggro permanent.
    LookingTooLongKeepsAgro,
    /// First observation makes aggro permanent.
    FollowOnceAgro,
    /// First observation starts a random countdown, then it chases.
    OnceSeenAgroAfterTimer,
}

impl AiVariant {
    /// Stable numeric id carried by the session selector.
    pub fn id(self) -> u8 {
        match self {
            Self::Coilhead => 0,
            Self::InverseCoilhead => 1,
            Self::RandomlyMoveWhileLooking => 2,
            Self::LookingTooLongKeepsAgro => 3,
            Self::FollowOnceAgro => 4,
            Self::OnceSeenAgroAfterTimer => 5,
        }
    }

    /// Whether the aggro flag and timer survive leaving the chase.
    pub fn preserves_aggro(self) -> bool {
        matches!(self, Self::OnceSeenAgroAfterTimer)
    }
}

impl TryFrom<u8> for AiVariant {
    type Error = UnknownVariant;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Coilhead),
            1 => Ok(Self::InverseCoilhead),
            2 => Ok(Self::RandomlyMoveWhileLooking),
            3 => Ok(Self::LookingTooLongKeepsAgro),
            4 => Ok(Self::FollowOnceAgro),
            5 => Ok(Self::OnceSeenAgroAfterTimer),
            other => Err(UnknownVariant(other)),
        }
    }
}

/// Movement intent chosen by a variant for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionIntent {
    Accelerate,
    Decelerate,
}
