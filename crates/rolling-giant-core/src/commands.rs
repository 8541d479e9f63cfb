//! Commands sent from the host to a session.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{GiantId, PlayerId};

/// All host-issued actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    // --- Roster ---
    /// Move a player's feet and aim their camera at a point.
    MovePlayer {
        player: PlayerId,
        position: Vec3,
        look_at: Vec3,
    },
    /// Aim a player's camera without moving them.
    LookAt { player: PlayerId, point: Vec3 },
    /// Flag a player as inside (or outside) the safe room.
    SetInSafeRoom { player: PlayerId, inside: bool },
    /// Flag a player as targetable or hidden.
    SetTargetable { player: PlayerId, targetable: bool },

    // --- Creatures ---
    /// Stun a creature for `secs` seconds.
    Stun { giant: GiantId, secs: f32 },
    /// Make a creature leave (daytime end).
    DaytimeLeave { giant: GiantId },
    /// Remove a creature from the session.
    Despawn { giant: GiantId },

    // --- Round ---
    /// End-of-round reset for every creature.
    ResetRound,
}
