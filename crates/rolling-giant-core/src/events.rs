//! Notifications exchanged between participants and events for presentation.

use serde::{Deserialize, Serialize};

use crate::enums::BehaviorState;
use crate::types::{GiantId, ParticipantId, PlayerId};

/// Point-to-point notifications issued by the authority.
///
/// Every receiver applies them idempotently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChaseNotification {
    /// Switch to Chasing and move toward `target`.
    BeginChase { target: PlayerId },
    /// Stop moving toward the target and switch to Searching.
    EndChase,
    /// Mirror a state switch made by the authority.
    SwitchState { state: BehaviorState },
    /// Clear aggro and stop/fear presentation flags.
    ResetFlags,
}

/// Local presentation side effects. The host decides how to render them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    /// Raise the local player's fear to at least `level`.
    Fear { level: f32 },
    /// Play a random stop noise on the creature voice.
    StopNoise,
    /// Damage applied to a player by a collision.
    PlayerHit { player: PlayerId, damage: i32 },
}

/// Event log entry in a session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    Notification {
        giant: GiantId,
        notification: ChaseNotification,
    },
    Presentation {
        giant: GiantId,
        event: PresentationEvent,
    },
    AuthorityRequested {
        giant: GiantId,
        to: ParticipantId,
    },
    PlayerKilled {
        player: PlayerId,
    },
}
