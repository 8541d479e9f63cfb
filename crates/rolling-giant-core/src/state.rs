//! Creature state: the replicated single-writer store, per-participant
//! presentation flags, and the per-tick session snapshot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AiVariant, BehaviorState};
use crate::error::AuthorityError;
use crate::events::SessionEvent;
use crate::types::{GiantId, ParticipantId, PlayerId, SimTime};

/// The four variant timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerValues {
    pub wait: f32,
    pub movement: f32,
    pub look: f32,
    /// Normalized (0..=1) or seconds, depending on the variant.
    pub aggro: f32,
}

/// Proof that the holder owned the creature when the token was issued.
///
/// Only [`ReplicatedState::authority`] creates tokens.
#[derive(Debug)]
pub struct AuthorityToken {
    holder: ParticipantId,
}

impl AuthorityToken {
    pub fn holder(&self) -> ParticipantId {
        self.holder
    }
}

/// Replicated numeric state: written by the owner, read by everyone.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicatedState {
    owner: ParticipantId,
    version: u64,
    velocity: f32,
    timers: TimerValues,
}

/// Wire form of [`ReplicatedState`] broadcast by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedSnapshot {
    pub owner: ParticipantId,
    pub version: u64,
    pub velocity: f32,
    pub timers: TimerValues,
}

impl ReplicatedState {
    pub fn new(owner: ParticipantId) -> Self {
        Self {
            owner,
            version: 0,
            velocity: 0.0,
            timers: TimerValues::default(),
        }
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn timers(&self) -> TimerValues {
        self.timers
    }

    /// Issue a write token if `local` currently owns the creature.
    pub fn authority(&self, local: ParticipantId) -> Option<AuthorityToken> {
        (self.owner == local).then_some(AuthorityToken { holder: local })
    }

    /// Open a writer. Fails if ownership moved since the token was issued.
    pub fn writer(&mut self, token: &AuthorityToken) -> Result<ReplicatedWriter<'_>, AuthorityError> {
        if token.holder != self.owner {
            return Err(AuthorityError::StaleToken {
                holder: token.holder,
                owner: self.owner,
            });
        }
        Ok(ReplicatedWriter { state: self })
    }

    /// Record an ownership change decided by the host.
    pub fn transfer(&mut self, to: ParticipantId) {
        self.owner = to;
    }

    pub fn snapshot(&self) -> ReplicatedSnapshot {
        ReplicatedSnapshot {
            owner: self.owner,
            version: self.version,
            velocity: self.velocity,
            timers: self.timers,
        }
    }

    /// Accept a newer snapshot from the owner. Returns whether it was applied.
    ///
    /// The local owner never overwrites its own values with remote ones.
    pub fn apply_snapshot(&mut self, local: ParticipantId, snapshot: &ReplicatedSnapshot) -> bool {
        if self.owner == local || snapshot.version <= self.version {
            return false;
        }
        self.owner = snapshot.owner;
        self.version = snapshot.version;
        self.velocity = snapshot.velocity;
        self.timers = snapshot.timers;
        true
    }
}

/// Mutable access to replicated values for the owner. Every set bumps the version.
pub struct ReplicatedWriter<'a> {
    state: &'a mut ReplicatedState,
}

impl ReplicatedWriter<'_> {
    pub fn set_velocity(&mut self, velocity: f32) -> &mut Self {
        self.state.velocity = velocity;
        self.bump()
    }

    pub fn set_timers(&mut self, timers: TimerValues) -> &mut Self {
        self.state.timers = timers;
        self.bump()
    }

    pub fn clear_all_timers(&mut self) -> &mut Self {
        self.state.timers = TimerValues::default();
        self.bump()
    }

    fn bump(&mut self) -> &mut Self {
        self.state.version += 1;
        self
    }
}

/// Presentation and short-circuit flags. Never replicated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFlags {
    pub is_aggro: bool,
    pub was_stopped: bool,
    pub was_feared: bool,
    pub wants_to_chase: bool,
    /// Chasing entry actions have run for the current chase.
    pub entered_chase: bool,
    pub moving_toward_target: bool,
}

/// Per-creature view inside a [`SessionSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiantView {
    pub id: GiantId,
    pub position: Vec3,
    pub state: BehaviorState,
    pub agent_speed: f32,
    pub velocity: f32,
    pub scale: f32,
    pub too_big: bool,
    pub is_aggro: bool,
    pub was_stopped: bool,
    pub target: Option<PlayerId>,
    pub timers: TimerValues,
    pub searching: bool,
    pub collider_is_trigger: bool,
}

/// Per-player view inside a [`SessionSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Vec3,
    pub health: i32,
    pub is_dead: bool,
}

/// Complete observable state of a session after one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub variant: AiVariant,
    pub giants: Vec<GiantView>,
    pub players: Vec<PlayerView>,
    /// Events raised during this tick.
    pub events: Vec<SessionEvent>,
}
