//! Fundamental identifiers, geometric types and time tracking.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::PLAYER_CAMERA_HEIGHT;
use crate::enums::AiVariant;
use crate::error::UnknownVariant;

/// Index of a player in the host's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Network participant that may hold decision authority over a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

/// Handle for a spawned creature within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GiantId(pub u32);

/// Raw variant id as delivered by the session's synchronized selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(pub u8);

impl VariantId {
    pub fn resolve(self) -> Result<AiVariant, UnknownVariant> {
        AiVariant::try_from(self.0)
    }
}

impl From<AiVariant> for VariantId {
    fn from(variant: AiVariant) -> Self {
        Self(variant.id())
    }
}

/// World placement of a creature. +Y is up, +Z is forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Point `height` units above the base.
    pub fn above(&self, height: f32) -> Vec3 {
        self.position + Vec3::Y * height
    }
}

/// Read-only view of one roster entry, refreshed by the host every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    /// Feet position.
    pub position: Vec3,
    /// Gameplay camera position.
    pub camera: Vec3,
    /// Gameplay camera forward direction (unit length).
    pub camera_forward: Vec3,
    pub is_dead: bool,
    pub is_spawned: bool,
    pub is_inside_factory: bool,
    /// Host-side "may be targeted" predicate (e.g. not hidden in a locker).
    pub is_targetable: bool,
    /// Standing inside the designated safe room.
    pub in_safe_room: bool,
}

impl PlayerSnapshot {
    /// Alive, spawned player standing at `position`, looking along +Z.
    pub fn standing(id: PlayerId, position: Vec3) -> Self {
        Self {
            id,
            position,
            camera: position + Vec3::Y * PLAYER_CAMERA_HEIGHT,
            camera_forward: Vec3::Z,
            is_dead: false,
            is_spawned: true,
            is_inside_factory: true,
            is_targetable: true,
            in_safe_room: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_dead && self.is_spawned
    }

    /// Move the feet, keeping the camera at standing height.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.camera = position + Vec3::Y * PLAYER_CAMERA_HEIGHT;
    }

    /// Re-aim the camera at a world point.
    pub fn look_at(&mut self, point: Vec3) {
        let dir = point - self.camera;
        if dir.length_squared() > f32::EPSILON {
            self.camera_forward = dir.normalize();
        }
    }
}

/// Whether `target` lies inside a view cone.
///
/// The cone is `width_deg` measured from `forward` and limited to `range`.
pub fn in_view_cone(origin: Vec3, forward: Vec3, target: Vec3, width_deg: f32, range: f32) -> bool {
    let to_target = target - origin;
    let distance = to_target.length();
    if distance >= range {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }
    forward.angle_between(to_target).to_degrees() < width_deg
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each frame).
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per frame at the default frame rate.
    pub fn dt(&self) -> f32 {
        crate::constants::FRAME_DT
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.elapsed_secs += self.dt() as f64;
    }
}
