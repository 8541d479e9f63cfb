//! Entity spawn factories for the session world.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rolling_giant_ai::controller::SpawnParams;
use rolling_giant_ai::CreatureController;
use rolling_giant_core::config::GiantConfig;
use rolling_giant_core::constants::PLAYER_MAX_HEALTH;
use rolling_giant_core::types::{GiantId, ParticipantId, PlayerId, PlayerSnapshot, Pose, VariantId};

use crate::components::{AreaSearch, Giant, NavAgent, Occluder, Player};

/// Spawn a living player standing at `position`.
pub fn spawn_player(
    world: &mut World,
    id: PlayerId,
    position: Vec3,
    inside_factory: bool,
) -> hecs::Entity {
    let snapshot = PlayerSnapshot {
        is_inside_factory: inside_factory,
        ..PlayerSnapshot::standing(id, position)
    };
    world.spawn((Player {
        snapshot,
        health: PLAYER_MAX_HEALTH,
    },))
}

/// Who owns a new giant and where this session runs.
#[derive(Debug, Clone, Copy)]
pub struct Ownership {
    pub owner: ParticipantId,
    pub local: ParticipantId,
}

/// Spawn a giant with a scale drawn from the configured range.
#[allow(clippy::too_many_arguments)]
pub fn spawn_giant(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GiantConfig,
    id: GiantId,
    position: Vec3,
    is_outside: bool,
    variant: VariantId,
    ownership: Ownership,
) -> hecs::Entity {
    let scale = config.scale_range(is_outside).lerp(rng.gen::<f32>());
    let controller = CreatureController::new(SpawnParams {
        is_outside,
        scale,
        variant,
        owner: ownership.owner,
        local: ownership.local,
        settings: config.shared.clone(),
    });
    world.spawn((
        Giant { id, controller },
        Pose::at(position),
        NavAgent::default(),
        AreaSearch::default(),
    ))
}

/// Spawn a sightline-blocking box.
pub fn spawn_occluder(world: &mut World, min: Vec3, max: Vec3) -> hecs::Entity {
    world.spawn((Occluder {
        min: min.min(max),
        max: min.max(max),
    },))
}
