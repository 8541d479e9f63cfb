//! Snapshot system: builds a complete SessionSnapshot from the world.
//!
//! This system is read-only.

use hecs::World;

use rolling_giant_ai::world::SearchRoutine;
use rolling_giant_core::enums::AiVariant;
use rolling_giant_core::events::SessionEvent;
use rolling_giant_core::state::{GiantView, PlayerView, SessionSnapshot};
use rolling_giant_core::types::{Pose, SimTime};

use crate::components::{AreaSearch, Giant, Player};

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    variant: AiVariant,
    events: Vec<SessionEvent>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        variant,
        giants: build_giants(world),
        players: build_players(world),
        events,
    }
}

fn build_giants(world: &World) -> Vec<GiantView> {
    let mut giants: Vec<GiantView> = world
        .query::<(&Giant, &Pose, &AreaSearch)>()
        .iter()
        .map(|(_, (giant, pose, search))| {
            let controller = &giant.controller;
            let flags = controller.flags();
            GiantView {
                id: giant.id,
                position: pose.position,
                state: controller.state(),
                agent_speed: controller.agent().speed,
                velocity: controller.replicated().velocity(),
                scale: controller.scale(),
                too_big: controller.is_too_big(),
                is_aggro: flags.is_aggro,
                was_stopped: flags.was_stopped,
                target: controller.target(),
                timers: controller.timers(),
                searching: search.in_progress(),
                collider_is_trigger: controller.collider_is_trigger(),
            }
        })
        .collect();
    giants.sort_by_key(|g| g.id);
    giants
}

fn build_players(world: &World) -> Vec<PlayerView> {
    let mut players: Vec<PlayerView> = world
        .query::<&Player>()
        .iter()
        .map(|(_, player)| PlayerView {
            id: player.snapshot.id,
            position: player.snapshot.position,
            health: player.health,
            is_dead: player.snapshot.is_dead,
        })
        .collect();
    players.sort_by_key(|p| p.id);
    players
}
