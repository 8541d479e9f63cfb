//! Area search: wander between random waypoints until timed out or stopped.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rolling_giant_ai::world::SearchRoutine;
use rolling_giant_core::constants::{SEARCH_RADIUS, WAYPOINT_REACHED_DISTANCE};
use rolling_giant_core::types::Pose;

use crate::components::AreaSearch;

/// Advance running searches: count down and pick a new waypoint once the
/// current one is reached.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, half_extent: f32, dt: f32) {
    for (_entity, (search, pose)) in world.query_mut::<(&mut AreaSearch, &Pose)>() {
        if !search.in_progress() {
            continue;
        }

        search.remaining_secs -= dt;
        if search.remaining_secs <= 0.0 {
            search.stop();
            debug!(origin = ?search.origin, "area search timed out");
            continue;
        }

        let reached = search.waypoint.map_or(true, |waypoint| {
            horizontal_distance(pose.position, waypoint) < WAYPOINT_REACHED_DISTANCE
        });
        if reached {
            search.waypoint = Some(pick_waypoint(search.origin, rng, half_extent));
        }
    }
}

fn pick_waypoint(origin: Vec3, rng: &mut ChaCha8Rng, half_extent: f32) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(0.0..SEARCH_RADIUS);
    Vec3::new(
        (origin.x + angle.cos() * distance).clamp(-half_extent, half_extent),
        0.0,
        (origin.z + angle.sin() * distance).clamp(-half_extent, half_extent),
    )
}

pub(crate) fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    (d.x * d.x + d.z * d.z).sqrt()
}
