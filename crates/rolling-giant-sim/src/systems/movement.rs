//! Navigation agent integration.
//!
//! Moves each giant toward its destination at the speed the controller
//! asks for, limited by the agent's acceleration. The resulting speed is
//! what the controller measures next frame.

use glam::Vec3;
use hecs::World;

use rolling_giant_ai::motion::face_toward;
use rolling_giant_ai::world::WorldQuery;
use rolling_giant_ai::CreatureController;
use rolling_giant_core::constants::{ARRIVAL_DISTANCE, TRIGGER_SPEED_THRESHOLD};
use rolling_giant_core::enums::BehaviorState;
use rolling_giant_core::types::Pose;

use crate::components::{AreaSearch, Giant, NavAgent};
use crate::systems::perception::WorldView;
use crate::systems::search::horizontal_distance;

pub fn run(world: &mut World, view: &WorldView, half_extent: f32, dt: f32) {
    for (_entity, (giant, pose, agent, search)) in
        world.query_mut::<(&Giant, &mut Pose, &mut NavAgent, &AreaSearch)>()
    {
        let motion = giant.controller.agent();
        let Some(goal) = destination(&giant.controller, search, view) else {
            agent.measured_speed = 0.0;
            continue;
        };

        let remaining = horizontal_distance(pose.position, goal);
        if remaining <= ARRIVAL_DISTANCE {
            agent.measured_speed = 0.0;
            continue;
        }

        agent.measured_speed =
            move_towards(agent.measured_speed, motion.speed, motion.acceleration * dt);

        let mut dir = goal - pose.position;
        dir.y = 0.0;
        let step = (agent.measured_speed * dt).min(remaining - ARRIVAL_DISTANCE);
        let next = pose.position + dir.normalize_or_zero() * step;
        pose.position = Vec3::new(
            next.x.clamp(-half_extent, half_extent),
            0.0,
            next.z.clamp(-half_extent, half_extent),
        );

        if agent.measured_speed > TRIGGER_SPEED_THRESHOLD {
            pose.rotation = face_toward(pose.rotation, pose.position, goal, 1.0);
        }
    }
}

/// Where the agent is heading, if anywhere.
fn destination(
    controller: &CreatureController,
    search: &AreaSearch,
    view: &WorldView,
) -> Option<Vec3> {
    if controller.is_leaving() || controller.is_dead() {
        return None;
    }
    match controller.state() {
        BehaviorState::Chasing if controller.flags().moving_toward_target => controller
            .target()
            .and_then(|id| view.player(id))
            .map(|player| player.position),
        BehaviorState::Chasing => None,
        BehaviorState::Searching => search.active_waypoint(),
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
