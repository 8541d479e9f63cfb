//! Target selection: who to chase, and who is watching.
//!
//! Every function here is read-only. Callers decide what to do with the
//! result.

use glam::Vec3;

use rolling_giant_core::constants::*;
use rolling_giant_core::types::{in_view_cone, PlayerId, PlayerSnapshot, Pose};

use crate::world::WorldQuery;

/// The parts of a creature target selection looks at.
#[derive(Debug, Clone, Copy)]
pub struct CreatureView {
    pub pose: Pose,
    pub is_outside: bool,
}

impl CreatureView {
    pub fn chase_range(&self) -> f32 {
        if self.is_outside {
            OUTSIDE_CHASE_RANGE
        } else {
            INSIDE_CHASE_RANGE
        }
    }

    /// Origin of the chase linecast.
    pub fn torso(&self) -> Vec3 {
        self.pose.above(TORSO_HEIGHT)
    }

    /// Point a player must see for the creature to count as observed.
    pub fn observed_point(&self) -> Vec3 {
        self.pose.above(OBSERVED_POINT_HEIGHT)
    }

    pub fn eye(&self) -> Vec3 {
        self.pose.above(EYE_HEIGHT)
    }

    pub fn is_eligible(&self, player: &PlayerSnapshot) -> bool {
        is_eligible(self.is_outside, player)
    }

    pub fn distance_to(&self, player: &PlayerSnapshot) -> f32 {
        self.pose.position.distance(player.position)
    }

    /// Whether the creature's own view cone reaches a point without obstruction.
    pub fn can_see(&self, world: &dyn WorldQuery, point: Vec3) -> bool {
        let eye = self.eye();
        in_view_cone(
            eye,
            self.pose.forward(),
            point,
            CREATURE_VIEW_WIDTH_DEG,
            CREATURE_VIEW_RANGE,
        ) && world.is_unobstructed(eye, point)
    }
}

/// Alive, spawned, in the same environment, and targetable when inside.
pub fn is_eligible(creature_outside: bool, player: &PlayerSnapshot) -> bool {
    if !player.is_active() {
        return false;
    }
    // Outside creatures only want outside players and vice versa.
    if creature_outside == player.is_inside_factory {
        return false;
    }
    creature_outside || player.is_targetable
}

/// How strict the sightline must be for a chase candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightRequirement {
    /// Clear linecast from the torso to the player's camera.
    Unobstructed,
    /// Additionally inside the creature's own view cone.
    InViewCone,
}

/// A player watching the creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub player: PlayerId,
    pub distance: f32,
}

fn is_chase_candidate(
    creature: &CreatureView,
    world: &dyn WorldQuery,
    player: &PlayerSnapshot,
    requirement: SightRequirement,
) -> bool {
    if !creature.is_eligible(player) {
        return false;
    }
    if creature.distance_to(player) >= creature.chase_range() {
        return false;
    }
    if !world.is_unobstructed(creature.torso(), player.camera) {
        return false;
    }
    match requirement {
        SightRequirement::Unobstructed => true,
        SightRequirement::InViewCone => creature.can_see(world, player.camera),
    }
}

/// First player in roster order that may be chased right now.
pub fn first_chase_candidate(creature: &CreatureView, world: &dyn WorldQuery) -> Option<PlayerId> {
    world
        .players()
        .iter()
        .find(|p| is_chase_candidate(creature, world, p, SightRequirement::Unobstructed))
        .map(|p| p.id)
}

/// Nearest player that may be chased right now.
pub fn find_chase_candidate(
    creature: &CreatureView,
    world: &dyn WorldQuery,
    requirement: SightRequirement,
) -> Option<PlayerId> {
    nearest(
        creature,
        world
            .players()
            .iter()
            .filter(|p| is_chase_candidate(creature, world, p, requirement)),
    )
}

/// Nearest active player, ignoring environment, range and sightline.
///
/// Outside creatures fall back to this before giving up a chase.
pub fn closest_player(creature: &CreatureView, world: &dyn WorldQuery) -> Option<PlayerId> {
    nearest(creature, world.players().iter().filter(|p| p.is_active()))
}

/// Nearest eligible player with an unobstructed, angle-bounded view of the creature.
pub fn find_observer(creature: &CreatureView, world: &dyn WorldQuery) -> Option<Observer> {
    let point = creature.observed_point();
    world
        .players()
        .iter()
        .filter(|p| creature.is_eligible(p))
        .filter(|p| player_sees(world, p, point, OBSERVER_VIEW_WIDTH_DEG, OBSERVER_VIEW_RANGE))
        .map(|p| Observer {
            player: p.id,
            distance: creature.distance_to(p),
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub fn is_observed(creature: &CreatureView, world: &dyn WorldQuery) -> bool {
    find_observer(creature, world).is_some()
}

/// Whether the creature can see any active player's camera.
pub fn any_player_in_sight(creature: &CreatureView, world: &dyn WorldQuery) -> bool {
    world
        .players()
        .iter()
        .filter(|p| p.is_active())
        .any(|p| creature.can_see(world, p.camera))
}

/// Whether a player's camera has an unobstructed view of `point`.
pub fn player_sees(
    world: &dyn WorldQuery,
    player: &PlayerSnapshot,
    point: Vec3,
    width_deg: f32,
    range: f32,
) -> bool {
    in_view_cone(player.camera, player.camera_forward, point, width_deg, range)
        && world.is_unobstructed(player.camera, point)
}

/// Whether the agent stands on the walkable surface.
///
/// The nearest surface point must be vertically aligned with the agent and
/// not above it.
pub fn is_on_walkable_surface(world: &dyn WorldQuery, position: Vec3) -> bool {
    match world.nearest_walkable(position, NAV_SAMPLE_RADIUS) {
        Some(hit) => {
            (position.x - hit.x).abs() <= NAV_ALIGN_EPSILON
                && (position.z - hit.z).abs() <= NAV_ALIGN_EPSILON
                && position.y >= hit.y
        }
        None => false,
    }
}

fn nearest<'a>(
    creature: &CreatureView,
    players: impl Iterator<Item = &'a PlayerSnapshot>,
) -> Option<PlayerId> {
    players
        .map(|p| (p.id, creature.distance_to(p)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
