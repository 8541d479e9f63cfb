//! Perception: a read-only picture of the world the controller queries.
//!
//! Gathered once per pass so controllers see the same roster and
//! geometry regardless of update order.

use glam::Vec3;
use hecs::World;

use rolling_giant_ai::world::WorldQuery;
use rolling_giant_core::types::{PlayerId, PlayerSnapshot};

use crate::components::{Occluder, Player};

/// Roster, occluders and the flat walkable floor.
pub struct WorldView {
    players: Vec<PlayerSnapshot>,
    occluders: Vec<Occluder>,
    half_extent: f32,
    local: Option<PlayerId>,
}

impl WorldView {
    pub fn gather(world: &World, local: Option<PlayerId>, half_extent: f32) -> Self {
        let mut players: Vec<PlayerSnapshot> = world
            .query::<&Player>()
            .iter()
            .map(|(_, player)| player.snapshot)
            .collect();
        players.sort_by_key(|p| p.id);

        let occluders = world
            .query::<&Occluder>()
            .iter()
            .map(|(_, occluder)| *occluder)
            .collect();

        Self {
            players,
            occluders,
            half_extent,
            local,
        }
    }
}

impl WorldQuery for WorldView {
    fn players(&self) -> &[PlayerSnapshot] {
        &self.players
    }

    fn is_unobstructed(&self, from: Vec3, to: Vec3) -> bool {
        !self.occluders.iter().any(|o| o.blocks(from, to))
    }

    /// The floor is the square `|x|, |z| <= half_extent` at y = 0.
    fn nearest_walkable(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let on_floor = Vec3::new(
            point.x.clamp(-self.half_extent, self.half_extent),
            0.0,
            point.z.clamp(-self.half_extent, self.half_extent),
        );
        (point.distance(on_floor) <= max_distance).then_some(on_floor)
    }

    fn local_player(&self) -> Option<PlayerId> {
        self.local
    }
}
