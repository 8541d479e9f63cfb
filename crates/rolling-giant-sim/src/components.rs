//! ECS components for the session world.

use glam::Vec3;

use rolling_giant_ai::world::SearchRoutine;
use rolling_giant_ai::CreatureController;
use rolling_giant_core::constants::SEARCH_DURATION_SECS;
use rolling_giant_core::types::{GiantId, PlayerSnapshot};

/// A spawned creature and its decision core.
pub struct Giant {
    pub id: GiantId,
    pub controller: CreatureController,
}

/// Navigation agent state measured by the host.
#[derive(Debug, Clone, Copy)]
pub struct NavAgent {
    /// Speed the agent actually moved at last frame.
    pub measured_speed: f32,
    /// Externally-signaled stun timer. Negative when not stunned.
    pub stun_timer: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            measured_speed: 0.0,
            stun_timer: -1.0,
        }
    }
}

/// Time-boxed wander around a start point.
#[derive(Debug, Clone, Default)]
pub struct AreaSearch {
    pub origin: Vec3,
    pub waypoint: Option<Vec3>,
    pub remaining_secs: f32,
    running: bool,
}

impl AreaSearch {
    /// Current waypoint while the search runs.
    pub fn active_waypoint(&self) -> Option<Vec3> {
        if self.running {
            self.waypoint
        } else {
            None
        }
    }
}

impl SearchRoutine for AreaSearch {
    fn start(&mut self, origin: Vec3) {
        self.origin = origin;
        self.waypoint = None;
        self.remaining_secs = SEARCH_DURATION_SECS;
        self.running = true;
    }

    fn stop(&mut self) {
        self.waypoint = None;
        self.running = false;
    }

    fn in_progress(&self) -> bool {
        self.running
    }
}

/// A roster entry.
#[derive(Debug, Clone)]
pub struct Player {
    pub snapshot: PlayerSnapshot,
    pub health: i32,
}

/// Axis-aligned box that blocks sightlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occluder {
    pub min: Vec3,
    pub max: Vec3,
}

impl Occluder {
    /// Whether the segment `from -> to` passes through the box.
    pub fn blocks(&self, from: Vec3, to: Vec3) -> bool {
        let dir = to - from;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        for axis in 0..3 {
            let (origin, delta) = (from[axis], dir[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if delta.abs() <= f32::EPSILON {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / delta;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Occluder {
        Occluder {
            min: Vec3::new(-2.0, 0.0, 4.0),
            max: Vec3::new(2.0, 3.0, 5.0),
        }
    }

    #[test]
    fn test_segment_through_wall_is_blocked() {
        assert!(wall().blocks(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 10.0)));
    }

    #[test]
    fn test_segment_over_or_beside_wall_is_clear() {
        assert!(!wall().blocks(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, 4.0, 10.0)));
        assert!(!wall().blocks(Vec3::new(3.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 10.0)));
    }

    #[test]
    fn test_segment_stopping_short_is_clear() {
        assert!(!wall().blocks(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 3.5)));
    }
}
