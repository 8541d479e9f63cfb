//! Speed ramps toward cruise speed or a stop.
//!
//! The host's navigation agent reads `speed` as its target speed and
//! `acceleration` as its turning/acceleration capacity.

use glam::{Quat, Vec3};

use rolling_giant_core::config::SharedAiSettings;
use rolling_giant_core::constants::MAX_AGENT_ACCELERATION;
use rolling_giant_core::enums::MotionIntent;

/// Target speed and maneuverability handed to the navigation agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentMotion {
    pub speed: f32,
    pub acceleration: f32,
}

impl Default for AgentMotion {
    fn default() -> Self {
        Self {
            speed: 0.0,
            acceleration: MAX_AGENT_ACCELERATION,
        }
    }
}

impl AgentMotion {
    /// Ramp toward cruise speed over `move_acceleration` seconds.
    ///
    /// Maneuverability converges on the maximum over roughly one second,
    /// independently of the speed ramp.
    pub fn accelerate(&mut self, settings: &SharedAiSettings, dt: f32) {
        self.speed = if settings.move_acceleration == 0.0 {
            settings.move_speed
        } else {
            lerp(self.speed, settings.move_speed, dt / settings.move_acceleration)
        };
        self.acceleration = lerp(self.acceleration, MAX_AGENT_ACCELERATION, dt);
    }

    /// Ramp toward zero over `move_deceleration` seconds.
    ///
    /// Maneuverability snaps to the maximum so the agent can stop sharply.
    pub fn decelerate(&mut self, settings: &SharedAiSettings, dt: f32) {
        self.speed = if settings.move_deceleration == 0.0 {
            0.0
        } else {
            lerp(self.speed, 0.0, dt / settings.move_deceleration)
        };
        self.acceleration = MAX_AGENT_ACCELERATION;
    }

    /// Stunned: no speed, full maneuverability.
    pub fn freeze(&mut self) {
        self.speed = 0.0;
        self.acceleration = MAX_AGENT_ACCELERATION;
    }

    pub fn apply(&mut self, intent: MotionIntent, settings: &SharedAiSettings, dt: f32) {
        match intent {
            MotionIntent::Accelerate => self.accelerate(settings, dt),
            MotionIntent::Decelerate => self.decelerate(settings, dt),
        }
    }
}

/// Turn about the y axis toward `target`, covering fraction `t` of the arc.
pub fn face_toward(rotation: Quat, from: Vec3, target: Vec3, t: f32) -> Quat {
    let mut dir = target - from;
    dir.y = 0.0;
    if dir.length_squared() <= f32::EPSILON {
        return rotation;
    }
    let goal = Quat::from_rotation_y(dir.x.atan2(dir.z));
    rotation.slerp(goal, t.clamp(0.0, 1.0))
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SharedAiSettings {
        SharedAiSettings {
            move_speed: 6.0,
            move_acceleration: 2.0,
            move_deceleration: 0.5,
            ..SharedAiSettings::default()
        }
    }

    #[test]
    fn test_accelerate_ramps_by_dt_over_time_constant() {
        let mut agent = AgentMotion::default();
        agent.accelerate(&settings(), 0.5);
        // 0.5 / 2.0 = a quarter of the way to 6.
        assert!((agent.speed - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_acceleration_snaps_to_cruise() {
        let mut agent = AgentMotion::default();
        let settings = SharedAiSettings {
            move_acceleration: 0.0,
            ..settings()
        };
        agent.accelerate(&settings, 0.016);
        assert_eq!(agent.speed, settings.move_speed);
    }

    #[test]
    fn test_decelerate_ramps_and_snaps_maneuverability() {
        let mut agent = AgentMotion {
            speed: 6.0,
            acceleration: 8.0,
        };
        agent.decelerate(&settings(), 0.25);
        assert!((agent.speed - 3.0).abs() < 1e-5);
        assert_eq!(agent.acceleration, MAX_AGENT_ACCELERATION);
    }

    #[test]
    fn test_zero_deceleration_stops_instantly() {
        let mut agent = AgentMotion {
            speed: 6.0,
            acceleration: 8.0,
        };
        let settings = SharedAiSettings {
            move_deceleration: 0.0,
            ..settings()
        };
        agent.decelerate(&settings, 0.016);
        assert_eq!(agent.speed, 0.0);
    }

    #[test]
    fn test_acceleration_smoothing_is_independent_of_speed_ramp() {
        let mut agent = AgentMotion {
            speed: 0.0,
            acceleration: 0.0,
        };
        agent.accelerate(&settings(), 0.1);
        assert!((agent.acceleration - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_face_toward_ignores_height() {
        let rotation = face_toward(Quat::IDENTITY, Vec3::ZERO, Vec3::new(5.0, 40.0, 0.0), 1.0);
        let forward = rotation * Vec3::Z;
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_face_toward_partial_turn() {
        let rotation = face_toward(Quat::IDENTITY, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.5);
        let forward = rotation * Vec3::Z;
        // Halfway between +Z and +X.
        assert!((forward.x - forward.z).abs() < 1e-4);
        assert!(forward.x > 0.0);
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
    }
}
