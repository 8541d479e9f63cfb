//! Controller constants and tuning parameters.

/// Frame tick rate of the reference host (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame tick.
pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

/// Default seconds between slow-interval evaluations.
pub const DEFAULT_AI_INTERVAL_SECS: f32 = 0.2;

// --- Targeting ---

/// Chase acquisition range for creatures spawned outside.
pub const OUTSIDE_CHASE_RANGE: f32 = 90.0;

/// Chase acquisition range for creatures spawned inside.
pub const INSIDE_CHASE_RANGE: f32 = 30.0;

/// Height above the creature base the chase linecast starts from.
pub const TORSO_HEIGHT: f32 = 0.5;

/// Height above the creature base observers must see to count as "looking".
pub const OBSERVED_POINT_HEIGHT: f32 = 1.6;

/// Height of a standing player's camera above their feet.
pub const PLAYER_CAMERA_HEIGHT: f32 = 1.6;

/// Height of the creature's own eye above its base.
pub const EYE_HEIGHT: f32 = 1.8;

/// Angular width (degrees) a player's view must fall within to observe the creature.
pub const OBSERVER_VIEW_WIDTH_DEG: f32 = 68.0;

/// Maximum distance a player can observe the creature from.
pub const OBSERVER_VIEW_RANGE: f32 = 60.0;

/// Angular width (degrees) of the creature's own view cone.
pub const CREATURE_VIEW_WIDTH_DEG: f32 = 68.0;

/// Range of the creature's own view cone.
pub const CREATURE_VIEW_RANGE: f32 = 60.0;

// --- Motion ---

/// Agent acceleration the creature converges on. Also used when stopping.
pub const MAX_AGENT_ACCELERATION: f32 = 200.0;

/// Replicated speed above which the collider acts as a trigger.
pub const TRIGGER_SPEED_THRESHOLD: f32 = 0.01;

/// Search radius when sampling the walkable surface under the agent.
pub const NAV_SAMPLE_RADIUS: f32 = 3.0;

/// Tolerance for the "vertically aligned with the surface" test.
pub const NAV_ALIGN_EPSILON: f32 = 1e-4;

// --- Aggro ---

/// Normalized aggro timer value at which aggro becomes permanent.
pub const AGGRO_FULL: f32 = 1.0;

/// Multiplier on look duration used when aggro decays while unobserved.
pub const AGGRO_DECAY_FACTOR: f32 = 1.5;

// --- Collision ---

/// Seconds that must pass between two damaging hits.
pub const HIT_COOLDOWN_SECS: f32 = 0.6;

/// Value the hit clock restarts from after a damaging hit.
pub const HIT_CLOCK_RESTART_SECS: f32 = 0.2;

/// Damage dealt by a single hit.
pub const LETHAL_DAMAGE: i32 = 90;

/// Scale at or above which the creature is too big for tight spaces.
pub const TOO_BIG_SCALE: f32 = 1.2;

// --- Fear presentation ---

/// Angular width (degrees) of the local player's view for the fear check.
pub const FEAR_VIEW_WIDTH_DEG: f32 = 70.0;

/// Range of the local player's view for the fear check.
pub const FEAR_VIEW_RANGE: f32 = 25.0;

/// Distance under which the strong fear level applies.
pub const FEAR_CLOSE_DISTANCE: f32 = 4.0;

/// Distance under which the mild fear level applies.
pub const FEAR_NEAR_DISTANCE: f32 = 9.0;

pub const FEAR_CLOSE_LEVEL: f32 = 0.9;
pub const FEAR_NEAR_LEVEL: f32 = 0.4;
pub const FEAR_HIT_LEVEL: f32 = 1.0;

/// Previous-frame speed above which stopping plays a stop noise.
pub const STOP_NOISE_MIN_SPEED: f32 = 1.0;

// --- Reference host ---

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Horizontal distance at which a unit-scale creature touches a player.
pub const CONTACT_RADIUS: f32 = 1.5;

/// Half the side length of the square walkable floor.
pub const DEFAULT_ARENA_HALF_EXTENT: f32 = 60.0;

/// Radius around its start point an area search wanders within.
pub const SEARCH_RADIUS: f32 = 25.0;

/// Seconds before an area search gives up on its own.
pub const SEARCH_DURATION_SECS: f32 = 30.0;

/// Distance at which a search waypoint counts as reached.
pub const WAYPOINT_REACHED_DISTANCE: f32 = 1.0;

/// Distance at which the agent stops short of its destination.
pub const ARRIVAL_DISTANCE: f32 = 0.5;
