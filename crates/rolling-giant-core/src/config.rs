//! Tunable settings, loaded from JSON.
//!
//! Every field has a default so partial files are accepted. Call
//! [`GiantConfig::validate`] (done by [`GiantConfig::from_json`]) before use.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AI_INTERVAL_SECS;
use crate::enums::AiVariant;
use crate::error::ConfigError;

/// Settings shared by every creature in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedAiSettings {
    /// Cruise speed.
    pub move_speed: f32,
    /// Seconds to ramp up to cruise speed. Zero snaps immediately.
    pub move_acceleration: f32,
    /// Seconds to ramp down to a stop. Zero stops immediately.
    pub move_deceleration: f32,
    /// Turn to face the target while stopped.
    pub rotate_to_look_at_player: bool,
    /// Seconds of being looked at before turning starts.
    pub delay_before_looking_at_player: f32,
    /// Seconds the turn is smoothed over.
    pub look_at_player_duration: f32,
    /// Seconds of being looked at before aggro becomes permanent.
    pub look_time_before_agro: f32,
    pub wait_time_min: f32,
    pub wait_time_max: f32,
    pub random_move_time_min: f32,
    pub random_move_time_max: f32,
}

impl Default for SharedAiSettings {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            move_acceleration: 2.0,
            move_deceleration: 0.3,
            rotate_to_look_at_player: true,
            delay_before_looking_at_player: 0.5,
            look_at_player_duration: 1.0,
            look_time_before_agro: 12.0,
            wait_time_min: 1.0,
            wait_time_max: 3.0,
            random_move_time_min: 1.0,
            random_move_time_max: 3.0,
        }
    }
}

impl SharedAiSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("move_speed", self.move_speed)?;
        non_negative("move_acceleration", self.move_acceleration)?;
        non_negative("move_deceleration", self.move_deceleration)?;
        non_negative(
            "delay_before_looking_at_player",
            self.delay_before_looking_at_player,
        )?;
        non_negative("look_at_player_duration", self.look_at_player_duration)?;
        non_negative("look_time_before_agro", self.look_time_before_agro)?;
        non_negative("wait_time_min", self.wait_time_min)?;
        ordered("wait_time", self.wait_time_min, self.wait_time_max)?;
        non_negative("random_move_time_min", self.random_move_time_min)?;
        ordered(
            "random_move_time",
            self.random_move_time_min,
            self.random_move_time_max,
        )
    }
}

/// Inclusive range a spawn scale is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl ScaleRange {
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }
}

/// Full configuration for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiantConfig {
    pub shared: SharedAiSettings,
    pub scale_inside: ScaleRange,
    pub scale_outside: ScaleRange,
    /// Variants the session selector may pick from.
    pub variant_pool: Vec<AiVariant>,
    /// Seconds between slow-interval evaluations.
    pub ai_interval_secs: f32,
}

impl Default for GiantConfig {
    fn default() -> Self {
        use strum::IntoEnumIterator;

        Self {
            shared: SharedAiSettings::default(),
            scale_inside: ScaleRange { min: 0.9, max: 1.2 },
            scale_outside: ScaleRange { min: 0.9, max: 1.2 },
            variant_pool: AiVariant::iter().collect(),
            ai_interval_secs: DEFAULT_AI_INTERVAL_SECS,
        }
    }
}

impl GiantConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        non_negative("scale_inside.min", self.scale_inside.min)?;
        ordered("scale_inside", self.scale_inside.min, self.scale_inside.max)?;
        non_negative("scale_outside.min", self.scale_outside.min)?;
        ordered("scale_outside", self.scale_outside.min, self.scale_outside.max)?;
        non_negative("ai_interval_secs", self.ai_interval_secs)?;
        if self.variant_pool.is_empty() {
            return Err(ConfigError::EmptyVariantPool);
        }
        Ok(())
    }

    pub fn scale_range(&self, is_outside: bool) -> ScaleRange {
        if is_outside {
            self.scale_outside
        } else {
            self.scale_inside
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value < 0.0 || value.is_nan() {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    for value in [min, max] {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite { field, value });
        }
    }
    if min > max {
        return Err(ConfigError::InvertedRange { field, min, max });
    }
    Ok(())
}
