//! Per-variant stop and timer rules.
//!
//! Each variant answers two questions every chasing frame:
//! - `decide_timers`: advance aggro/wait/move timers and pick accelerate or
//!   decelerate for the agent.
//! - `decide_stop`: whether the creature counts as stopped this frame,
//!   which short-circuits the rest of the chase logic.

use tracing::debug;

use rolling_giant_core::config::SharedAiSettings;
use rolling_giant_core::constants::{AGGRO_DECAY_FACTOR, AGGRO_FULL};
use rolling_giant_core::enums::{AiVariant, MotionIntent};
use rolling_giant_core::state::TimerValues;

use crate::motion::lerp;
use crate::random::SessionRng;

/// What the creature perceives this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Perception {
    /// At least one eligible player is looking at the creature.
    pub observed: bool,
    /// The creature can see at least one player.
    pub player_in_sight: bool,
}

/// Variant working memory: the local aggro flag plus a scratch copy of the
/// replicated timers. Only the authority commits the timers back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VariantMemory {
    pub is_aggro: bool,
    pub timers: TimerValues,
}

/// Per-frame inputs for timer decisions.
pub struct VariantTick<'a> {
    pub dt: f32,
    pub settings: &'a SharedAiSettings,
    /// Random timers are only drawn by the authority.
    pub authority: bool,
    pub rng: &'a mut SessionRng,
}

impl VariantTick<'_> {
    fn sample(&mut self, min: f32, max: f32) -> Option<f32> {
        self.authority.then(|| self.rng.between(min, max))
    }
}

pub trait VariantStrategy: Sync {
    fn variant(&self) -> AiVariant;

    fn decide_stop(&self, perception: &Perception, memory: &VariantMemory) -> bool;

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        tick: &mut VariantTick<'_>,
    ) -> MotionIntent;
}

/// Get the strategy for a given variant.
pub fn strategy_for(variant: AiVariant) -> &'static dyn VariantStrategy {
    match variant {
        AiVariant::Coilhead => &Coilhead,
        AiVariant::InverseCoilhead => &InverseCoilhead,
        AiVariant::RandomlyMoveWhileLooking => &RandomlyMoveWhileLooking,
        AiVariant::LookingTooLongKeepsAgro => &LookingTooLongKeepsAgro,
        AiVariant::FollowOnceAgro => &FollowOnceAgro,
        AiVariant::OnceSeenAgroAfterTimer => &OnceSeenAgroAfterTimer,
    }
}

/// Stops exactly while observed.
pub struct Coilhead;

impl VariantStrategy for Coilhead {
    fn variant(&self) -> AiVariant {
        AiVariant::Coilhead
    }

    fn decide_stop(&self, perception: &Perception, _memory: &VariantMemory) -> bool {
        perception.observed
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        _memory: &mut VariantMemory,
        _tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        if perception.observed {
            MotionIntent::Decelerate
        } else {
            MotionIntent::Accelerate
        }
    }
}

/// Moves while watched; freezes when nobody looks but it can see someone.
pub struct InverseCoilhead;

impl VariantStrategy for InverseCoilhead {
    fn variant(&self) -> AiVariant {
        AiVariant::InverseCoilhead
    }

    fn decide_stop(&self, perception: &Perception, memory: &VariantMemory) -> bool {
        !perception.observed && memory.is_aggro && perception.player_in_sight
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        _tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        if self.decide_stop(perception, memory) {
            return MotionIntent::Decelerate;
        }
        memory.is_aggro = true;
        MotionIntent::Accelerate
    }
}

/// While observed, alternates random waits (stopped) and moves.
pub struct RandomlyMoveWhileLooking;

impl VariantStrategy for RandomlyMoveWhileLooking {
    fn variant(&self) -> AiVariant {
        AiVariant::RandomlyMoveWhileLooking
    }

    fn decide_stop(&self, perception: &Perception, memory: &VariantMemory) -> bool {
        perception.observed && memory.timers.movement <= 0.0
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        let settings = tick.settings;
        let timers = &mut memory.timers;

        if perception.observed {
            if timers.wait <= 0.0 && timers.movement <= 0.0 {
                if let Some(wait) = tick.sample(settings.wait_time_min, settings.wait_time_max) {
                    timers.wait = wait;
                }
            }

            if timers.wait > 0.0 && timers.movement <= 0.0 {
                timers.wait -= tick.dt;
                if timers.wait <= 0.0 {
                    if let Some(movement) =
                        tick.sample(settings.random_move_time_min, settings.random_move_time_max)
                    {
                        timers.movement = movement;
                    }
                }
                return MotionIntent::Decelerate;
            }
        }

        if timers.movement > 0.0 {
            timers.movement -= tick.dt;
            if timers.movement <= 0.0 {
                if let Some(wait) = tick.sample(settings.wait_time_min, settings.wait_time_max) {
                    timers.wait = wait;
                }
            }
        }
        MotionIntent::Accelerate
    }
}

/// Staring builds aggro; once full it never stops for the rest of the chase.
pub struct LookingTooLongKeepsAgro;

impl VariantStrategy for LookingTooLongKeepsAgro {
    fn variant(&self) -> AiVariant {
        AiVariant::LookingTooLongKeepsAgro
    }

    fn decide_stop(&self, perception: &Perception, memory: &VariantMemory) -> bool {
        perception.observed && memory.timers.aggro < AGGRO_FULL
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        if memory.is_aggro {
            return MotionIntent::Accelerate;
        }

        let look_time = tick.settings.look_time_before_agro;
        if perception.observed {
            let gain = if look_time > 0.0 {
                tick.dt / look_time
            } else {
                AGGRO_FULL
            };
            memory.timers.aggro = (memory.timers.aggro + gain).min(AGGRO_FULL);
            if memory.timers.aggro >= AGGRO_FULL {
                memory.is_aggro = true;
                debug!(variant = %self.variant(), "got aggro");
            }
            MotionIntent::Decelerate
        } else {
            let decay = if look_time > 0.0 {
                tick.dt / (look_time * AGGRO_DECAY_FACTOR)
            } else {
                1.0
            };
            memory.timers.aggro = lerp(memory.timers.aggro, 0.0, decay).max(0.0);
            MotionIntent::Accelerate
        }
    }
}

/// First observation makes aggro permanent.
///
/// Never raises the stop gate, even on the observation frame itself.
pub struct FollowOnceAgro;

impl VariantStrategy for FollowOnceAgro {
    fn variant(&self) -> AiVariant {
        AiVariant::FollowOnceAgro
    }

    fn decide_stop(&self, _perception: &Perception, _memory: &VariantMemory) -> bool {
        false
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        _tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        if !memory.is_aggro && perception.observed {
            memory.is_aggro = true;
            debug!(variant = %self.variant(), "got aggro");
            return MotionIntent::Decelerate;
        }
        MotionIntent::Accelerate
    }
}

/// First observation seeds a random countdown; it holds still until it ends.
///
/// Aggro and its countdown survive leaving the chase.
pub struct OnceSeenAgroAfterTimer;

impl VariantStrategy for OnceSeenAgroAfterTimer {
    fn variant(&self) -> AiVariant {
        AiVariant::OnceSeenAgroAfterTimer
    }

    fn decide_stop(&self, _perception: &Perception, memory: &VariantMemory) -> bool {
        memory.is_aggro && memory.timers.aggro > 0.0
    }

    fn decide_timers(
        &self,
        perception: &Perception,
        memory: &mut VariantMemory,
        tick: &mut VariantTick<'_>,
    ) -> MotionIntent {
        if !memory.is_aggro {
            if perception.observed {
                memory.is_aggro = true;
                let settings = tick.settings;
                if let Some(countdown) = tick.sample(settings.wait_time_min, settings.wait_time_max) {
                    memory.timers.aggro = countdown;
                }
                debug!(variant = %self.variant(), countdown = memory.timers.aggro, "got aggro");
                return MotionIntent::Decelerate;
            }
        } else if memory.timers.aggro > 0.0 {
            memory.timers.aggro -= tick.dt;
            if memory.timers.aggro <= 0.0 {
                debug!(variant = %self.variant(), "chasing time");
            }
            return MotionIntent::Decelerate;
        }
        MotionIntent::Accelerate
    }
}
