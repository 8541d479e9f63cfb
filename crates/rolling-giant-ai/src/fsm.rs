//! Searching/chasing state machine.
//!
//! Pure functions that compute interval decisions and entry resets from
//! plain data. The [`CreatureController`](crate::CreatureController)
//! applies the results and talks to the host.

use rolling_giant_core::enums::BehaviorState;
use rolling_giant_core::state::{LocalFlags, TimerValues};
use rolling_giant_core::types::PlayerId;

use crate::targeting::{
    closest_player, find_chase_candidate, first_chase_candidate, CreatureView, SightRequirement,
};
use crate::world::WorldQuery;

/// Input to the slow-interval evaluation for one creature.
pub struct IntervalContext<'a> {
    pub state: BehaviorState,
    pub creature: CreatureView,
    pub is_authority: bool,
    pub search_in_progress: bool,
    pub world: &'a dyn WorldQuery,
}

/// Outcome of one interval evaluation. At most one transition per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalDecision {
    /// Nothing to do this interval.
    Hold,
    /// Searching on a non-authority participant: ask for ownership handoff.
    RequestAuthority,
    /// Searching with no area search running: start one.
    StartSearch,
    /// Searching → Chasing.
    BeginChase { target: PlayerId },
    /// Target still valid while the area search runs: stop it and pursue.
    StopSearch { target: PlayerId },
    /// Target lost while the area search still runs: stop pursuing.
    LoseTarget,
    /// Chasing → Searching.
    ReturnToSearch,
}

/// Evaluate the interval step for one creature.
pub fn evaluate_interval(ctx: &IntervalContext<'_>) -> IntervalDecision {
    match ctx.state {
        BehaviorState::Searching => evaluate_searching(ctx),
        BehaviorState::Chasing => evaluate_chasing(ctx),
    }
}

fn evaluate_searching(ctx: &IntervalContext<'_>) -> IntervalDecision {
    if !ctx.is_authority {
        return IntervalDecision::RequestAuthority;
    }

    if !ctx.search_in_progress {
        return IntervalDecision::StartSearch;
    }

    if let Some(target) = first_chase_candidate(&ctx.creature, ctx.world) {
        return IntervalDecision::BeginChase { target };
    }

    IntervalDecision::Hold
}

fn evaluate_chasing(ctx: &IntervalContext<'_>) -> IntervalDecision {
    if !ctx.is_authority {
        return IntervalDecision::Hold;
    }

    match revalidate_target(&ctx.creature, ctx.world) {
        None if ctx.search_in_progress => IntervalDecision::LoseTarget,
        None => IntervalDecision::ReturnToSearch,
        Some(target) if ctx.search_in_progress => IntervalDecision::StopSearch { target },
        Some(_) => IntervalDecision::Hold,
    }
}

/// The target a chasing creature should hold, if any.
///
/// Nearest eligible player in range with a clear sightline; outside
/// creatures fall back to the nearest active player anywhere.
pub fn revalidate_target(creature: &CreatureView, world: &dyn WorldQuery) -> Option<PlayerId> {
    find_chase_candidate(creature, world, SightRequirement::Unobstructed).or_else(|| {
        if creature.is_outside {
            closest_player(creature, world)
        } else {
            None
        }
    })
}

/// Entry actions for a state switch.
///
/// Clears the per-chase flags and the wait/move/look timers. Aggro (flag
/// and timer) is cleared too unless the variant preserves it.
pub fn apply_entry_reset(
    flags: &mut LocalFlags,
    timers: &mut TimerValues,
    entering: BehaviorState,
    preserve_aggro: bool,
) {
    flags.entered_chase = entering == BehaviorState::Chasing;
    flags.wants_to_chase = false;
    flags.was_stopped = false;
    flags.was_feared = false;
    if !preserve_aggro {
        flags.is_aggro = false;
        timers.aggro = 0.0;
    }
    timers.wait = 0.0;
    timers.movement = 0.0;
    timers.look = 0.0;
}
