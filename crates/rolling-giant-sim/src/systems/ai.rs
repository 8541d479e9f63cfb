//! Controller dispatch: bridges session ticks to controller entry points.
//!
//! Each giant gets its own host context per call. Presentation events and
//! notifications are collected into the session event log.

use hecs::World;

use rolling_giant_ai::controller::FrameInput;
use rolling_giant_ai::random::SessionRng;
use rolling_giant_ai::world::HostContext;
use rolling_giant_core::events::{PresentationEvent, SessionEvent};
use rolling_giant_core::types::{GiantId, ParticipantId, Pose};

use crate::components::{AreaSearch, Giant, NavAgent};
use crate::systems::network::LoopbackNetwork;
use crate::systems::perception::WorldView;

/// Slow-interval evaluation for every giant.
pub fn run_interval(
    world: &mut World,
    view: &WorldView,
    rng: &mut SessionRng,
    first: ParticipantId,
    log: &mut Vec<SessionEvent>,
) {
    for (_entity, (giant, pose, search)) in
        world.query_mut::<(&mut Giant, &Pose, &mut AreaSearch)>()
    {
        let mut network = LoopbackNetwork::new(first);
        let mut presentation = Vec::new();
        {
            let mut host = HostContext {
                world: view,
                search,
                network: &mut network,
                rng: &mut *rng,
                events: &mut presentation,
            };
            giant.controller.on_interval(pose, &mut host);
        }
        network.deliver(giant.id, &mut giant.controller, log);
        record(giant.id, presentation, log);
    }
}

/// Per-frame evaluation for every giant. Stun timers count down afterwards.
pub fn run_frame(
    world: &mut World,
    view: &WorldView,
    rng: &mut SessionRng,
    first: ParticipantId,
    dt: f32,
    log: &mut Vec<SessionEvent>,
) {
    for (_entity, (giant, pose, agent, search)) in
        world.query_mut::<(&mut Giant, &mut Pose, &mut NavAgent, &mut AreaSearch)>()
    {
        let input = FrameInput {
            dt,
            measured_speed: agent.measured_speed,
            stun_timer: agent.stun_timer,
        };
        let mut network = LoopbackNetwork::new(first);
        let mut presentation = Vec::new();
        {
            let mut host = HostContext {
                world: view,
                search,
                network: &mut network,
                rng: &mut *rng,
                events: &mut presentation,
            };
            giant.controller.on_frame(&input, pose, &mut host);
        }
        network.deliver(giant.id, &mut giant.controller, log);
        record(giant.id, presentation, log);

        if agent.stun_timer >= 0.0 {
            agent.stun_timer -= dt;
            if agent.stun_timer < 0.0 {
                agent.stun_timer = -1.0;
            }
        }
    }
}

/// End-of-round reset for every giant.
pub fn reset_all(
    world: &mut World,
    view: &WorldView,
    rng: &mut SessionRng,
    first: ParticipantId,
    log: &mut Vec<SessionEvent>,
) {
    for (_entity, (giant, search)) in world.query_mut::<(&mut Giant, &mut AreaSearch)>() {
        let mut network = LoopbackNetwork::new(first);
        let mut presentation = Vec::new();
        {
            let mut host = HostContext {
                world: view,
                search,
                network: &mut network,
                rng: &mut *rng,
                events: &mut presentation,
            };
            giant.controller.reset(&mut host);
        }
        network.deliver(giant.id, &mut giant.controller, log);
        record(giant.id, presentation, log);
    }
}

pub(crate) fn record(giant: GiantId, events: Vec<PresentationEvent>, log: &mut Vec<SessionEvent>) {
    log.extend(
        events
            .into_iter()
            .map(|event| SessionEvent::Presentation { giant, event }),
    );
}
