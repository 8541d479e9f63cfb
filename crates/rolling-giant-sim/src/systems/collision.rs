//! Contact detection and damage application.

use hecs::World;
use tracing::{debug, trace};

use rolling_giant_ai::controller::CollisionOutcome;
use rolling_giant_ai::random::SessionRng;
use rolling_giant_ai::world::{HostContext, WorldQuery};
use rolling_giant_core::constants::CONTACT_RADIUS;
use rolling_giant_core::events::SessionEvent;
use rolling_giant_core::types::{ParticipantId, PlayerId, Pose};

use crate::components::{AreaSearch, Giant, Player};
use crate::systems::ai::record;
use crate::systems::network::LoopbackNetwork;
use crate::systems::perception::WorldView;
use crate::systems::search::horizontal_distance;

/// Report every giant/player contact to the giant and apply the hits.
pub fn run(
    world: &mut World,
    view: &WorldView,
    rng: &mut SessionRng,
    first: ParticipantId,
    log: &mut Vec<SessionEvent>,
) {
    let mut hits: Vec<(PlayerId, i32)> = Vec::new();

    for (_entity, (giant, pose, search)) in
        world.query_mut::<(&mut Giant, &Pose, &mut AreaSearch)>()
    {
        let reach = CONTACT_RADIUS * giant.controller.scale();
        let touching: Vec<PlayerId> = view
            .players()
            .iter()
            .filter(|p| p.is_active())
            .filter(|p| horizontal_distance(pose.position, p.position) < reach)
            .map(|p| p.id)
            .collect();

        for player in touching {
            let mut network = LoopbackNetwork::new(first);
            let mut presentation = Vec::new();
            let outcome = {
                let mut host = HostContext {
                    world: view,
                    search: &mut *search,
                    network: &mut network,
                    rng: &mut *rng,
                    events: &mut presentation,
                };
                giant.controller.on_collide(player, &mut host)
            };
            match outcome {
                CollisionOutcome::Hit { player, damage } => hits.push((player, damage)),
                CollisionOutcome::Ignored(reason) => {
                    trace!(giant = ?giant.id, ?player, ?reason, "contact ignored");
                }
            }
            network.deliver(giant.id, &mut giant.controller, log);
            record(giant.id, presentation, log);
        }
    }

    for (target, damage) in hits {
        for (_entity, player) in world.query_mut::<&mut Player>() {
            if player.snapshot.id != target || player.snapshot.is_dead {
                continue;
            }
            player.health -= damage;
            debug!(player = ?target, damage, health = player.health, "player hit");
            if player.health <= 0 {
                player.health = 0;
                player.snapshot.is_dead = true;
                log.push(SessionEvent::PlayerKilled { player: target });
            }
        }
    }
}
