//! External collaborators the decision core calls through.
//!
//! The host implements these against its engine: the roster, obstruction
//! raycasts, the navigation mesh, the area-search routine and the network.

use glam::Vec3;

use rolling_giant_core::events::{ChaseNotification, PresentationEvent};
use rolling_giant_core::types::{ParticipantId, PlayerId, PlayerSnapshot};

use crate::random::SessionRng;

/// Read-only world queries.
pub trait WorldQuery {
    /// Every roster entry, connected or not, in roster order.
    fn players(&self) -> &[PlayerSnapshot];

    /// True when nothing in the exclusion mask blocks the segment.
    fn is_unobstructed(&self, from: Vec3, to: Vec3) -> bool;

    /// Nearest point on the walkable surface within `max_distance` of `point`.
    fn nearest_walkable(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// The player controlled on this participant, if any.
    fn local_player(&self) -> Option<PlayerId> {
        None
    }

    fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players().iter().find(|p| p.id == id)
    }
}

/// Periodic, cancelable area search owned by the host.
pub trait SearchRoutine {
    fn start(&mut self, origin: Vec3);
    fn stop(&mut self);
    fn in_progress(&self) -> bool;
}

/// Network services: notifications and ownership handoff.
pub trait NetworkChannel {
    /// Deliver to every other participant. The sender applies locally itself.
    fn broadcast(&mut self, notification: ChaseNotification);

    /// Ask the host to move decision authority to `to`.
    fn request_authority(&mut self, to: ParticipantId);

    /// Participant tracked as "first", the handoff target while searching.
    fn first_participant(&self) -> ParticipantId;
}

/// Everything an entry point needs from the host for one call.
pub struct HostContext<'a> {
    pub world: &'a dyn WorldQuery,
    pub search: &'a mut dyn SearchRoutine,
    pub network: &'a mut dyn NetworkChannel,
    pub rng: &'a mut SessionRng,
    pub events: &'a mut Vec<PresentationEvent>,
}
