//! Loopback network for a single-process session.
//!
//! There are no remote participants, so broadcasts only land in the event
//! log. Authority requests are granted on the spot.

use tracing::debug;

use rolling_giant_ai::world::NetworkChannel;
use rolling_giant_ai::CreatureController;
use rolling_giant_core::events::{ChaseNotification, SessionEvent};
use rolling_giant_core::types::{GiantId, ParticipantId};

pub struct LoopbackNetwork {
    first: ParticipantId,
    sent: Vec<ChaseNotification>,
    requests: Vec<ParticipantId>,
}

impl LoopbackNetwork {
    pub fn new(first: ParticipantId) -> Self {
        Self {
            first,
            sent: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Log what one controller call sent and grant its authority requests.
    pub fn deliver(
        &mut self,
        giant: GiantId,
        controller: &mut CreatureController,
        log: &mut Vec<SessionEvent>,
    ) {
        for notification in self.sent.drain(..) {
            log.push(SessionEvent::Notification {
                giant,
                notification,
            });
        }
        for to in self.requests.drain(..) {
            debug!(?giant, ?to, "granting authority");
            controller.set_owner(to);
            log.push(SessionEvent::AuthorityRequested { giant, to });
        }
    }
}

impl NetworkChannel for LoopbackNetwork {
    fn broadcast(&mut self, notification: ChaseNotification) {
        self.sent.push(notification);
    }

    fn request_authority(&mut self, to: ParticipantId) {
        self.requests.push(to);
    }

    fn first_participant(&self) -> ParticipantId {
        self.first
    }
}
