//! The creature controller, one per spawned creature.
//!
//! `CreatureController` owns the creature's state and exposes the entry
//! points a host adapter calls: `on_frame`, `on_interval`, `on_collide`,
//! `reset` and `apply_notification`. It never fails outward; unmet
//! preconditions turn a call into a no-op.

use tracing::{debug, info, warn};

use rolling_giant_core::config::SharedAiSettings;
use rolling_giant_core::constants::*;
use rolling_giant_core::enums::{AiVariant, BehaviorState};
use rolling_giant_core::error::UnknownVariant;
use rolling_giant_core::events::{ChaseNotification, PresentationEvent};
use rolling_giant_core::state::{
    LocalFlags, ReplicatedSnapshot, ReplicatedState, ReplicatedWriter, TimerValues,
};
use rolling_giant_core::types::{ParticipantId, PlayerId, Pose, VariantId};

use crate::fsm::{self, IntervalContext, IntervalDecision};
use crate::motion::{face_toward, AgentMotion};
use crate::targeting::{
    any_player_in_sight, find_chase_candidate, is_eligible, is_observed, is_on_walkable_surface,
    player_sees, CreatureView, SightRequirement,
};
use crate::variants::{strategy_for, Perception, VariantMemory, VariantTick};
use crate::world::HostContext;

/// Values fixed when the creature spawns.
#[derive(Debug, Clone)]
pub struct SpawnParams {
    pub is_outside: bool,
    pub scale: f32,
    pub variant: VariantId,
    /// Participant holding authority at spawn.
    pub owner: ParticipantId,
    /// Participant this controller runs on.
    pub local: ParticipantId,
    pub settings: SharedAiSettings,
}

/// Per-frame inputs measured by the host.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub dt: f32,
    /// Magnitude of the navigation agent's actual velocity.
    pub measured_speed: f32,
    /// Externally-signaled stun timer. Negative when not stunned.
    pub stun_timer: f32,
}

/// Why a collision did not damage the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Leaving,
    Dead,
    Cooldown,
    Stunned,
    IneligiblePlayer,
    SafeRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Hit { player: PlayerId, damage: i32 },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone)]
pub struct CreatureController {
    local: ParticipantId,
    variant: VariantId,
    settings: SharedAiSettings,
    is_outside: bool,
    scale: f32,
    too_big: bool,
    state: BehaviorState,
    replicated: ReplicatedState,
    flags: LocalFlags,
    target: Option<PlayerId>,
    agent: AgentMotion,
    time_since_hit: f32,
    last_speed: f32,
    stun_timer: f32,
    is_dead: bool,
    leaving: bool,
}

impl CreatureController {
    pub fn new(params: SpawnParams) -> Self {
        let too_big = params.scale >= TOO_BIG_SCALE;
        match params.variant.resolve() {
            Ok(variant) => info!(%variant, scale = params.scale, too_big, "creature spawned"),
            Err(err) => warn!(%err, scale = params.scale, "creature spawned with unknown variant"),
        }
        Self {
            local: params.local,
            variant: params.variant,
            settings: params.settings,
            is_outside: params.is_outside,
            scale: params.scale,
            too_big,
            state: BehaviorState::Searching,
            replicated: ReplicatedState::new(params.owner),
            flags: LocalFlags::default(),
            target: None,
            agent: AgentMotion::default(),
            time_since_hit: 0.0,
            last_speed: 0.0,
            stun_timer: -1.0,
            is_dead: false,
            leaving: false,
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn target(&self) -> Option<PlayerId> {
        self.target
    }

    pub fn flags(&self) -> LocalFlags {
        self.flags
    }

    pub fn agent(&self) -> AgentMotion {
        self.agent
    }

    pub fn timers(&self) -> TimerValues {
        self.replicated.timers()
    }

    pub fn replicated(&self) -> &ReplicatedState {
        &self.replicated
    }

    pub fn variant(&self) -> Result<AiVariant, UnknownVariant> {
        self.variant.resolve()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_too_big(&self) -> bool {
        self.too_big
    }

    pub fn is_outside(&self) -> bool {
        self.is_outside
    }

    pub fn is_authority(&self) -> bool {
        self.replicated.owner() == self.local
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// The collider acts as a trigger while moving or leaving.
    pub fn collider_is_trigger(&self) -> bool {
        self.leaving || self.replicated.velocity() > TRIGGER_SPEED_THRESHOLD
    }

    // --- Host-driven lifecycle ---

    /// Ownership moved; decided by the host.
    pub fn set_owner(&mut self, owner: ParticipantId) {
        self.replicated.transfer(owner);
    }

    /// Accept replicated values broadcast by the owner.
    pub fn apply_replicated(&mut self, snapshot: &ReplicatedSnapshot) -> bool {
        self.replicated.apply_snapshot(self.local, snapshot)
    }

    pub fn kill(&mut self) {
        self.is_dead = true;
    }

    /// Daytime is over; the creature stops interacting.
    pub fn daytime_leave(&mut self) {
        self.leaving = true;
    }

    // --- Entry points ---

    /// Slow-interval evaluation: state transitions and search start/stop.
    pub fn on_interval(&mut self, pose: &Pose, host: &mut HostContext<'_>) {
        if self.leaving || self.is_dead {
            return;
        }
        if !host.world.players().iter().any(|p| p.is_active()) {
            return;
        }

        let ctx = IntervalContext {
            state: self.state,
            creature: self.view(pose),
            is_authority: self.is_authority(),
            search_in_progress: host.search.in_progress(),
            world: host.world,
        };

        match fsm::evaluate_interval(&ctx) {
            IntervalDecision::Hold => {}
            IntervalDecision::RequestAuthority => {
                let first = host.network.first_participant();
                if first != self.replicated.owner() {
                    host.network.request_authority(first);
                }
            }
            IntervalDecision::StartSearch => {
                host.search.start(pose.position);
                debug!(position = ?pose.position, "start search");
            }
            IntervalDecision::BeginChase { target } => {
                self.target = Some(target);
                self.flags.moving_toward_target = true;
                self.switch_state(BehaviorState::Chasing, host);
                debug!(?target, "found player, chasing");
            }
            IntervalDecision::StopSearch { target } => {
                host.search.stop();
                self.target = Some(target);
                self.flags.moving_toward_target = true;
                debug!(?target, "stop search");
            }
            IntervalDecision::LoseTarget => {
                self.flags.moving_toward_target = false;
            }
            IntervalDecision::ReturnToSearch => {
                self.flags.moving_toward_target = false;
                self.switch_state(BehaviorState::Searching, host);
                debug!("lost player, searching");
            }
        }
    }

    /// Per-frame evaluation: motion, variant rules, fear and chase upkeep.
    pub fn on_frame(&mut self, input: &FrameInput, pose: &mut Pose, host: &mut HostContext<'_>) {
        if self.leaving {
            return;
        }
        self.stun_timer = input.stun_timer;
        self.write_replicated(|w| {
            w.set_velocity(input.measured_speed);
        });
        if self.is_dead {
            return;
        }

        self.last_speed = input.measured_speed;
        self.run_pending_entry();
        let creature = self.view(pose);
        let perception = match self.state {
            BehaviorState::Chasing => Perception {
                observed: is_observed(&creature, host.world),
                player_in_sight: any_player_in_sight(&creature, host.world),
            },
            BehaviorState::Searching => Perception::default(),
        };

        self.update_agent_speed(input.dt, &creature, &perception, host);
        self.time_since_hit += input.dt;
        self.check_fear(&creature, host);

        match self.state {
            BehaviorState::Searching => self.searching_frame(&creature, host),
            BehaviorState::Chasing => self.chasing_frame(input, pose, &perception, host),
        }
    }

    /// A player touched the creature.
    pub fn on_collide(&mut self, player: PlayerId, host: &mut HostContext<'_>) -> CollisionOutcome {
        if self.leaving {
            return CollisionOutcome::Ignored(IgnoreReason::Leaving);
        }
        if self.time_since_hit < HIT_COOLDOWN_SECS {
            return CollisionOutcome::Ignored(IgnoreReason::Cooldown);
        }
        if self.is_dead {
            return CollisionOutcome::Ignored(IgnoreReason::Dead);
        }
        if self.stun_timer >= 0.0 {
            return CollisionOutcome::Ignored(IgnoreReason::Stunned);
        }
        let Some(snapshot) = host.world.player(player) else {
            return CollisionOutcome::Ignored(IgnoreReason::IneligiblePlayer);
        };
        if !is_eligible(self.is_outside, snapshot) {
            return CollisionOutcome::Ignored(IgnoreReason::IneligiblePlayer);
        }
        if self.too_big && snapshot.in_safe_room {
            return CollisionOutcome::Ignored(IgnoreReason::SafeRoom);
        }

        self.time_since_hit = HIT_CLOCK_RESTART_SECS;
        self.agent.speed = 0.0;
        host.events.push(PresentationEvent::PlayerHit {
            player,
            damage: LETHAL_DAMAGE,
        });
        host.events.push(PresentationEvent::Fear {
            level: FEAR_HIT_LEVEL,
        });
        debug!(?player, damage = LETHAL_DAMAGE, "hit player");
        CollisionOutcome::Hit {
            player,
            damage: LETHAL_DAMAGE,
        }
    }

    /// End-of-round reset. Only the authority acts; everyone else gets the
    /// broadcasts.
    pub fn reset(&mut self, host: &mut HostContext<'_>) {
        if !self.is_authority() {
            return;
        }
        self.write_replicated(|w| {
            w.clear_all_timers();
        });
        self.switch_state(BehaviorState::Searching, host);
        self.send(ChaseNotification::EndChase, host);
        self.send(ChaseNotification::ResetFlags, host);
    }

    /// Apply a notification from the authority. Idempotent.
    pub fn apply_notification(&mut self, notification: &ChaseNotification) {
        match *notification {
            ChaseNotification::BeginChase { target } => {
                self.state = BehaviorState::Chasing;
                self.target = Some(target);
                self.flags.moving_toward_target = true;
            }
            ChaseNotification::EndChase => {
                self.flags.moving_toward_target = false;
                self.state = BehaviorState::Searching;
            }
            ChaseNotification::SwitchState { state } => {
                self.state = state;
            }
            ChaseNotification::ResetFlags => {
                self.flags.is_aggro = false;
                self.flags.was_stopped = false;
                self.flags.was_feared = false;
            }
        }
    }

    // --- Frame internals ---

    fn update_agent_speed(
        &mut self,
        dt: f32,
        creature: &CreatureView,
        perception: &Perception,
        host: &mut HostContext<'_>,
    ) {
        if self.stun_timer >= 0.0 {
            self.agent.freeze();
            return;
        }

        if self.state == BehaviorState::Searching {
            self.agent.accelerate(&self.settings, dt);
            return;
        }

        let authority = self.is_authority();
        if authority && !is_on_walkable_surface(host.world, creature.pose.position) {
            self.agent.accelerate(&self.settings, dt);
            debug!("not on walkable surface");
            return;
        }

        let mut memory = VariantMemory {
            is_aggro: self.flags.is_aggro,
            timers: self.replicated.timers(),
        };
        if authority {
            memory.timers.look = if perception.observed {
                memory.timers.look + dt
            } else {
                0.0
            };
        }

        match self.variant.resolve() {
            Ok(variant) => {
                let mut tick = VariantTick {
                    dt,
                    settings: &self.settings,
                    authority,
                    rng: &mut *host.rng,
                };
                let intent = strategy_for(variant).decide_timers(perception, &mut memory, &mut tick);
                self.agent.apply(intent, &self.settings, dt);
            }
            Err(err) => warn!(%err, "no motion decision this frame"),
        }

        self.flags.is_aggro = memory.is_aggro;
        if authority && memory.timers != self.replicated.timers() {
            self.write_replicated(|w| {
                w.set_timers(memory.timers);
            });
        }
    }

    fn check_fear(&mut self, creature: &CreatureView, host: &mut HostContext<'_>) {
        if !self.flags.was_stopped || self.flags.was_feared {
            return;
        }
        let Some(local) = host.world.local_player().and_then(|id| host.world.player(id)) else {
            return;
        };
        if !local.is_active()
            || !player_sees(
                host.world,
                local,
                creature.eye(),
                FEAR_VIEW_WIDTH_DEG,
                FEAR_VIEW_RANGE,
            )
        {
            return;
        }

        self.flags.was_feared = true;
        let distance = creature.distance_to(local);
        if distance < FEAR_CLOSE_DISTANCE {
            host.events.push(PresentationEvent::Fear {
                level: FEAR_CLOSE_LEVEL,
            });
        } else if distance < FEAR_NEAR_DISTANCE {
            host.events.push(PresentationEvent::Fear {
                level: FEAR_NEAR_LEVEL,
            });
        }
        if self.last_speed > STOP_NOISE_MIN_SPEED {
            host.events.push(PresentationEvent::StopNoise);
        }
    }

    fn searching_frame(&mut self, creature: &CreatureView, host: &mut HostContext<'_>) {
        if !self.is_authority() || self.flags.wants_to_chase {
            return;
        }
        if let Some(target) =
            find_chase_candidate(creature, host.world, SightRequirement::InViewCone)
        {
            self.flags.wants_to_chase = true;
            self.send(ChaseNotification::BeginChase { target }, host);
            debug!(?target, "began chasing");
        }
    }

    fn chasing_frame(
        &mut self,
        input: &FrameInput,
        pose: &mut Pose,
        perception: &Perception,
        host: &mut HostContext<'_>,
    ) {
        if input.stun_timer > 0.0 {
            return;
        }

        let last_target = self.target;
        if self.is_authority() {
            let creature = self.view(pose);
            match fsm::revalidate_target(&creature, host.world) {
                Some(target) => self.target = Some(target),
                None => {
                    self.send(ChaseNotification::EndChase, host);
                    debug!("not in range, searching");
                    return;
                }
            }

            if self.flags.was_stopped
                && self.settings.rotate_to_look_at_player
                && self.replicated.timers().look >= self.settings.delay_before_looking_at_player
            {
                if let Some(player) = self.target.and_then(|id| host.world.player(id)) {
                    let t = if self.settings.look_at_player_duration > 0.0 {
                        input.dt / self.settings.look_at_player_duration
                    } else {
                        1.0
                    };
                    pose.rotation = face_toward(pose.rotation, pose.position, player.position, t);
                }
            }
        }

        let memory = VariantMemory {
            is_aggro: self.flags.is_aggro,
            timers: self.replicated.timers(),
        };
        let stop = match self.variant.resolve() {
            Ok(variant) => strategy_for(variant).decide_stop(perception, &memory),
            Err(_) => false,
        };
        if stop {
            self.flags.was_stopped = true;
            return;
        }

        self.flags.was_stopped = false;
        self.flags.was_feared = false;

        if self.is_authority() && last_target != self.target {
            self.flags.moving_toward_target = true;
            debug!(target = ?self.target, "moving toward new target");
        }
    }

    /// Entry actions for the current state, once per switch.
    fn run_pending_entry(&mut self) {
        match self.state {
            BehaviorState::Chasing if !self.flags.entered_chase => {
                self.run_entry_actions(BehaviorState::Chasing);
            }
            BehaviorState::Searching if self.flags.entered_chase => {
                self.run_entry_actions(BehaviorState::Searching);
                self.agent.speed = 0.0;
            }
            _ => {}
        }
    }

    fn run_entry_actions(&mut self, entering: BehaviorState) {
        let preserve = self
            .variant
            .resolve()
            .map(AiVariant::preserves_aggro)
            .unwrap_or(false);
        let mut timers = self.replicated.timers();
        fsm::apply_entry_reset(&mut self.flags, &mut timers, entering, preserve);
        if timers != self.replicated.timers() {
            self.write_replicated(|w| {
                w.set_timers(timers);
            });
        }
    }

    // --- Helpers ---

    fn view(&self, pose: &Pose) -> CreatureView {
        CreatureView {
            pose: *pose,
            is_outside: self.is_outside,
        }
    }

    /// Switch locally and mirror the switch to every other participant.
    fn switch_state(&mut self, state: BehaviorState, host: &mut HostContext<'_>) {
        self.send(ChaseNotification::SwitchState { state }, host);
    }

    /// Broadcast a notification and apply it locally.
    fn send(&mut self, notification: ChaseNotification, host: &mut HostContext<'_>) {
        self.apply_notification(&notification);
        host.network.broadcast(notification);
    }

    /// Run `write` against the replicated store if this participant owns it.
    fn write_replicated(&mut self, write: impl FnOnce(&mut ReplicatedWriter<'_>)) {
        let Some(token) = self.replicated.authority(self.local) else {
            return;
        };
        match self.replicated.writer(&token) {
            Ok(mut writer) => write(&mut writer),
            Err(err) => warn!(%err, "rejected replicated write"),
        }
    }
}
