//! Session engine: the headless host.
//!
//! `Session` owns the hecs ECS world, processes host commands, dispatches
//! ticks from its tick source to the controllers, runs the host-side
//! systems and produces `SessionSnapshot`s.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rolling_giant_ai::random::SessionRng;
use rolling_giant_ai::CreatureController;
use rolling_giant_core::commands::HostCommand;
use rolling_giant_core::config::GiantConfig;
use rolling_giant_core::constants::DEFAULT_ARENA_HALF_EXTENT;
use rolling_giant_core::enums::AiVariant;
use rolling_giant_core::error::ConfigError;
use rolling_giant_core::events::SessionEvent;
use rolling_giant_core::state::SessionSnapshot;
use rolling_giant_core::types::{GiantId, ParticipantId, PlayerId, SimTime, VariantId};

use crate::adapter::{FixedTicks, Tick, TickSource};
use crate::components::{Giant, NavAgent, Player};
use crate::systems;
use crate::systems::perception::WorldView;
use crate::world_setup::{self, Ownership};

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub giant: GiantConfig,
    /// Participant this session runs as. Also tracked as "first".
    pub local: ParticipantId,
    /// Owner assigned to newly spawned giants.
    pub spawn_owner: ParticipantId,
    /// Player whose view drives fear presentation.
    pub local_player: Option<PlayerId>,
    pub arena_half_extent: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            giant: GiantConfig::default(),
            local: ParticipantId(0),
            spawn_owner: ParticipantId(0),
            local_player: Some(PlayerId(0)),
            arena_half_extent: DEFAULT_ARENA_HALF_EXTENT,
        }
    }
}

pub struct Session {
    world: World,
    time: SimTime,
    config: SessionConfig,
    rng: ChaCha8Rng,
    ai_rng: SessionRng,
    variant: AiVariant,
    ticks: Box<dyn TickSource>,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SessionEvent>,
    next_giant_id: u32,
}

impl SessionConfig {
    /// Parse a JSON session config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.giant.validate()?;
        Ok(config)
    }
}

impl Session {
    /// Create a session. The variant is picked once, here, from the pool.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let ticks = FixedTicks::with_interval(config.giant.ai_interval_secs);
        Self::with_tick_source(config, Box::new(ticks))
    }

    pub fn with_tick_source(
        config: SessionConfig,
        ticks: Box<dyn TickSource>,
    ) -> Result<Self, ConfigError> {
        config.giant.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let pool = &config.giant.variant_pool;
        let variant = pool[rng.gen_range(0..pool.len())];
        let ai_rng = SessionRng::for_round(rng.gen());
        info!(%variant, seed = config.seed, "session created");

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            config,
            rng,
            ai_rng,
            variant,
            ticks,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_giant_id: 0,
        })
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn spawn_player(&mut self, id: PlayerId, position: Vec3, inside_factory: bool) {
        world_setup::spawn_player(&mut self.world, id, position, inside_factory);
    }

    /// Spawn a giant running the session's variant.
    pub fn spawn_giant(&mut self, position: Vec3, is_outside: bool) -> GiantId {
        self.spawn_giant_with_variant(position, is_outside, self.variant.into())
    }

    /// Spawn a giant with an explicit variant id, known or not.
    pub fn spawn_giant_with_variant(
        &mut self,
        position: Vec3,
        is_outside: bool,
        variant: VariantId,
    ) -> GiantId {
        let id = GiantId(self.next_giant_id);
        self.next_giant_id += 1;
        world_setup::spawn_giant(
            &mut self.world,
            &mut self.rng,
            &self.config.giant,
            id,
            position,
            is_outside,
            variant,
            Ownership {
                owner: self.config.spawn_owner,
                local: self.config.local,
            },
        );
        id
    }

    pub fn spawn_occluder(&mut self, min: Vec3, max: Vec3) {
        world_setup::spawn_occluder(&mut self.world, min, max);
    }

    /// Advance one host step and return the resulting snapshot.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.process_commands();

        let mut due = Vec::new();
        self.ticks.advance(&mut due);
        for tick in due {
            match tick {
                Tick::Interval => self.run_interval(),
                Tick::Frame { dt } => {
                    self.run_frame(dt);
                    self.time.advance();
                }
            }
        }

        self.despawn();
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.variant, events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn variant(&self) -> AiVariant {
        self.variant
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Copy of a giant's controller, for inspection.
    pub fn controller(&self, id: GiantId) -> Option<CreatureController> {
        self.world
            .query::<&Giant>()
            .iter()
            .find(|(_, giant)| giant.id == id)
            .map(|(_, giant)| giant.controller.clone())
    }

    fn view(&self) -> WorldView {
        WorldView::gather(
            &self.world,
            self.config.local_player,
            self.config.arena_half_extent,
        )
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::MovePlayer {
                player,
                position,
                look_at,
            } => {
                for (_entity, p) in self.world.query_mut::<&mut Player>() {
                    if p.snapshot.id == player {
                        p.snapshot.move_to(position);
                        p.snapshot.look_at(look_at);
                    }
                }
            }
            HostCommand::LookAt { player, point } => {
                for (_entity, p) in self.world.query_mut::<&mut Player>() {
                    if p.snapshot.id == player {
                        p.snapshot.look_at(point);
                    }
                }
            }
            HostCommand::SetInSafeRoom { player, inside } => {
                for (_entity, p) in self.world.query_mut::<&mut Player>() {
                    if p.snapshot.id == player {
                        p.snapshot.in_safe_room = inside;
                    }
                }
            }
            HostCommand::SetTargetable { player, targetable } => {
                for (_entity, p) in self.world.query_mut::<&mut Player>() {
                    if p.snapshot.id == player {
                        p.snapshot.is_targetable = targetable;
                    }
                }
            }
            HostCommand::Stun { giant, secs } => {
                for (_entity, (g, agent)) in self.world.query_mut::<(&Giant, &mut NavAgent)>() {
                    if g.id == giant {
                        agent.stun_timer = secs.max(0.0);
                    }
                }
            }
            HostCommand::DaytimeLeave { giant } => {
                for (_entity, g) in self.world.query_mut::<&mut Giant>() {
                    if g.id == giant {
                        g.controller.daytime_leave();
                        debug!(?giant, "leaving for the day");
                    }
                }
            }
            HostCommand::Despawn { giant } => {
                for (entity, g) in self.world.query_mut::<&Giant>() {
                    if g.id == giant {
                        self.despawn_buffer.push(entity);
                    }
                }
            }
            HostCommand::ResetRound => {
                let view = self.view();
                systems::ai::reset_all(
                    &mut self.world,
                    &view,
                    &mut self.ai_rng,
                    self.config.local,
                    &mut self.events,
                );
                self.ai_rng.begin_round(self.rng.gen());
                info!("round reset");
            }
        }
    }

    fn run_interval(&mut self) {
        let view = self.view();
        systems::ai::run_interval(
            &mut self.world,
            &view,
            &mut self.ai_rng,
            self.config.local,
            &mut self.events,
        );
    }

    /// Run all per-frame systems in order.
    fn run_frame(&mut self, dt: f32) {
        let half_extent = self.config.arena_half_extent;

        // 1. Controllers
        let view = self.view();
        systems::ai::run_frame(
            &mut self.world,
            &view,
            &mut self.ai_rng,
            self.config.local,
            dt,
            &mut self.events,
        );
        // 2. Area searches
        systems::search::run(&mut self.world, &mut self.rng, half_extent, dt);
        // 3. Agent movement
        systems::movement::run(&mut self.world, &view, half_extent, dt);
        // 4. Contacts, against post-movement positions
        let view = self.view();
        systems::collision::run(
            &mut self.world,
            &view,
            &mut self.ai_rng,
            self.config.local,
            &mut self.events,
        );
    }

    fn despawn(&mut self) {
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }
}
