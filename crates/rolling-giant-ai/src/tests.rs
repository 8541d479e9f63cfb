#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::{Quat, Vec3};

    use rolling_giant_core::config::SharedAiSettings;
    use rolling_giant_core::constants::*;
    use rolling_giant_core::enums::{AiVariant, BehaviorState};
    use rolling_giant_core::events::{ChaseNotification, PresentationEvent};
    use rolling_giant_core::state::TimerValues;
    use rolling_giant_core::types::{ParticipantId, PlayerId, PlayerSnapshot, Pose, VariantId};

    use crate::controller::{
        CollisionOutcome, CreatureController, FrameInput, IgnoreReason, SpawnParams,
    };
    use crate::random::SessionRng;
    use crate::world::{HostContext, NetworkChannel, SearchRoutine, WorldQuery};

    const HOST: ParticipantId = ParticipantId(0);
    const CLIENT: ParticipantId = ParticipantId(1);
    const P0: PlayerId = PlayerId(0);

    // ---- Fakes ----

    /// Open level with a flat floor at y = 0 and the creature at the origin.
    struct FakeWorld {
        players: Vec<PlayerSnapshot>,
        local: Option<PlayerId>,
        blocked: bool,
        walkable: bool,
    }

    impl FakeWorld {
        fn with_player_at(z: f32) -> Self {
            Self {
                players: vec![PlayerSnapshot::standing(P0, Vec3::new(0.0, 0.0, z))],
                local: Some(P0),
                blocked: false,
                walkable: true,
            }
        }

        fn empty() -> Self {
            Self {
                players: Vec::new(),
                local: None,
                blocked: false,
                walkable: true,
            }
        }

        fn player_mut(&mut self, id: PlayerId) -> &mut PlayerSnapshot {
            self.players
                .iter_mut()
                .find(|p| p.id == id)
                .expect("player in roster")
        }

        /// Aim P0 at the creature, or away from it.
        fn watch(&mut self, watching: bool) {
            let player = self.player_mut(P0);
            if watching {
                player.look_at(Vec3::new(0.0, OBSERVED_POINT_HEIGHT, 0.0));
            } else {
                player.camera_forward = Vec3::Z;
            }
        }
    }

    impl WorldQuery for FakeWorld {
        fn players(&self) -> &[PlayerSnapshot] {
            &self.players
        }

        fn is_unobstructed(&self, _from: Vec3, _to: Vec3) -> bool {
            !self.blocked
        }

        fn nearest_walkable(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
            self.walkable.then(|| Vec3::new(point.x, 0.0, point.z))
        }

        fn local_player(&self) -> Option<PlayerId> {
            self.local
        }
    }

    #[derive(Default)]
    struct FakeSearch {
        running: bool,
        starts: u32,
        stops: u32,
    }

    impl SearchRoutine for FakeSearch {
        fn start(&mut self, _origin: Vec3) {
            self.running = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.running = false;
            self.stops += 1;
        }

        fn in_progress(&self) -> bool {
            self.running
        }
    }

    struct FakeNetwork {
        sent: Vec<ChaseNotification>,
        requests: Vec<ParticipantId>,
        first: ParticipantId,
    }

    impl NetworkChannel for FakeNetwork {
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

    struct Harness {
        world: FakeWorld,
        search: FakeSearch,
        network: FakeNetwork,
        rng: SessionRng,
        events: Vec<PresentationEvent>,
        pose: Pose,
    }

    impl Harness {
        fn new(world: FakeWorld) -> Self {
            Self {
                world,
                search: FakeSearch::default(),
                network: FakeNetwork {
                    sent: Vec::new(),
                    requests: Vec::new(),
                    first: HOST,
                },
                rng: SessionRng::for_round(7),
                events: Vec::new(),
                pose: Pose::default(),
            }
        }

        fn host(&mut self) -> HostContext<'_> {
            HostContext {
                world: &self.world,
                search: &mut self.search,
                network: &mut self.network,
                rng: &mut self.rng,
                events: &mut self.events,
            }
        }

        fn frame(&mut self, giant: &mut CreatureController) {
            self.frame_with(giant, FRAME_DT, -1.0);
        }

        fn frames(&mut self, giant: &mut CreatureController, count: usize) {
            for _ in 0..count {
                self.frame(giant);
            }
        }

        /// One frame where the agent reached exactly the speed it was asked for.
        fn frame_with(&mut self, giant: &mut CreatureController, dt: f32, stun_timer: f32) {
            let input = FrameInput {
                dt,
                measured_speed: giant.agent().speed,
                stun_timer,
            };
            let mut pose = self.pose;
            giant.on_frame(&input, &mut pose, &mut self.host());
            self.pose = pose;
        }

        fn interval(&mut self, giant: &mut CreatureController) {
            let pose = self.pose;
            giant.on_interval(&pose, &mut self.host());
        }

        fn collide(&mut self, giant: &mut CreatureController, player: PlayerId) -> CollisionOutcome {
            giant.on_collide(player, &mut self.host())
        }

        fn reset(&mut self, giant: &mut CreatureController) {
            giant.reset(&mut self.host());
        }
    }

    fn settings() -> SharedAiSettings {
        SharedAiSettings {
            move_speed: 6.0,
            move_acceleration: 2.0,
            move_deceleration: 0.3,
            look_time_before_agro: 2.0,
            wait_time_min: 1.0,
            wait_time_max: 3.0,
            random_move_time_min: 1.0,
            random_move_time_max: 3.0,
            ..SharedAiSettings::default()
        }
    }

    fn spawn_with(
        variant: VariantId,
        scale: f32,
        is_outside: bool,
        local: ParticipantId,
    ) -> CreatureController {
        CreatureController::new(SpawnParams {
            is_outside,
            scale,
            variant,
            owner: HOST,
            local,
            settings: settings(),
        })
    }

    fn spawn(variant: AiVariant) -> CreatureController {
        spawn_with(variant.into(), 1.0, false, HOST)
    }

    fn begin_chase(giant: &mut CreatureController) {
        giant.apply_notification(&ChaseNotification::BeginChase { target: P0 });
    }

    // ---- Variants ----

    #[test]
    fn test_coilhead_stops_every_observed_frame() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);

        h.frames(&mut giant, 60);
        assert!(!giant.flags().was_stopped);
        let mut speed = giant.agent().speed;
        assert!(speed > 1.0, "should be rolling before observed, got {speed}");

        h.world.watch(true);
        for frame in 0..3 {
            h.frame(&mut giant);
            assert!(giant.flags().was_stopped, "frame {frame} not stopped");
            assert!(giant.agent().speed < speed, "frame {frame} did not slow down");
            speed = giant.agent().speed;
        }
        assert_eq!(giant.state(), BehaviorState::Chasing);
    }

    #[test]
    fn test_coilhead_resumes_when_unobserved() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frames(&mut giant, 10);
        assert!(giant.flags().was_stopped);

        h.world.watch(false);
        let before = giant.agent().speed;
        h.frame(&mut giant);
        assert!(!giant.flags().was_stopped);
        assert!(giant.agent().speed > before);
    }

    #[test]
    fn test_inverse_coilhead_freezes_when_unwatched_but_seen() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::InverseCoilhead);
        begin_chase(&mut giant);

        // Watched: keeps moving and commits to aggro.
        h.world.watch(true);
        h.frames(&mut giant, 5);
        assert!(giant.flags().is_aggro);
        assert!(!giant.flags().was_stopped);

        // Unwatched while it can still see the player: stops.
        h.world.watch(false);
        h.frame(&mut giant);
        assert!(giant.flags().was_stopped);
    }

    #[test]
    fn test_randomly_move_samples_wait_then_move() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::RandomlyMoveWhileLooking);
        begin_chase(&mut giant);
        h.world.watch(true);

        assert_eq!(giant.timers(), TimerValues::default());
        h.frame(&mut giant);
        let wait = giant.timers().wait;
        assert!(
            (1.0 - FRAME_DT..=3.0).contains(&wait),
            "wait sampled from configured range, got {wait}"
        );
        assert_eq!(giant.timers().movement, 0.0);
        assert!(giant.flags().was_stopped);

        let mut frames = 0;
        while giant.timers().movement <= 0.0 {
            h.frame(&mut giant);
            frames += 1;
            assert!(frames < 400, "move timer never sampled");
        }
        let movement = giant.timers().movement;
        assert!(giant.timers().wait <= 0.0);
        assert!((1.0..=3.0).contains(&movement), "got {movement}");
        assert!(!giant.flags().was_stopped);

        // Motion resumes while the move timer runs.
        let before = giant.agent().speed;
        h.frame(&mut giant);
        assert!(giant.agent().speed > before);
        assert!(!giant.flags().was_stopped);
    }

    #[test]
    fn test_randomly_move_non_authority_never_samples() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn_with(AiVariant::RandomlyMoveWhileLooking.into(), 1.0, false, CLIENT);
        begin_chase(&mut giant);
        h.world.watch(true);

        h.frames(&mut giant, 30);
        assert_eq!(giant.timers(), TimerValues::default());
        assert_eq!(giant.replicated().version(), 0);
    }

    #[test]
    fn test_looking_too_long_aggro_is_monotonic_and_bounded() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::LookingTooLongKeepsAgro);
        begin_chase(&mut giant);
        h.frame(&mut giant);

        h.world.watch(true);
        let mut last = giant.timers().aggro;
        for _ in 0..60 {
            h.frame(&mut giant);
            let aggro = giant.timers().aggro;
            assert!(aggro > last && aggro <= AGGRO_FULL);
            assert!(giant.flags().was_stopped);
            last = aggro;
        }
        // 1 s of a 2 s look time.
        assert!((last - 0.5).abs() < 0.01, "got {last}");

        h.world.watch(false);
        for _ in 0..60 {
            h.frame(&mut giant);
            let aggro = giant.timers().aggro;
            assert!(aggro < last && aggro >= 0.0);
            last = aggro;
        }

        h.world.watch(true);
        h.frames(&mut giant, 240);
        assert_eq!(giant.timers().aggro, AGGRO_FULL);
        assert!(giant.flags().is_aggro);
        // Full aggro: stares no longer stop it.
        assert!(!giant.flags().was_stopped);
    }

    #[test]
    fn test_follow_once_never_stops_at_gate() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::FollowOnceAgro);
        begin_chase(&mut giant);
        h.world.watch(true);

        h.frame(&mut giant);
        assert!(giant.flags().is_aggro);
        for _ in 0..10 {
            h.frame(&mut giant);
            assert!(!giant.flags().was_stopped);
        }
    }

    #[test]
    fn test_once_seen_keeps_aggro_across_chase_cycle() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::OnceSeenAgroAfterTimer);
        begin_chase(&mut giant);
        h.world.watch(true);

        h.frame(&mut giant);
        assert!(giant.flags().is_aggro);
        let countdown = giant.timers().aggro;
        assert!((1.0..=3.0).contains(&countdown), "got {countdown}");
        assert!(giant.flags().was_stopped);

        giant.apply_notification(&ChaseNotification::EndChase);
        assert_eq!(giant.state(), BehaviorState::Searching);
        h.frame(&mut giant);
        assert!(giant.flags().is_aggro);
        assert_eq!(giant.timers().aggro, countdown);
        assert_eq!(giant.timers().wait, 0.0);
        assert_eq!(giant.timers().look, 0.0);

        begin_chase(&mut giant);
        h.frame(&mut giant);
        assert!(giant.flags().is_aggro);
        assert!(giant.timers().aggro < countdown);
    }

    #[test]
    fn test_once_seen_chases_after_countdown() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::OnceSeenAgroAfterTimer);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frame(&mut giant);

        let mut frames = 0;
        while giant.timers().aggro > 0.0 {
            assert!(giant.flags().was_stopped);
            h.frame(&mut giant);
            frames += 1;
            assert!(frames < 400);
        }
        h.frame(&mut giant);
        assert!(!giant.flags().was_stopped);
    }

    #[test]
    fn test_other_variants_clear_aggro_on_leaving_chase() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::LookingTooLongKeepsAgro);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frames(&mut giant, 30);
        assert!(giant.timers().aggro > 0.0);

        giant.apply_notification(&ChaseNotification::EndChase);
        h.frame(&mut giant);
        assert_eq!(giant.timers().aggro, 0.0);
        assert!(!giant.flags().is_aggro);
    }

    #[test]
    fn test_unknown_variant_degrades_without_motion_decision() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn_with(VariantId(42), 1.0, false, HOST);
        assert!(giant.variant().is_err());
        begin_chase(&mut giant);
        h.world.watch(true);

        let before = giant.agent();
        h.frames(&mut giant, 5);
        assert_eq!(giant.agent(), before);
        assert!(!giant.flags().was_stopped);
        assert_eq!(giant.state(), BehaviorState::Chasing);
    }

    // ---- Motion ----

    #[test]
    fn test_stun_freezes_motion_and_skips_chase() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.frames(&mut giant, 30);
        assert!(giant.agent().speed > 0.0);

        h.world.blocked = true;
        h.frame_with(&mut giant, FRAME_DT, 1.0);
        assert_eq!(giant.agent().speed, 0.0);
        assert_eq!(giant.agent().acceleration, MAX_AGENT_ACCELERATION);
        // The lost sightline was not noticed while stunned.
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert!(h.network.sent.is_empty());
    }

    #[test]
    fn test_off_surface_forces_acceleration() {
        let mut world = FakeWorld::with_player_at(10.0);
        world.walkable = false;
        let mut h = Harness::new(world);
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.world.watch(true);

        let before = giant.agent().speed;
        h.frame(&mut giant);
        assert!(giant.agent().speed > before);
    }

    #[test]
    fn test_rotates_toward_target_while_stopped() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        h.pose.rotation = Quat::from_rotation_y(PI);
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.world.watch(true);

        h.frames(&mut giant, 20);
        // Not looked at long enough yet.
        assert!(h.pose.forward().z < -0.99);

        h.frames(&mut giant, 60);
        assert!(h.pose.forward().z > -0.9, "got {:?}", h.pose.forward());
        assert_eq!(h.pose.position, Vec3::ZERO);
    }

    // ---- Presentation ----

    #[test]
    fn test_fear_raised_once_per_stop() {
        let mut h = Harness::new(FakeWorld::with_player_at(3.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.frames(&mut giant, 60);

        h.world.watch(true);
        h.frames(&mut giant, 3);
        assert!(giant.flags().was_feared);
        assert_eq!(
            h.events,
            vec![
                PresentationEvent::Fear {
                    level: FEAR_CLOSE_LEVEL
                },
                PresentationEvent::StopNoise,
            ]
        );
    }

    #[test]
    fn test_far_observer_gets_no_fear_level() {
        let mut h = Harness::new(FakeWorld::with_player_at(20.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frames(&mut giant, 3);
        assert!(giant.flags().was_feared);
        assert!(!h
            .events
            .iter()
            .any(|e| matches!(e, PresentationEvent::Fear { .. })));
    }

    // ---- Interval transitions ----

    #[test]
    fn test_interval_starts_search_then_begins_chase() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);

        h.interval(&mut giant);
        assert_eq!(h.search.starts, 1);
        assert_eq!(giant.state(), BehaviorState::Searching);

        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert_eq!(giant.target(), Some(P0));
        assert!(giant.flags().moving_toward_target);
        assert_eq!(
            h.network.sent,
            vec![ChaseNotification::SwitchState {
                state: BehaviorState::Chasing
            }]
        );

        // Still searching: the next interval stops the area search.
        h.interval(&mut giant);
        assert_eq!(h.search.stops, 1);
        assert!(!h.search.running);
    }

    #[test]
    fn test_interval_ignores_out_of_range_or_blocked() {
        let mut h = Harness::new(FakeWorld::with_player_at(INSIDE_CHASE_RANGE + 5.0));
        let mut giant = spawn(AiVariant::Coilhead);
        h.interval(&mut giant);
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);

        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        h.world.blocked = true;
        h.interval(&mut giant);
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
    }

    #[test]
    fn test_interval_requires_targetable_inside() {
        let mut world = FakeWorld::with_player_at(10.0);
        world.player_mut(P0).is_targetable = false;
        let mut h = Harness::new(world);
        let mut giant = spawn(AiVariant::Coilhead);
        h.interval(&mut giant);
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
    }

    #[test]
    fn test_interval_noop_without_active_players() {
        let mut h = Harness::new(FakeWorld::empty());
        let mut giant = spawn(AiVariant::Coilhead);
        h.interval(&mut giant);
        assert_eq!(h.search.starts, 0);

        let mut world = FakeWorld::with_player_at(10.0);
        world.player_mut(P0).is_dead = true;
        let mut h = Harness::new(world);
        h.interval(&mut giant);
        assert_eq!(h.search.starts, 0);
    }

    #[test]
    fn test_non_authority_requests_handoff_to_first_participant() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, false, CLIENT);

        // Already owned by the first participant: nothing to ask for.
        h.interval(&mut giant);
        assert!(h.network.requests.is_empty());

        h.network.first = CLIENT;
        h.interval(&mut giant);
        assert_eq!(h.network.requests, vec![CLIENT]);
        assert_eq!(h.search.starts, 0);
        assert_eq!(giant.state(), BehaviorState::Searching);
    }

    #[test]
    fn test_chasing_interval_returns_to_search_on_loss() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);

        h.world.blocked = true;
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
        assert!(!giant.flags().moving_toward_target);
        assert_eq!(
            h.network.sent,
            vec![ChaseNotification::SwitchState {
                state: BehaviorState::Searching
            }]
        );
    }

    #[test]
    fn test_chasing_interval_with_search_running_only_drops_target() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.search.running = true;

        h.world.blocked = true;
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert!(!giant.flags().moving_toward_target);
    }

    #[test]
    fn test_outside_creature_never_acquires_inside_player() {
        let mut h = Harness::new(FakeWorld::with_player_at(40.0));
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, true, HOST);
        h.interval(&mut giant);
        h.interval(&mut giant);
        h.frame(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
        assert_eq!(giant.target(), None);
        assert!(!h
            .network
            .sent
            .iter()
            .any(|n| matches!(n, ChaseNotification::BeginChase { .. })));
    }

    #[test]
    fn test_outside_creature_acquires_outside_player_in_range() {
        let mut h = Harness::new(FakeWorld::with_player_at(40.0));
        h.world.player_mut(P0).is_inside_factory = false;
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, true, HOST);
        h.interval(&mut giant);
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert_eq!(giant.target(), Some(P0));
    }

    #[test]
    fn test_chasing_outside_creature_keeps_nearest_player_without_sightline() {
        let mut h = Harness::new(FakeWorld::with_player_at(40.0));
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, true, HOST);
        begin_chase(&mut giant);

        h.world.blocked = true;
        h.interval(&mut giant);
        h.frame(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert_eq!(giant.target(), Some(P0));
    }

    // ---- Frame transitions ----

    #[test]
    fn test_searching_frame_begins_chase_on_sight() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);

        h.frame(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert_eq!(
            h.network.sent,
            vec![ChaseNotification::BeginChase { target: P0 }]
        );

        h.frame(&mut giant);
        assert!(giant.flags().entered_chase);
        assert!(!giant.flags().wants_to_chase);
    }

    #[test]
    fn test_searching_frame_needs_player_in_view_cone() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        h.pose.rotation = Quat::from_rotation_y(PI);
        let mut giant = spawn(AiVariant::Coilhead);
        h.frames(&mut giant, 5);
        assert_eq!(giant.state(), BehaviorState::Searching);
        assert!(h.network.sent.is_empty());
    }

    #[test]
    fn test_chasing_frame_ends_chase_on_target_loss() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        begin_chase(&mut giant);
        h.frame(&mut giant);

        h.world.blocked = true;
        h.frame(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
        assert_eq!(h.network.sent, vec![ChaseNotification::EndChase]);
    }

    #[test]
    fn test_non_authority_follows_notifications_only() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, false, CLIENT);

        h.frames(&mut giant, 3);
        assert_eq!(giant.state(), BehaviorState::Searching);

        begin_chase(&mut giant);
        h.world.blocked = true;
        h.frames(&mut giant, 3);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert!(h.network.sent.is_empty());
    }

    #[test]
    fn test_notifications_are_idempotent() {
        let mut giant = spawn(AiVariant::Coilhead);
        let notifications = [
            ChaseNotification::BeginChase { target: P0 },
            ChaseNotification::SwitchState {
                state: BehaviorState::Chasing,
            },
            ChaseNotification::EndChase,
            ChaseNotification::ResetFlags,
        ];
        for notification in &notifications {
            giant.apply_notification(notification);
            let once = (giant.state(), giant.target(), giant.flags());
            giant.apply_notification(notification);
            assert_eq!((giant.state(), giant.target(), giant.flags()), once);
        }
    }

    // ---- Reset ----

    #[test]
    fn test_reset_is_idempotent() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::LookingTooLongKeepsAgro);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frames(&mut giant, 30);
        assert!(giant.timers().aggro > 0.0);

        h.reset(&mut giant);
        let once = (giant.state(), giant.timers(), giant.flags().is_aggro);
        assert_eq!(once, (BehaviorState::Searching, TimerValues::default(), false));

        h.reset(&mut giant);
        assert_eq!((giant.state(), giant.timers(), giant.flags().is_aggro), once);
        assert_eq!(
            &h.network.sent[..3],
            &[
                ChaseNotification::SwitchState {
                    state: BehaviorState::Searching
                },
                ChaseNotification::EndChase,
                ChaseNotification::ResetFlags,
            ]
        );
    }

    #[test]
    fn test_reset_clears_preserved_aggro() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::OnceSeenAgroAfterTimer);
        begin_chase(&mut giant);
        h.world.watch(true);
        h.frame(&mut giant);
        assert!(giant.flags().is_aggro);

        h.reset(&mut giant);
        assert!(!giant.flags().is_aggro);
        assert_eq!(giant.timers().aggro, 0.0);
    }

    #[test]
    fn test_reset_ignored_without_authority() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, false, CLIENT);
        begin_chase(&mut giant);
        h.reset(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Chasing);
        assert!(h.network.sent.is_empty());
    }

    // ---- Collision ----

    #[test]
    fn test_collision_cooldown() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        h.frame_with(&mut giant, 1.0, -1.0);

        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Hit {
                player: P0,
                damage: LETHAL_DAMAGE
            }
        );
        assert_eq!(giant.agent().speed, 0.0);

        h.frame_with(&mut giant, 0.3, -1.0);
        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Ignored(IgnoreReason::Cooldown)
        );

        h.frame_with(&mut giant, 0.5, -1.0);
        assert!(matches!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Hit { .. }
        ));
        let hits = h
            .events
            .iter()
            .filter(|e| matches!(e, PresentationEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_too_big_spares_safe_room() {
        let mut world = FakeWorld::with_player_at(10.0);
        world.player_mut(P0).in_safe_room = true;
        let mut h = Harness::new(world);

        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.25, false, HOST);
        assert!(giant.is_too_big());
        begin_chase(&mut giant);
        h.frame_with(&mut giant, 1.0, -1.0);
        let speed = giant.agent().speed;
        assert!(speed > 0.0);

        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Ignored(IgnoreReason::SafeRoom)
        );
        assert_eq!(giant.agent().speed, speed);
        assert!(!h
            .events
            .iter()
            .any(|e| matches!(e, PresentationEvent::PlayerHit { .. })));

        let mut small = spawn_with(AiVariant::Coilhead.into(), 1.1, false, HOST);
        assert!(!small.is_too_big());
        h.frame_with(&mut small, 1.0, -1.0);
        assert!(matches!(
            h.collide(&mut small, P0),
            CollisionOutcome::Hit { .. }
        ));
    }

    #[test]
    fn test_collision_ignored_for_stunned_dead_or_ineligible() {
        let mut world = FakeWorld::with_player_at(10.0);
        world.players.push(PlayerSnapshot {
            is_inside_factory: false,
            ..PlayerSnapshot::standing(PlayerId(1), Vec3::new(5.0, 0.0, 0.0))
        });
        let mut h = Harness::new(world);
        let mut giant = spawn(AiVariant::Coilhead);

        h.frame_with(&mut giant, 1.0, 0.5);
        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Ignored(IgnoreReason::Stunned)
        );

        h.frame_with(&mut giant, 1.0, -1.0);
        assert_eq!(
            h.collide(&mut giant, PlayerId(1)),
            CollisionOutcome::Ignored(IgnoreReason::IneligiblePlayer)
        );
        assert_eq!(
            h.collide(&mut giant, PlayerId(9)),
            CollisionOutcome::Ignored(IgnoreReason::IneligiblePlayer)
        );

        giant.kill();
        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Ignored(IgnoreReason::Dead)
        );
    }

    // ---- Lifecycle ----

    #[test]
    fn test_daytime_leave_disables_entry_points() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        assert!(!giant.collider_is_trigger());

        giant.daytime_leave();
        assert!(giant.collider_is_trigger());
        h.frames(&mut giant, 5);
        h.interval(&mut giant);
        assert_eq!(giant.state(), BehaviorState::Searching);
        assert_eq!(h.search.starts, 0);
        assert_eq!(
            h.collide(&mut giant, P0),
            CollisionOutcome::Ignored(IgnoreReason::Leaving)
        );
    }

    #[test]
    fn test_collider_is_trigger_while_moving() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut giant = spawn(AiVariant::Coilhead);
        h.frames(&mut giant, 10);
        h.frame(&mut giant);
        assert!(giant.replicated().velocity() > TRIGGER_SPEED_THRESHOLD);
        assert!(giant.collider_is_trigger());
    }

    #[test]
    fn test_replicated_values_reach_readers() {
        let mut h = Harness::new(FakeWorld::with_player_at(10.0));
        let mut owner = spawn(AiVariant::LookingTooLongKeepsAgro);
        let mut reader = spawn_with(AiVariant::LookingTooLongKeepsAgro.into(), 1.0, false, CLIENT);
        begin_chase(&mut owner);
        begin_chase(&mut reader);
        h.world.watch(true);
        h.frames(&mut owner, 10);

        assert!(reader.apply_replicated(&owner.replicated().snapshot()));
        assert_eq!(reader.timers(), owner.timers());
        // The owner never takes remote values.
        assert!(!owner.apply_replicated(&reader.replicated().snapshot()));
    }

    #[test]
    fn test_ownership_transfer_moves_authority() {
        let mut giant = spawn_with(AiVariant::Coilhead.into(), 1.0, false, CLIENT);
        assert!(!giant.is_authority());
        giant.set_owner(CLIENT);
        assert!(giant.is_authority());
    }
}
