//! Traps domain: tests for the transport core and crush detection.

use std::cell::Cell;
use std::collections::HashMap;

use bevy::math::Vec2;

use super::{
    Activation, ActivationController, ActorState, CrushDetector, CrushRegion, CrushSettings,
    OverlapQuery, Phase, PositionIo, StaleHandle, TimedTransport, TrackedObject, TransportError,
    TransportSettings, TriggerGate, closing_wall_targets, position_at,
};

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

#[derive(Default)]
struct FakeScene {
    positions: HashMap<u32, Vec2>,
}

impl FakeScene {
    fn with(objects: &[(u32, Vec2)]) -> Self {
        Self {
            positions: objects.iter().copied().collect(),
        }
    }

    fn at(&self, handle: u32) -> Vec2 {
        self.positions[&handle]
    }
}

impl PositionIo<u32> for FakeScene {
    fn position(&self, handle: u32) -> Option<Vec2> {
        self.positions.get(&handle).copied()
    }

    fn set_position(&mut self, handle: u32, position: Vec2) -> Result<(), StaleHandle> {
        match self.positions.get_mut(&handle) {
            Some(slot) => {
                *slot = position;
                Ok(())
            }
            None => Err(StaleHandle),
        }
    }
}

#[derive(Default)]
struct FakeActors {
    overlapping: Vec<u32>,
    invulnerable: Vec<u32>,
    damaged: Vec<u32>,
    killed: Vec<u32>,
    queries: Cell<usize>,
}

impl OverlapQuery<u32> for FakeActors {
    fn query_overlap(&self, _region: &CrushRegion) -> Vec<u32> {
        self.queries.set(self.queries.get() + 1);
        self.overlapping.clone()
    }
}

impl ActorState<u32> for FakeActors {
    fn is_invulnerable(&self, actor: u32) -> bool {
        self.invulnerable.contains(&actor)
    }

    fn apply_damage(&mut self, actor: u32) {
        self.damaged.push(actor);
    }

    fn kill(&mut self, actor: u32) {
        self.killed.push(actor);
    }
}

const A: u32 = 1;
const B: u32 = 2;
const LEFT: u32 = 10;
const RIGHT: u32 = 11;
const PLAYER: u32 = 99;

fn two_object_scene() -> (FakeScene, Vec<TrackedObject<u32>>) {
    let scene = FakeScene::with(&[(A, Vec2::ZERO), (B, Vec2::ZERO)]);
    let objects = vec![
        TrackedObject::new(A, Vec2::ZERO, Vec2::new(10.0, 0.0)),
        TrackedObject::new(B, Vec2::ZERO, Vec2::new(4.0, 0.0)),
    ];
    (scene, objects)
}

fn crushing_walls(settings: CrushSettings, speed: f32) -> (FakeScene, ActivationController<u32>) {
    let left = Vec2::ZERO;
    let right = Vec2::new(10.0, 0.0);
    let (left_target, right_target) = closing_wall_targets(left, right, settings.threshold);
    let scene = FakeScene::with(&[(LEFT, left), (RIGHT, right), (PLAYER, Vec2::new(5.0, 0.0))]);
    let controller = ActivationController::new(
        vec![
            TrackedObject::new(LEFT, left, left_target),
            TrackedObject::new(RIGHT, right, right_target),
        ],
        TransportSettings::new(speed, 0.0, false),
        false,
    )
    .with_crush_detection(CrushDetector::new(LEFT, RIGHT, settings));
    (scene, controller)
}

// -----------------------------------------------------------------------------
// Interpolator
// -----------------------------------------------------------------------------

#[test]
fn test_position_at_halfway() {
    let p = position_at(Vec2::ZERO, Vec2::new(10.0, -4.0), 2.5, 5.0);
    assert_eq!(p, Vec2::new(5.0, -2.0));
}

#[test]
fn test_position_at_clamps_progress() {
    let start = Vec2::new(1.0, 1.0);
    let end = Vec2::new(3.0, 1.0);
    assert_eq!(position_at(start, end, 10.0, 2.0), end);
    assert_eq!(position_at(start, end, -1.0, 2.0), start);
}

#[test]
fn test_position_at_non_positive_duration_returns_end() {
    let end = Vec2::new(7.0, 3.0);
    assert_eq!(position_at(Vec2::ZERO, end, 0.0, 0.0), end);
    assert_eq!(position_at(Vec2::ZERO, end, 0.5, -1.0), end);
    assert_eq!(position_at(Vec2::ZERO, end, 0.5, f32::NAN), end);
}

// -----------------------------------------------------------------------------
// TriggerGate
// -----------------------------------------------------------------------------

#[test]
fn test_one_shot_gate_admits_once() {
    let mut gate = TriggerGate::one_shot();
    assert!(gate.try_admit());
    assert!(!gate.try_admit());

    gate.on_run_complete(true);
    assert!(!gate.run_in_progress());
    assert!(gate.has_fired());
    assert!(!gate.try_admit());
}

#[test]
fn test_gate_rejection_leaves_state_untouched() {
    let mut gate = TriggerGate::repeatable();
    assert!(gate.try_admit());
    let before = gate;
    assert!(!gate.try_admit());
    assert_eq!(gate, before);
}

#[test]
fn test_repeatable_gate_reopens_when_run_ends() {
    let mut gate = TriggerGate::repeatable();
    assert!(gate.try_admit());
    assert!(!gate.can_admit());

    // Ending at the target still frees a repeatable gate.
    gate.on_run_complete(false);
    assert!(gate.has_fired());
    assert!(gate.can_admit());

    assert!(gate.try_admit());
    gate.on_run_complete(true);
    assert!(!gate.has_fired());
    assert!(gate.try_admit());
}

#[test]
fn test_one_shot_gate_stays_closed_after_run_without_return() {
    let mut gate = TriggerGate::one_shot();
    assert!(gate.try_admit());
    gate.on_run_complete(false);
    assert!(!gate.run_in_progress());
    assert!(!gate.can_admit());

    gate.reset();
    assert!(gate.try_admit());
}

// -----------------------------------------------------------------------------
// TimedTransport
// -----------------------------------------------------------------------------

#[test]
fn test_start_rejects_invalid_settings() {
    let (scene, objects) = two_object_scene();
    let mut transport = TimedTransport::new();

    for settings in [
        TransportSettings::new(0.0, 0.0, false),
        TransportSettings::new(-2.0, 0.0, false),
        TransportSettings::new(f32::NAN, 0.0, false),
        TransportSettings::new(2.0, -1.0, true),
    ] {
        let err = transport.start(&objects, settings, &scene).unwrap_err();
        assert!(matches!(err, TransportError::InvalidConfiguration { .. }));
    }
    assert!(!transport.is_running());
    assert_eq!(transport.runs_started(), 0);
}

#[test]
fn test_start_without_targets() {
    let scene = FakeScene::default();
    let mut transport = TimedTransport::<u32>::new();
    let settings = TransportSettings::new(2.0, 0.0, false);

    assert_eq!(transport.start(&[], settings, &scene), Err(TransportError::NoTargets));

    // Every handle stale counts as nothing to animate.
    let ghosts = [TrackedObject::new(A, Vec2::ZERO, Vec2::X)];
    assert_eq!(transport.start(&ghosts, settings, &scene), Err(TransportError::NoTargets));
}

#[test]
fn test_start_while_running_is_refused() {
    let (scene, objects) = two_object_scene();
    let mut transport = TimedTransport::new();
    let settings = TransportSettings::new(2.0, 0.0, false);

    assert!(transport.start(&objects, settings, &scene).is_ok());
    assert_eq!(
        transport.start(&objects, settings, &scene),
        Err(TransportError::RunInProgress)
    );
}

#[test]
fn test_forward_leg_lands_exactly_on_target() {
    let mut scene = FakeScene::with(&[(A, Vec2::new(0.3, 1.7))]);
    let target = Vec2::new(7.61, -2.9);
    let objects = [TrackedObject::new(A, Vec2::new(0.3, 1.7), target)];
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(3.0, 0.0, false), &scene)
        .unwrap();

    let mut completion = None;
    for _ in 0..1000 {
        completion = transport.advance(1.0 / 60.0, &mut scene);
        if completion.is_some() {
            break;
        }
    }

    let completion = completion.expect("run should complete");
    assert!(!completion.returned);
    assert_eq!(scene.at(A), target);
    assert_eq!(transport.phase(), Phase::Idle);
}

#[test]
fn test_group_arrives_together() {
    let (mut scene, objects) = two_object_scene();
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(2.0, 0.0, false), &scene)
        .unwrap();
    assert_eq!(transport.run().unwrap().total_duration(), 5.0);

    // t = 2.0: B would already be home at its own speed, but it shares the
    // group duration.
    for _ in 0..4 {
        assert!(transport.advance(0.5, &mut scene).is_none());
    }
    assert_eq!(scene.at(A), Vec2::new(4.0, 0.0));
    assert_eq!(scene.at(B), Vec2::new(1.6, 0.0));

    for _ in 0..5 {
        assert!(transport.advance(0.5, &mut scene).is_none());
    }
    assert_ne!(scene.at(B), Vec2::new(4.0, 0.0));

    let completion = transport.advance(0.5, &mut scene);
    assert!(completion.is_some());
    assert_eq!(scene.at(A), Vec2::new(10.0, 0.0));
    assert_eq!(scene.at(B), Vec2::new(4.0, 0.0));
}

#[test]
fn test_full_cycle_scenario() {
    let (mut scene, objects) = two_object_scene();
    let mut controller =
        ActivationController::new(objects, TransportSettings::new(2.0, 1.0, true), true);
    let mut actors = FakeActors::default();

    assert!(matches!(
        controller.on_zone_entered("Player", &scene),
        Activation::Started(_)
    ));
    assert_eq!(controller.transport().run().unwrap().total_duration(), 5.0);

    let mut t = 0.0;
    let mut step = |controller: &mut ActivationController<u32>, scene: &mut FakeScene| {
        t += 0.5;
        (t, controller.advance(0.5, scene, &mut actors))
    };

    // Forward leg: t = 0.5 .. 5.0
    for _ in 0..5 {
        step(&mut controller, &mut scene);
    }
    assert_eq!(scene.at(A), Vec2::new(5.0, 0.0));
    assert_eq!(scene.at(B), Vec2::new(2.0, 0.0));

    for _ in 0..5 {
        let (_, out) = step(&mut controller, &mut scene);
        assert!(out.completion.is_none());
    }
    assert_eq!(scene.at(A), Vec2::new(10.0, 0.0));
    assert_eq!(scene.at(B), Vec2::new(4.0, 0.0));
    assert_eq!(controller.phase(), Phase::Holding);

    // Hold: t = 5.5 .. 6.0
    step(&mut controller, &mut scene);
    assert_eq!(controller.phase(), Phase::Holding);
    step(&mut controller, &mut scene);
    assert_eq!(controller.phase(), Phase::Returning);
    assert_eq!(controller.transport().run().unwrap().total_duration(), 5.0);
    assert_eq!(controller.on_zone_entered("Player", &scene), Activation::Rejected);

    // Return leg: t = 6.5 .. 11.0
    for _ in 0..9 {
        let (_, out) = step(&mut controller, &mut scene);
        assert!(out.completion.is_none());
    }
    assert!(!controller.gate().can_admit());

    let (t_end, out) = step(&mut controller, &mut scene);
    assert_eq!(t_end, 11.0);
    assert_eq!(out.completion.map(|c| c.returned), Some(true));
    assert_eq!(scene.at(A), Vec2::ZERO);
    assert_eq!(scene.at(B), Vec2::ZERO);

    assert!(matches!(
        controller.on_zone_entered("Player", &scene),
        Activation::Started(_)
    ));
}

#[test]
fn test_return_without_hold_starts_immediately() {
    let mut scene = FakeScene::with(&[(A, Vec2::ZERO)]);
    let objects = [TrackedObject::displaced(A, Vec2::ZERO, Vec2::new(0.0, 2.0))];
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(2.0, 0.0, true), &scene)
        .unwrap();

    transport.advance(1.0, &mut scene);
    assert_eq!(transport.phase(), Phase::Returning);
    assert_eq!(scene.at(A), Vec2::new(0.0, 2.0));

    let completion = transport.advance(1.0, &mut scene).expect("return completes");
    assert!(completion.returned);
    assert_eq!(scene.at(A), Vec2::ZERO);
}

#[test]
fn test_return_duration_uses_current_positions() {
    let mut scene = FakeScene::with(&[(A, Vec2::ZERO)]);
    let objects = [TrackedObject::new(A, Vec2::ZERO, Vec2::new(8.0, 0.0))];
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(2.0, 1.0, true), &scene)
        .unwrap();

    transport.advance(4.0, &mut scene);
    assert_eq!(transport.phase(), Phase::Holding);

    // Something shoves the object while it waits at the target.
    scene.positions.insert(A, Vec2::new(4.0, 0.0));
    transport.advance(1.0, &mut scene);

    assert_eq!(transport.phase(), Phase::Returning);
    assert_eq!(transport.run().unwrap().total_duration(), 2.0);
}

#[test]
fn test_overshoot_is_not_carried_into_hold() {
    let mut scene = FakeScene::with(&[(A, Vec2::ZERO)]);
    let objects = [TrackedObject::new(A, Vec2::ZERO, Vec2::new(10.0, 0.0))];
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(2.0, 1.0, true), &scene)
        .unwrap();

    // One long frame covers the 5 s leg and would cover the hold too.
    assert!(transport.advance(6.0, &mut scene).is_none());
    assert_eq!(transport.phase(), Phase::Holding);
    assert_eq!(scene.at(A), Vec2::new(10.0, 0.0));
    let run = transport.run().unwrap();
    assert_eq!(run.hold_remaining(), 1.0);
    assert_eq!(run.elapsed(), 5.0);

    assert!(transport.advance(0.5, &mut scene).is_none());
    assert_eq!(transport.phase(), Phase::Holding);
    assert_eq!(transport.run().unwrap().hold_remaining(), 0.5);
}

#[test]
fn test_stale_object_is_dropped_mid_run() {
    let (mut scene, objects) = two_object_scene();
    let mut transport = TimedTransport::new();
    transport
        .start(&objects, TransportSettings::new(2.0, 0.0, false), &scene)
        .unwrap();

    transport.advance(1.0, &mut scene);
    scene.positions.remove(&B);

    let mut completion = None;
    for _ in 0..10 {
        completion = transport.advance(1.0, &mut scene);
        if completion.is_some() {
            break;
        }
    }
    assert!(completion.is_some());
    assert_eq!(scene.at(A), Vec2::new(10.0, 0.0));
    assert!(!scene.positions.contains_key(&B));
}

#[test]
fn test_degenerate_duration_fails_closed() {
    let mut scene = FakeScene::with(&[(A, Vec2::new(3.0, 3.0))]);
    let mut transport = TimedTransport::new();

    // Nowhere to go: zero duration.
    let still = [TrackedObject::new(A, Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0))];
    transport
        .start(&still, TransportSettings::new(1.0, 0.0, false), &scene)
        .unwrap();
    assert!(transport.advance(0.016, &mut scene).is_some());

    // A NaN target must not leave the run spinning forever.
    let broken = [TrackedObject::new(A, Vec2::new(3.0, 3.0), Vec2::new(f32::NAN, 0.0))];
    transport
        .start(&broken, TransportSettings::new(1.0, 0.0, false), &scene)
        .unwrap();
    assert!(transport.advance(0.016, &mut scene).is_some());
    assert!(!transport.is_running());
}

#[test]
fn test_cancel_idles_transport() {
    let (mut scene, objects) = two_object_scene();
    let mut transport = TimedTransport::new();
    let run = transport
        .start(&objects, TransportSettings::new(2.0, 0.0, false), &scene)
        .unwrap();
    transport.advance(0.5, &mut scene);

    assert_eq!(transport.cancel(), Some(run));
    assert_eq!(transport.phase(), Phase::Idle);
    assert!(transport.advance(0.5, &mut scene).is_none());
}

// -----------------------------------------------------------------------------
// ActivationController
// -----------------------------------------------------------------------------

#[test]
fn test_non_player_entry_is_ignored() {
    let (scene, objects) = two_object_scene();
    let mut controller =
        ActivationController::new(objects, TransportSettings::new(2.0, 0.0, false), false);

    assert_eq!(controller.on_zone_entered("Enemy", &scene), Activation::Ignored);
    assert!(!controller.gate().has_fired());
    assert_eq!(controller.transport().runs_started(), 0);
}

#[test]
fn test_one_shot_double_entry_creates_single_run() {
    let (scene, objects) = two_object_scene();
    let mut controller =
        ActivationController::new(objects, TransportSettings::new(2.0, 0.0, false), false);

    assert!(matches!(
        controller.on_zone_entered("Player", &scene),
        Activation::Started(_)
    ));
    assert_eq!(controller.on_zone_entered("Player", &scene), Activation::Rejected);
    assert_eq!(controller.transport().runs_started(), 1);
}

#[test]
fn test_failed_start_releases_gate() {
    let scene = FakeScene::default();
    let mut controller =
        ActivationController::<u32>::new(Vec::new(), TransportSettings::new(2.0, 0.0, false), true);

    assert_eq!(
        controller.on_zone_entered("Player", &scene),
        Activation::Failed(TransportError::NoTargets)
    );
    assert!(!controller.gate().run_in_progress());
}

#[test]
fn test_reset_cancels_run_and_restores_objects() {
    let (mut scene, objects) = two_object_scene();
    let mut controller =
        ActivationController::new(objects, TransportSettings::new(2.0, 0.0, false), false);
    let mut actors = FakeActors::default();

    controller.on_zone_entered("Player", &scene);
    controller.advance(1.0, &mut scene, &mut actors);
    assert_ne!(scene.at(A), Vec2::ZERO);

    controller.reset(&mut scene);
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(!controller.gate().has_fired());
    assert!(!controller.gate().run_in_progress());
    assert_eq!(scene.at(A), Vec2::ZERO);
    assert_eq!(scene.at(B), Vec2::ZERO);

    // The one-shot trap is armed again after a level reset.
    assert!(matches!(
        controller.on_zone_entered("Player", &scene),
        Activation::Started(_)
    ));
}

// -----------------------------------------------------------------------------
// Crush detection
// -----------------------------------------------------------------------------

#[test]
fn test_closing_wall_targets() {
    let (left, right) = closing_wall_targets(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.5);
    assert_eq!(left, Vec2::new(4.75, 0.0));
    assert_eq!(right, Vec2::new(5.25, 0.0));

    // Walls already closer than the final gap stay put.
    let (left, right) = closing_wall_targets(Vec2::ZERO, Vec2::new(0.2, 0.0), 0.5);
    assert_eq!(left, Vec2::ZERO);
    assert_eq!(right, Vec2::new(0.2, 0.0));
}

#[test]
fn test_crush_fires_once_while_walls_close() {
    let (mut scene, mut controller) = crushing_walls(CrushSettings::with_threshold(0.5), 5.0);
    let mut actors = FakeActors {
        overlapping: vec![PLAYER],
        ..Default::default()
    };

    controller.on_zone_entered("Player", &scene);
    let mut crushes = Vec::new();
    for _ in 0..40 {
        crushes.extend(controller.advance(0.05, &mut scene, &mut actors).crushes);
    }

    assert_eq!(crushes.len(), 1);
    assert_eq!(crushes[0].actor, PLAYER);
    assert!(crushes[0].gap <= 0.6);
    assert_eq!(actors.damaged, vec![PLAYER]);
    assert!(actors.killed.is_empty());
    // Pushed out along the perpendicular of the wall axis.
    assert_eq!(scene.at(PLAYER), Vec2::new(5.0, 1.0));
    assert_eq!(scene.at(LEFT), Vec2::new(4.75, 0.0));
    assert_eq!(scene.at(RIGHT), Vec2::new(5.25, 0.0));
}

#[test]
fn test_invulnerable_actor_is_not_crushed() {
    let (mut scene, mut controller) = crushing_walls(CrushSettings::with_threshold(0.5), 5.0);
    let mut actors = FakeActors {
        overlapping: vec![PLAYER],
        invulnerable: vec![PLAYER],
        ..Default::default()
    };

    controller.on_zone_entered("Player", &scene);
    for _ in 0..40 {
        assert!(controller.advance(0.05, &mut scene, &mut actors).crushes.is_empty());
    }
    assert!(actors.damaged.is_empty());
    assert_eq!(scene.at(PLAYER), Vec2::new(5.0, 0.0));
}

#[test]
fn test_crush_once_per_contiguous_overlap() {
    let mut scene = FakeScene::with(&[
        (LEFT, Vec2::new(4.75, 0.0)),
        (RIGHT, Vec2::new(5.25, 0.0)),
        (PLAYER, Vec2::new(5.0, 0.0)),
    ]);
    let mut detector = CrushDetector::new(LEFT, RIGHT, CrushSettings::with_threshold(0.5));
    let mut actors = FakeActors {
        overlapping: vec![PLAYER],
        ..Default::default()
    };

    assert_eq!(detector.sample(&mut scene, &mut actors).len(), 1);
    assert!(detector.sample(&mut scene, &mut actors).is_empty());
    assert!(detector.sample(&mut scene, &mut actors).is_empty());
    assert_eq!(detector.pinned(), &[PLAYER]);

    // The actor slips out, then falls back in: a new interval.
    actors.overlapping.clear();
    assert!(detector.sample(&mut scene, &mut actors).is_empty());
    assert!(detector.pinned().is_empty());

    actors.overlapping.push(PLAYER);
    assert_eq!(detector.sample(&mut scene, &mut actors).len(), 1);
    assert_eq!(actors.damaged.len(), 2);
}

#[test]
fn test_no_crush_while_gap_is_wide() {
    let mut scene = FakeScene::with(&[
        (LEFT, Vec2::ZERO),
        (RIGHT, Vec2::new(3.0, 0.0)),
        (PLAYER, Vec2::new(1.5, 0.0)),
    ]);
    let mut detector = CrushDetector::new(LEFT, RIGHT, CrushSettings::with_threshold(0.5));
    let mut actors = FakeActors {
        overlapping: vec![PLAYER],
        ..Default::default()
    };

    assert!(detector.sample(&mut scene, &mut actors).is_empty());
    // The gap is checked before paying for the overlap query.
    assert_eq!(actors.queries.get(), 0);
}

#[test]
fn test_crush_sampling_rate_is_bounded() {
    let mut scene = FakeScene::with(&[(LEFT, Vec2::new(4.75, 0.0)), (RIGHT, Vec2::new(5.25, 0.0))]);
    let mut detector = CrushDetector::new(LEFT, RIGHT, CrushSettings::with_threshold(0.5));
    let mut actors = FakeActors::default();

    for _ in 0..100 {
        detector.tick(0.01, false, &mut scene, &mut actors);
    }
    let queries = actors.queries.get();
    assert!((9..=11).contains(&queries), "queries = {queries}");
}

#[test]
fn test_crush_region_spans_walls() {
    let detector = CrushDetector::new(LEFT, RIGHT, CrushSettings::with_threshold(0.5));
    let region = detector.region_between(Vec2::new(0.0, 2.0), Vec2::new(4.0, 2.0));

    assert_eq!(region.center, Vec2::new(2.0, 2.0));
    assert_eq!(region.size, Vec2::new(4.2, 2.0));
    assert_eq!(region.angle, 0.0);
}
