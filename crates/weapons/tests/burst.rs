//! Drives a `WeaponRig` through full bursts with stand-in host collaborators.

use engine_core::{Rotator, Vec3};
use std::cell::RefCell;
use weapons::{
    AimController, AimStep, FeedbackSink, HitResult, HitScan, Host, LookInput, ShotReport,
    TimelinePhase, WeaponConfig, WeaponRig,
};

struct Pawn {
    rotation: Rotator,
    eye: Vec3,
}

impl AimController for Pawn {
    fn control_rotation(&self) -> Rotator {
        self.rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.rotation = rotation;
    }

    fn add_yaw_input(&mut self, degrees: f32) {
        self.rotation.yaw += degrees;
    }

    fn add_pitch_input(&mut self, degrees: f32) {
        self.rotation.pitch += degrees;
    }

    fn view_location(&self) -> Vec3 {
        self.eye
    }
}

#[derive(Default)]
struct Range {
    traces: RefCell<Vec<(Vec3, Vec3, f32)>>,
    hit: Option<HitResult>,
}

impl HitScan for Range {
    fn trace_line(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<HitResult> {
        self.traces.borrow_mut().push((origin, direction, max_range));
        self.hit
    }
}

#[derive(Default)]
struct Recorder {
    sounds: Vec<String>,
    animations: Vec<String>,
    shots: Vec<ShotReport>,
}

impl FeedbackSink for Recorder {
    fn play_sound(&mut self, cue: &str, _location: Vec3) {
        self.sounds.push(cue.to_string());
    }

    fn play_animation(&mut self, cue: &str) {
        self.animations.push(cue.to_string());
    }

    fn shot_fired(&mut self, shot: &ShotReport) {
        self.shots.push(*shot);
    }
}

struct Bench {
    rig: WeaponRig,
    pawn: Pawn,
    range: Range,
    feedback: Recorder,
}

impl Bench {
    fn new(config: WeaponConfig) -> Self {
        Self {
            rig: WeaponRig::new(&config).expect("valid config"),
            pawn: Pawn {
                rotation: Rotator::ZERO,
                eye: Vec3::new(0.0, 1.6, 0.0),
            },
            range: Range::default(),
            feedback: Recorder::default(),
        }
    }

    fn with_ammo(magazine: u32, reserve: u32) -> Self {
        Self::new(WeaponConfig {
            magazine_ammo: magazine,
            reserve_ammo: reserve,
            ..WeaponConfig::default()
        })
    }

    fn press(&mut self) -> bool {
        let mut host = Host::new(&mut self.pawn, &self.range, &mut self.feedback);
        self.rig.on_fire_pressed(&mut host)
    }

    fn release(&mut self) {
        self.rig.on_fire_released();
    }

    fn reload(&mut self) -> bool {
        self.rig.on_reload_pressed(&mut self.feedback)
    }

    fn tick(&mut self, dt: f32, look: LookInput) -> AimStep {
        let mut host = Host::new(&mut self.pawn, &self.range, &mut self.feedback);
        self.rig.on_tick(dt, look, &mut host)
    }

    fn run(&mut self, dt: f32, ticks: usize) {
        for _ in 0..ticks {
            self.tick(dt, LookInput::ZERO);
        }
    }
}

#[test]
fn automatic_fire_spends_one_round_per_period() {
    let mut bench = Bench::with_ammo(30, 60);
    assert!(bench.press());
    assert_eq!(bench.rig.magazine_ammo(), 29);
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::PlayingForward));

    bench.run(0.05, 10);
    assert_eq!(bench.rig.magazine_ammo(), 24);
    assert_eq!(bench.rig.shots_fired(), 6);
    assert_eq!(bench.feedback.sounds.len(), 6);
    assert_eq!(bench.feedback.animations.len(), 6);

    bench.release();
    assert!(!bench.rig.is_firing());
    bench.run(0.05, 10);
    assert_eq!(bench.rig.magazine_ammo(), 24, "no shots after release");
    assert_eq!(bench.rig.reserve_ammo(), 60);
}

#[test]
fn fire_five_then_reload_scenario() {
    let mut bench = Bench::with_ammo(30, 60);
    bench.press();
    bench.run(0.1, 4);
    bench.release();
    assert_eq!((bench.rig.magazine_ammo(), bench.rig.reserve_ammo()), (25, 60));

    assert!(bench.reload());
    bench.run(0.25, 5);
    assert_eq!((bench.rig.magazine_ammo(), bench.rig.reserve_ammo()), (30, 55));
}

#[test]
fn dry_fire_does_nothing() {
    let mut bench = Bench::with_ammo(0, 60);
    assert!(!bench.press());
    assert_eq!(bench.rig.magazine_ammo(), 0);
    assert_eq!(bench.rig.reserve_ammo(), 60);
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Idle));
    assert!(bench.feedback.sounds.is_empty());
    assert!(bench.range.traces.borrow().is_empty());

    bench.release();
    assert_eq!(bench.tick(0.1, LookInput::ZERO), AimStep::Idle);
    assert_eq!(bench.pawn.rotation, Rotator::ZERO);
}

#[test]
fn empty_magazine_disarms_automatic_fire() {
    let mut bench = Bench::with_ammo(3, 0);
    bench.press();
    assert!(bench.rig.is_auto_firing());

    bench.run(0.1, 2);
    assert_eq!(bench.rig.magazine_ammo(), 0);
    assert!(bench.rig.is_firing(), "trigger still held");
    assert!(!bench.rig.is_auto_firing());

    bench.run(0.1, 5);
    assert_eq!(bench.rig.shots_fired(), 3);

    bench.release();
    assert!(!bench.rig.is_firing());
}

#[test]
fn missing_fire_animation_ends_burst_after_first_timer_shot() {
    let mut bench = Bench::new(WeaponConfig {
        fire_animation: None,
        ..WeaponConfig::default()
    });
    bench.press();
    assert_eq!(bench.rig.magazine_ammo(), 29);
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::PlayingForward));

    bench.run(0.05, 2);
    assert_eq!(bench.rig.magazine_ammo(), 28);
    assert!(!bench.rig.is_auto_firing());
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Reversing));

    bench.run(0.05, 10);
    assert_eq!(bench.rig.magazine_ammo(), 28);
    assert!(bench.feedback.animations.is_empty());
}

#[test]
fn reload_waits_for_delay_and_ignores_repeat_presses() {
    let mut bench = Bench::with_ammo(10, 5);
    assert!(bench.reload());
    assert!(bench.rig.is_reloading());
    assert!(!bench.reload(), "second press while pending");

    bench.run(0.25, 4);
    assert_eq!(bench.rig.magazine_ammo(), 10);
    assert!(bench.rig.is_reloading());

    bench.run(0.25, 1);
    assert_eq!((bench.rig.magazine_ammo(), bench.rig.reserve_ammo()), (15, 0));
    assert!(!bench.rig.is_reloading());
    assert_eq!(bench.feedback.animations, vec!["rifle_reload_montage".to_string()]);

    // Reserve is dry now.
    assert!(!bench.reload());
    bench.run(0.25, 10);
    assert_eq!((bench.rig.magazine_ammo(), bench.rig.reserve_ammo()), (15, 0));
}

#[test]
fn reload_with_full_magazine_is_ignored() {
    let mut bench = Bench::with_ammo(30, 60);
    assert!(!bench.reload());
    assert!(!bench.rig.is_reloading());
}

#[test]
fn pending_reload_can_be_cancelled() {
    let mut bench = Bench::with_ammo(20, 60);
    assert!(bench.reload());
    bench.run(0.5, 1);
    assert!(bench.rig.cancel_reload());
    assert!(!bench.rig.cancel_reload());

    bench.run(0.5, 4);
    assert_eq!((bench.rig.magazine_ammo(), bench.rig.reserve_ammo()), (20, 60));
}

#[test]
fn firing_during_reload_keeps_it_unless_configured() {
    let mut bench = Bench::with_ammo(20, 60);
    bench.reload();
    bench.press();
    bench.release();
    assert!(bench.rig.is_reloading());
    bench.run(0.25, 5);
    assert_eq!(bench.rig.magazine_ammo(), 30);

    let mut bench = Bench::new(WeaponConfig {
        magazine_ammo: 20,
        reserve_ammo: 60,
        fire_interrupts_reload: true,
        ..WeaponConfig::default()
    });
    bench.reload();
    bench.press();
    bench.release();
    assert!(!bench.rig.is_reloading());
    bench.run(0.25, 5);
    assert_eq!(bench.rig.magazine_ammo(), 19);
}

#[test]
fn shots_trace_along_the_view() {
    let mut bench = Bench::with_ammo(30, 0);
    bench.pawn.rotation = Rotator::from_pitch_yaw(0.0, 90.0);
    bench.range.hit = Some(HitResult {
        point: Vec3::new(25.0, 1.6, 0.0),
        normal: -Vec3::X,
        distance: 25.0,
        collider: None,
    });

    bench.press();
    let traces = bench.range.traces.borrow();
    let (origin, direction, max_range) = traces[0];
    assert_eq!(origin, Vec3::new(0.0, 1.6, 0.0));
    assert!((direction - Vec3::X).length() < 1e-5);
    assert_eq!(max_range, 10_000.0);

    let shot = bench.feedback.shots[0];
    assert_eq!(shot.sequence, 1);
    assert_eq!(shot.magazine_after, 29);
    assert_eq!(shot.hit.map(|h| h.distance), Some(25.0));
}

#[test]
fn recoil_climbs_then_recovers_toward_baseline() {
    let mut bench = Bench::with_ammo(30, 0);
    bench.pawn.rotation = Rotator::from_pitch_yaw(-5.0, 30.0);
    let baseline = bench.pawn.rotation;

    bench.press();
    bench.run(1.0 / 60.0, 18);
    let kicked = bench.pawn.rotation;
    assert!(kicked.pitch > baseline.pitch + 1.0, "aim climbed: {kicked:?}");

    bench.release();
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Reversing));
    let mut recovered = false;
    for _ in 0..120 {
        if let AimStep::Recovered { .. } = bench.tick(1.0 / 60.0, LookInput::ZERO) {
            recovered = true;
            break;
        }
    }
    assert!(recovered);
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Idle));
    assert!(bench.rig.recoil().and_then(|r| r.baseline()).is_none());

    let error_before = (kicked.pitch - baseline.pitch).abs();
    let error_after = (bench.pawn.rotation.pitch - baseline.pitch).abs();
    assert!(error_after < error_before);
}

#[test]
fn steering_interrupts_recovery_within_one_tick() {
    let mut bench = Bench::with_ammo(30, 0);
    bench.press();
    bench.run(1.0 / 60.0, 6);
    bench.release();
    bench.tick(1.0 / 60.0, LookInput::ZERO);

    let before = bench.pawn.rotation;
    let step = bench.tick(1.0 / 60.0, LookInput::new(0.3, 0.0));
    assert_eq!(step, AimStep::Interrupted);
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Idle));
    assert_eq!(bench.pawn.rotation, before);

    assert_eq!(bench.tick(1.0 / 60.0, LookInput::ZERO), AimStep::Idle);
    assert_eq!(bench.pawn.rotation, before);
}

#[test]
fn press_and_immediate_release_reaches_idle_via_reversal() {
    let mut bench = Bench::with_ammo(30, 0);
    bench.press();
    bench.release();
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Reversing));

    let step = bench.tick(1.0 / 60.0, LookInput::ZERO);
    assert!(matches!(step, AimStep::Recovered { .. }));
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::Idle));
}

#[test]
fn missing_curves_disable_recoil_but_not_firing() {
    let mut bench = Bench::new(WeaponConfig {
        pitch_curve: None,
        ..WeaponConfig::default()
    });
    assert!(!bench.rig.recoil_enabled());
    assert!(bench.rig.recoil_disabled().is_some());

    assert!(bench.press());
    bench.run(0.05, 4);
    assert_eq!(bench.rig.magazine_ammo(), 27);
    assert_eq!(bench.pawn.rotation, Rotator::ZERO);
    assert_eq!(bench.rig.recoil_phase(), None);
    bench.release();
}

#[test]
fn per_shot_restart_keeps_the_kick_going() {
    let mut bench = Bench::new(WeaponConfig {
        restart_recoil_per_shot: true,
        ..WeaponConfig::default()
    });
    bench.press();
    bench.run(0.05, 20);
    // Curve is 0.3s long, but each 0.1s shot restarts it.
    assert_eq!(bench.rig.recoil_phase(), Some(TimelinePhase::PlayingForward));
    let elapsed = bench.rig.recoil().map(|r| r.timeline().elapsed()).unwrap();
    assert!(elapsed < 0.1 + 1e-4);
}
