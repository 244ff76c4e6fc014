//! Per-tick aim integration: recoil kicks while firing, eased recovery toward
//! the pre-burst rotation after release.

use crate::host::{AimController, LookInput};
use crate::timeline::{RecoilTimeline, TimelinePhase, TimelineTick};
use engine_core::Rotator;
use serde::{Deserialize, Serialize};

/// Rate constant for the recovery ease.
pub const DEFAULT_RECOVERY_SPEED: f32 = 2.0;

/// How a forward recoil sample becomes controller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleMode {
    /// Add the curve's current value every tick. Total kick scales with frame rate.
    #[default]
    CurveValue,
    /// Add only the change in curve value since the previous tick.
    Displacement,
}

/// Timeline plus the aim baseline it recovers toward.
#[derive(Debug, Clone)]
pub struct Recoil {
    timeline: RecoilTimeline,
    baseline: Option<Rotator>,
}

impl Recoil {
    pub fn new(timeline: RecoilTimeline) -> Self {
        Self {
            timeline,
            baseline: None,
        }
    }

    pub fn timeline(&self) -> &RecoilTimeline {
        &self.timeline
    }

    pub fn phase(&self) -> TimelinePhase {
        self.timeline.phase()
    }

    /// Rotation recovery will return to, while a burst is in play.
    pub fn baseline(&self) -> Option<Rotator> {
        self.baseline
    }

    /// Start a burst: remember where the player was aiming and kick from t=0.
    pub fn begin(&mut self, baseline: Rotator) {
        self.baseline = Some(baseline);
        self.timeline.play_from_start();
    }

    /// Restart the kick without moving the baseline.
    pub fn retrigger(&mut self) {
        self.timeline.play_from_start();
    }

    /// Trigger released: play the timeline back. Returns false if there was nothing to reverse.
    pub fn release(&mut self) -> bool {
        self.timeline.reverse_from_end()
    }
}

/// What the integrator did on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimStep {
    Idle,
    /// Forward recoil added to the controller input.
    Kick { yaw: f32, pitch: f32 },
    /// Rotation eased toward the baseline; reversal continues.
    Recovering { rotation: Rotator },
    /// Reversal reached t=0 this tick.
    Recovered { rotation: Rotator },
    /// Player steered during reversal; recovery abandoned.
    Interrupted,
}

/// Applies recoil to the controller once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimIntegrator {
    pub recovery_speed: f32,
    pub sample_mode: SampleMode,
}

impl Default for AimIntegrator {
    fn default() -> Self {
        Self {
            recovery_speed: DEFAULT_RECOVERY_SPEED,
            sample_mode: SampleMode::default(),
        }
    }
}

impl AimIntegrator {
    pub fn new(recovery_speed: f32, sample_mode: SampleMode) -> Self {
        Self {
            recovery_speed,
            sample_mode,
        }
    }

    /// Advance recoil by `dt` and write its effect to `controller`.
    ///
    /// Player input wins during reversal: if `look` is steering, the timeline
    /// stops and no automated rotation is written this tick.
    pub fn integrate(
        &self,
        recoil: &mut Recoil,
        dt: f32,
        look: LookInput,
        controller: &mut dyn AimController,
    ) -> AimStep {
        match recoil.timeline.phase() {
            TimelinePhase::Idle => AimStep::Idle,
            TimelinePhase::PlayingForward => match recoil.timeline.tick(dt, look) {
                TimelineTick::Sampled(sample) | TimelineTick::Finished(sample) => {
                    let (yaw, pitch) = match self.sample_mode {
                        SampleMode::CurveValue => (sample.yaw, sample.pitch),
                        SampleMode::Displacement => (sample.yaw_delta, sample.pitch_delta),
                    };
                    controller.add_yaw_input(yaw);
                    controller.add_pitch_input(pitch);
                    AimStep::Kick { yaw, pitch }
                }
                TimelineTick::Inactive | TimelineTick::Interrupted => AimStep::Idle,
            },
            TimelinePhase::Reversing => {
                if look.is_steering() {
                    recoil.timeline.stop();
                    recoil.baseline = None;
                    log::debug!("recoil recovery abandoned for manual aim");
                    return AimStep::Interrupted;
                }

                // Reverse samples are not applied; only the eased blend moves the aim.
                let tick = recoil.timeline.tick(dt, look);
                let Some(target) = recoil.baseline else {
                    return AimStep::Idle;
                };

                let rotation = controller
                    .control_rotation()
                    .interp_to(target, dt, self.recovery_speed);
                controller.set_control_rotation(rotation);

                if matches!(tick, TimelineTick::Finished(_)) {
                    recoil.baseline = None;
                    AimStep::Recovered { rotation }
                } else {
                    AimStep::Recovering { rotation }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::RecoilCurve;
    use engine_core::Vec3;

    #[derive(Default)]
    struct Pawn {
        rotation: Rotator,
        writes: usize,
    }

    impl AimController for Pawn {
        fn control_rotation(&self) -> Rotator {
            self.rotation
        }

        fn set_control_rotation(&mut self, rotation: Rotator) {
            self.rotation = rotation;
            self.writes += 1;
        }

        fn add_yaw_input(&mut self, degrees: f32) {
            self.rotation.yaw += degrees;
        }

        fn add_pitch_input(&mut self, degrees: f32) {
            self.rotation.pitch += degrees;
        }

        fn view_location(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    fn recoil() -> Recoil {
        let yaw = RecoilCurve::from_points(&[(0.0, 0.0), (0.3, 0.3)]).unwrap();
        let pitch = RecoilCurve::from_points(&[(0.0, 0.0), (0.3, 0.6)]).unwrap();
        Recoil::new(RecoilTimeline::new(yaw, pitch).unwrap())
    }

    #[test]
    fn idle_does_nothing() {
        let mut pawn = Pawn::default();
        let step =
            AimIntegrator::default().integrate(&mut recoil(), 0.1, LookInput::ZERO, &mut pawn);
        assert_eq!(step, AimStep::Idle);
        assert_eq!(pawn.rotation, Rotator::ZERO);
    }

    #[test]
    fn forward_adds_curve_value_each_tick() {
        let mut pawn = Pawn::default();
        let mut recoil = recoil();
        recoil.begin(pawn.rotation);

        let aim = AimIntegrator::default();
        aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        // Values at t=0.1 and t=0.2 summed.
        assert!((pawn.rotation.pitch - 0.6).abs() < 1e-4);
        assert!((pawn.rotation.yaw - 0.3).abs() < 1e-4);
    }

    #[test]
    fn displacement_mode_totals_the_curve_span() {
        let mut pawn = Pawn::default();
        let mut recoil = recoil();
        recoil.begin(pawn.rotation);

        let aim = AimIntegrator::new(DEFAULT_RECOVERY_SPEED, SampleMode::Displacement);
        for _ in 0..30 {
            aim.integrate(&mut recoil, 1.0 / 60.0, LookInput::ZERO, &mut pawn);
        }
        assert_eq!(recoil.phase(), TimelinePhase::Idle);
        assert!((pawn.rotation.pitch - 0.6).abs() < 1e-4);
    }

    #[test]
    fn reversal_eases_toward_baseline() {
        let mut pawn = Pawn::default();
        let mut recoil = recoil();
        let aim = AimIntegrator::default();

        recoil.begin(pawn.rotation);
        aim.integrate(&mut recoil, 0.2, LookInput::ZERO, &mut pawn);
        let kicked = pawn.rotation.pitch;
        assert!(kicked > 0.0);

        assert!(recoil.release());
        let step = aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        let AimStep::Recovering { rotation } = step else {
            panic!("expected recovery, got {step:?}");
        };
        // 20% of the way home at speed 2 and dt 0.1.
        assert!((rotation.pitch - kicked * 0.8).abs() < 1e-4);
        assert_eq!(pawn.writes, 1);

        let step = aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        assert!(matches!(step, AimStep::Recovered { .. }));
        assert_eq!(recoil.phase(), TimelinePhase::Idle);
        assert_eq!(recoil.baseline(), None);
    }

    #[test]
    fn steering_during_reversal_skips_the_write() {
        let mut pawn = Pawn::default();
        let mut recoil = recoil();
        let aim = AimIntegrator::default();

        recoil.begin(pawn.rotation);
        aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        recoil.release();

        let before = pawn.rotation;
        let step = aim.integrate(&mut recoil, 0.1, LookInput::new(0.0, -0.2), &mut pawn);
        assert_eq!(step, AimStep::Interrupted);
        assert_eq!(recoil.phase(), TimelinePhase::Idle);
        assert_eq!(pawn.rotation, before);
        assert_eq!(pawn.writes, 0);

        let step = aim.integrate(&mut recoil, 0.1, LookInput::ZERO, &mut pawn);
        assert_eq!(step, AimStep::Idle);
    }

    #[test]
    fn immediate_release_recovers_through_reversal() {
        let mut pawn = Pawn::default();
        let mut recoil = recoil();
        let aim = AimIntegrator::default();

        recoil.begin(pawn.rotation);
        assert!(recoil.release());
        assert_eq!(recoil.phase(), TimelinePhase::Reversing);

        let step = aim.integrate(&mut recoil, 1.0 / 60.0, LookInput::ZERO, &mut pawn);
        assert!(matches!(step, AimStep::Recovered { .. }));
        assert_eq!(recoil.phase(), TimelinePhase::Idle);
    }
}
