//! Two-axis recoil timeline: plays the yaw/pitch curves forward while firing
//! and back toward the start when the trigger is released.

use crate::curve::RecoilCurve;
use crate::error::ConfigError;
use crate::host::LookInput;

/// Elapsed values this close to an endpoint snap onto it.
const TIME_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelinePhase {
    #[default]
    Idle,
    PlayingForward,
    Reversing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Reverse,
}

/// Curve values produced by one timeline step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoilSample {
    /// Yaw curve value at the new elapsed time.
    pub yaw: f32,
    /// Pitch curve value at the new elapsed time.
    pub pitch: f32,
    /// Change in the yaw value over this step.
    pub yaw_delta: f32,
    /// Change in the pitch value over this step.
    pub pitch_delta: f32,
    pub direction: PlaybackDirection,
}

/// What a call to [`RecoilTimeline::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineTick {
    /// Idle; nothing advanced.
    Inactive,
    /// Advanced and still playing.
    Sampled(RecoilSample),
    /// Advanced onto an endpoint and went idle.
    Finished(RecoilSample),
    /// Reversal abandoned because the player is steering.
    Interrupted,
}

/// Recoil playback state for one character.
#[derive(Debug, Clone)]
pub struct RecoilTimeline {
    yaw: RecoilCurve,
    pitch: RecoilCurve,
    duration: f32,
    phase: TimelinePhase,
    direction: PlaybackDirection,
    elapsed: f32,
}

impl RecoilTimeline {
    /// Build a timeline whose length is the longer of the two curves.
    pub fn new(yaw: RecoilCurve, pitch: RecoilCurve) -> Result<Self, ConfigError> {
        let duration = yaw.duration().max(pitch.duration());
        if duration <= 0.0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(Self {
            yaw,
            pitch,
            duration,
            phase: TimelinePhase::Idle,
            direction: PlaybackDirection::Forward,
            elapsed: 0.0,
        })
    }

    pub fn phase(&self) -> TimelinePhase {
        self.phase
    }

    pub fn direction(&self) -> PlaybackDirection {
        self.direction
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.phase == TimelinePhase::PlayingForward
    }

    pub fn is_reversing(&self) -> bool {
        self.phase == TimelinePhase::Reversing
    }

    /// Restart forward playback from t=0, whatever the current phase.
    pub fn play_from_start(&mut self) {
        self.elapsed = 0.0;
        self.direction = PlaybackDirection::Forward;
        self.phase = TimelinePhase::PlayingForward;
    }

    /// Start playing backward from the current position.
    ///
    /// Valid while playing forward, or while idle after a forward pass ran to
    /// its natural end. Returns false (no change) otherwise.
    pub fn reverse_from_end(&mut self) -> bool {
        let reversible = match self.phase {
            TimelinePhase::PlayingForward => true,
            TimelinePhase::Idle => {
                self.direction == PlaybackDirection::Forward && self.elapsed > 0.0
            }
            TimelinePhase::Reversing => false,
        };
        if reversible {
            self.direction = PlaybackDirection::Reverse;
            self.phase = TimelinePhase::Reversing;
        }
        reversible
    }

    /// Halt playback where it is.
    pub fn stop(&mut self) {
        self.phase = TimelinePhase::Idle;
    }

    /// Advance by `dt` seconds.
    ///
    /// While reversing, any nonzero `look` input abandons the reversal before
    /// anything is sampled.
    pub fn tick(&mut self, dt: f32, look: LookInput) -> TimelineTick {
        let dt = dt.max(0.0);
        let before = self.elapsed;

        match self.phase {
            TimelinePhase::Idle => TimelineTick::Inactive,
            TimelinePhase::PlayingForward => {
                self.elapsed = self.snap((self.elapsed + dt).min(self.duration));
                let sample = self.sample_step(before);
                if self.elapsed >= self.duration {
                    self.phase = TimelinePhase::Idle;
                    TimelineTick::Finished(sample)
                } else {
                    TimelineTick::Sampled(sample)
                }
            }
            TimelinePhase::Reversing => {
                if look.is_steering() {
                    self.stop();
                    return TimelineTick::Interrupted;
                }
                self.elapsed = self.snap((self.elapsed - dt).max(0.0));
                let sample = self.sample_step(before);
                if self.elapsed <= 0.0 {
                    self.phase = TimelinePhase::Idle;
                    TimelineTick::Finished(sample)
                } else {
                    TimelineTick::Sampled(sample)
                }
            }
        }
    }

    /// Curve values at `time` as (yaw, pitch).
    pub fn sample_at(&self, time: f32) -> (f32, f32) {
        (self.yaw.sample(time), self.pitch.sample(time))
    }

    fn sample_step(&self, before: f32) -> RecoilSample {
        let (yaw_before, pitch_before) = self.sample_at(before);
        let (yaw, pitch) = self.sample_at(self.elapsed);
        RecoilSample {
            yaw,
            pitch,
            yaw_delta: yaw - yaw_before,
            pitch_delta: pitch - pitch_before,
            direction: self.direction,
        }
    }

    fn snap(&self, time: f32) -> f32 {
        if time <= TIME_EPSILON {
            0.0
        } else if self.duration - time <= TIME_EPSILON {
            self.duration
        } else {
            time
        }
    }
}
