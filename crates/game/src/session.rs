//! Fixed-step headless session: script in, weapon rig ticked, shots resolved on the range.

use anyhow::{Context, Result};
use engine_core::{Rotator, Vec3};
use input::InputState;
use weapons::{
    AimController, AimStep, FeedbackSink, Host, LookInput, ShotReport, TimelinePhase, WeaponRig,
};

use crate::config::GameConfig;
use crate::player::PlayerView;
use crate::range::{FiringRange, Impact};
use crate::script::ScriptPlayer;

/// Collects weapon notifications until the session drains them.
#[derive(Debug, Default)]
pub struct ShotLog {
    shots: Vec<ShotReport>,
    sounds: u32,
    animations: u32,
}

impl ShotLog {
    pub fn drain(&mut self) -> std::vec::Drain<'_, ShotReport> {
        self.shots.drain(..)
    }
}

impl FeedbackSink for ShotLog {
    fn play_sound(&mut self, cue: &str, location: Vec3) {
        log::trace!("sound {} at {:?}", cue, location);
        self.sounds += 1;
    }

    fn play_animation(&mut self, cue: &str) {
        log::trace!("animation {}", cue);
        self.animations += 1;
    }

    fn shot_fired(&mut self, shot: &ShotReport) {
        self.shots.push(*shot);
    }
}

/// End-of-run numbers.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub ticks: u64,
    pub shots: u64,
    pub target_hits: u32,
    pub tally: Vec<(String, u32)>,
    pub magazine: u32,
    pub reserve: u32,
    pub sounds: u32,
    pub animations: u32,
    pub recoveries: u32,
    pub interruptions: u32,
    pub recoil_phase: Option<TimelinePhase>,
    pub final_rotation: Rotator,
    /// Degrees between the final view and the most recent pre-fire baseline.
    pub aim_error: Option<f32>,
}

pub struct Session {
    dt: f32,
    duration: f32,
    sensitivity: f32,
    rig: WeaponRig,
    view: PlayerView,
    range: FiringRange,
    input: InputState,
    script: ScriptPlayer,
    feedback: ShotLog,
    ticks: u64,
    phase: Option<TimelinePhase>,
    last_baseline: Option<Rotator>,
    recoveries: u32,
    interruptions: u32,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let rig = WeaponRig::new(&config.weapon).context("invalid weapon config")?;
        let range_config = &config.range;
        let view = PlayerView::new(
            range_config.shooter_position,
            range_config.eye_height,
            Rotator::from_pitch_yaw(range_config.start_pitch, range_config.start_yaw),
        );
        let phase = rig.recoil_phase();
        Ok(Self {
            dt: config.tick_seconds(),
            duration: config.script.duration.max(0.0),
            sensitivity: config.sensitivity,
            rig,
            view,
            range: FiringRange::new(range_config),
            input: InputState::new(),
            script: ScriptPlayer::new(&config.script),
            feedback: ShotLog::default(),
            ticks: 0,
            phase,
            last_baseline: None,
            recoveries: 0,
            interruptions: 0,
        })
    }

    pub fn now(&self) -> f32 {
        self.ticks as f32 * self.dt
    }

    /// Run until the scripted duration has elapsed.
    pub fn run(&mut self) -> SessionSummary {
        // Slack keeps float drift from adding a tick.
        let total = (self.duration / self.dt - 1e-3).ceil().max(0.0) as u64;
        log::info!(
            "Running {:.2}s at {:.0} Hz ({} ticks)",
            self.duration,
            1.0 / self.dt,
            total
        );
        while self.ticks < total {
            self.step();
        }
        if !self.script.is_finished() {
            log::warn!("Script has input past {:.2}s that never ran", self.duration);
        }
        self.summary()
    }

    /// One fixed tick: deliver input, drive the rig, resolve shots.
    pub fn step(&mut self) {
        let now = self.now();
        self.script.feed(now, self.dt, &mut self.input);

        if self.input.is_reload_pressed() {
            if self.rig.on_reload_pressed(&mut self.feedback) {
                log::info!("[{:.2}s] reload started ({})", now, self.rig.ammo().ammo_display());
            } else {
                log::debug!("[{:.2}s] reload ignored", now);
            }
        }
        if self.input.is_fire_pressed() {
            let mut host = Host::new(&mut self.view, &self.range.physics, &mut self.feedback);
            if !self.rig.on_fire_pressed(&mut host) {
                log::info!("[{:.2}s] dry fire", now);
            }
        }
        if self.input.is_fire_released() {
            self.rig.on_fire_released();
        }

        // Manual look reaches the controller before the weapon sees it.
        let look = self.input.look_delta() * self.sensitivity;
        if look.x != 0.0 {
            self.view.add_yaw_input(look.x);
        }
        if look.y != 0.0 {
            self.view.add_pitch_input(look.y);
        }

        let step = {
            let mut host = Host::new(&mut self.view, &self.range.physics, &mut self.feedback);
            self.rig.on_tick(self.dt, LookInput::new(look.x, look.y), &mut host)
        };
        match step {
            AimStep::Recovered { rotation } => {
                self.recoveries += 1;
                log::debug!("[{:.2}s] recoil recovered at {:?}", now, rotation);
            }
            AimStep::Interrupted => {
                self.interruptions += 1;
                log::info!("[{:.2}s] recovery interrupted by look input", now);
            }
            _ => {}
        }

        if let Some(baseline) = self.rig.recoil().and_then(|recoil| recoil.baseline()) {
            self.last_baseline = Some(baseline);
        }
        let phase = self.rig.recoil_phase();
        if phase != self.phase {
            log::debug!("[{:.2}s] recoil {:?} -> {:?}", now, self.phase, phase);
            self.phase = phase;
        }

        for shot in self.feedback.drain() {
            match self.range.record(&shot) {
                Impact::Target { name, distance } => log::info!(
                    "[{:.2}s] shot {} hit {} at {:.1}m ({} left)",
                    now,
                    shot.sequence,
                    name,
                    distance,
                    shot.magazine_after
                ),
                Impact::Environment { point, distance } => log::info!(
                    "[{:.2}s] shot {} struck the range at {:.1}m {:?} ({} left)",
                    now,
                    shot.sequence,
                    distance,
                    point,
                    shot.magazine_after
                ),
                Impact::Miss => log::info!(
                    "[{:.2}s] shot {} missed ({} left)",
                    now,
                    shot.sequence,
                    shot.magazine_after
                ),
            }
        }

        self.input.end_frame();
        self.ticks += 1;
    }

    pub fn summary(&self) -> SessionSummary {
        let final_rotation = self.view.rotation();
        SessionSummary {
            ticks: self.ticks,
            shots: self.rig.shots_fired(),
            target_hits: self.range.total_hits(),
            tally: self.range.tally(),
            magazine: self.rig.magazine_ammo(),
            reserve: self.rig.reserve_ammo(),
            sounds: self.feedback.sounds,
            animations: self.feedback.animations,
            recoveries: self.recoveries,
            interruptions: self.interruptions,
            recoil_phase: self.rig.recoil_phase(),
            final_rotation,
            aim_error: self
                .last_baseline
                .map(|baseline| angular_error(final_rotation, baseline)),
        }
    }
}

/// Pitch/yaw distance in degrees, taking the short way round.
fn angular_error(a: Rotator, b: Rotator) -> f32 {
    let delta = (a - b).normalized();
    (delta.pitch * delta.pitch + delta.yaw * delta.yaw).sqrt()
}
