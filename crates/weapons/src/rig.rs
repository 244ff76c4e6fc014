//! The weapon as the host sees it: input events in, one tick per frame.

use crate::aim::{AimIntegrator, AimStep, Recoil};
use crate::ammo::AmmoStore;
use crate::config::{RecoilDisabled, RecoilSetup, WeaponConfig, WeaponSetup};
use crate::error::ConfigError;
use crate::fire::{FireControl, ShotReport};
use crate::host::{FeedbackSink, Host, LookInput};
use crate::timeline::TimelinePhase;

/// A character's weapon-handling subsystem.
#[derive(Debug)]
pub struct WeaponRig {
    fire: FireControl,
    aim: AimIntegrator,
    recoil_disabled: Option<RecoilDisabled>,
}

impl WeaponRig {
    /// Validate `config` and build the rig.
    pub fn new(config: &WeaponConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_setup(config.validate()?))
    }

    pub fn from_setup(setup: WeaponSetup) -> Self {
        let (recoil, recoil_disabled) = match setup.recoil {
            RecoilSetup::Enabled(timeline) => (Some(Recoil::new(timeline)), None),
            RecoilSetup::Disabled(reason) => {
                log::warn!("recoil disabled: {}", reason);
                (None, Some(reason))
            }
        };
        Self {
            fire: FireControl::new(setup.fire, setup.ammo, recoil),
            aim: setup.aim,
            recoil_disabled,
        }
    }

    pub fn on_fire_pressed(&mut self, host: &mut Host<'_>) -> bool {
        self.fire.start_fire(host)
    }

    pub fn on_fire_released(&mut self) {
        self.fire.release();
    }

    pub fn on_reload_pressed(&mut self, feedback: &mut dyn FeedbackSink) -> bool {
        self.fire.request_reload(feedback)
    }

    pub fn cancel_reload(&mut self) -> bool {
        self.fire.cancel_reload()
    }

    /// Advance one simulation tick.
    ///
    /// Recoil is integrated into the controller first, then due timers
    /// (automatic shots, reload completion) run.
    pub fn on_tick(&mut self, dt: f32, look: LookInput, host: &mut Host<'_>) -> AimStep {
        let step = match self.fire.recoil_mut() {
            Some(recoil) => self.aim.integrate(recoil, dt, look, &mut *host.controller),
            None => AimStep::Idle,
        };
        self.fire.advance_timers(dt, host);
        step
    }

    pub fn magazine_ammo(&self) -> u32 {
        self.fire.ammo().magazine()
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.fire.ammo().reserve()
    }

    pub fn ammo(&self) -> &AmmoStore {
        self.fire.ammo()
    }

    pub fn is_firing(&self) -> bool {
        self.fire.is_firing()
    }

    pub fn is_auto_firing(&self) -> bool {
        self.fire.is_auto_firing()
    }

    pub fn is_reloading(&self) -> bool {
        self.fire.is_reloading()
    }

    pub fn reload_remaining(&self) -> Option<f32> {
        self.fire.reload_remaining()
    }

    pub fn recoil_enabled(&self) -> bool {
        self.fire.recoil().is_some()
    }

    /// Why recoil is off, if it is.
    pub fn recoil_disabled(&self) -> Option<RecoilDisabled> {
        self.recoil_disabled
    }

    /// Timeline phase, or `None` without recoil.
    pub fn recoil_phase(&self) -> Option<TimelinePhase> {
        self.fire.recoil().map(Recoil::phase)
    }

    pub fn recoil(&self) -> Option<&Recoil> {
        self.fire.recoil()
    }

    pub fn shots_fired(&self) -> u64 {
        self.fire.shots_fired()
    }

    pub fn last_shot(&self) -> Option<&ShotReport> {
        self.fire.last_shot()
    }
}
