//! Serializable weapon configuration and its validation into runtime parts.

use crate::aim::{AimIntegrator, SampleMode, DEFAULT_RECOVERY_SPEED};
use crate::ammo::{AmmoStore, DEFAULT_MAGAZINE_CAPACITY};
use crate::curve::{Keyframe, RecoilCurve};
use crate::error::{ConfigError, RecoilAxis};
use crate::fire::{FireSettings, DEFAULT_FIRE_PERIOD, DEFAULT_MAX_RANGE, DEFAULT_RELOAD_DELAY};
use crate::timeline::RecoilTimeline;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weapon tuning as written in `config.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    #[serde(default = "default_capacity")]
    pub magazine_capacity: u32,
    /// Rounds loaded at spawn.
    #[serde(default = "default_capacity")]
    pub magazine_ammo: u32,
    #[serde(default = "default_reserve")]
    pub reserve_ammo: u32,
    /// Seconds between automatic shots.
    #[serde(default = "default_fire_period")]
    pub fire_period: f32,
    #[serde(default = "default_reload_delay")]
    pub reload_delay: f32,
    #[serde(default = "default_max_range")]
    pub max_range: f32,
    /// Rate constant of the recovery ease.
    #[serde(default = "default_recovery_speed")]
    pub recovery_speed: f32,
    #[serde(default)]
    pub sample_mode: SampleMode,
    #[serde(default)]
    pub restart_recoil_per_shot: bool,
    #[serde(default)]
    pub fire_interrupts_reload: bool,
    #[serde(default = "default_fire_sound")]
    pub fire_sound: Option<String>,
    #[serde(default = "default_fire_animation")]
    pub fire_animation: Option<String>,
    #[serde(default = "default_reload_animation")]
    pub reload_animation: Option<String>,
    /// Horizontal kick. Recoil is disabled unless both curves are present;
    /// write `None` to turn it off.
    #[serde(default = "default_yaw_curve")]
    pub yaw_curve: Option<Vec<Keyframe>>,
    /// Vertical kick (positive pitches up).
    #[serde(default = "default_pitch_curve")]
    pub pitch_curve: Option<Vec<Keyframe>>,
}

fn default_capacity() -> u32 {
    DEFAULT_MAGAZINE_CAPACITY
}
fn default_reserve() -> u32 {
    90
}
fn default_fire_period() -> f32 {
    DEFAULT_FIRE_PERIOD
}
fn default_reload_delay() -> f32 {
    DEFAULT_RELOAD_DELAY
}
fn default_max_range() -> f32 {
    DEFAULT_MAX_RANGE
}
fn default_recovery_speed() -> f32 {
    DEFAULT_RECOVERY_SPEED
}

fn default_fire_sound() -> Option<String> {
    FireSettings::default().fire_sound
}
fn default_fire_animation() -> Option<String> {
    FireSettings::default().fire_animation
}
fn default_reload_animation() -> Option<String> {
    FireSettings::default().reload_animation
}

fn keys(points: &[(f32, f32)]) -> Vec<Keyframe> {
    points.iter().map(|&(t, v)| Keyframe::new(t, v)).collect()
}

// Small right-then-left drift over a steady climb.
fn default_yaw_curve() -> Option<Vec<Keyframe>> {
    Some(keys(&[(0.0, 0.0), (0.1, 0.08), (0.2, -0.05), (0.3, 0.03)]))
}
fn default_pitch_curve() -> Option<Vec<Keyframe>> {
    Some(keys(&[(0.0, 0.0), (0.1, 0.25), (0.2, 0.2), (0.3, 0.12)]))
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            magazine_capacity: default_capacity(),
            magazine_ammo: default_capacity(),
            reserve_ammo: default_reserve(),
            fire_period: default_fire_period(),
            reload_delay: default_reload_delay(),
            max_range: default_max_range(),
            recovery_speed: default_recovery_speed(),
            sample_mode: SampleMode::default(),
            restart_recoil_per_shot: false,
            fire_interrupts_reload: false,
            fire_sound: default_fire_sound(),
            fire_animation: default_fire_animation(),
            reload_animation: default_reload_animation(),
            yaw_curve: default_yaw_curve(),
            pitch_curve: default_pitch_curve(),
        }
    }
}

/// Why a weapon came up without recoil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoilDisabled {
    MissingYawCurve,
    MissingPitchCurve,
    MissingBothCurves,
}

impl fmt::Display for RecoilDisabled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoilDisabled::MissingYawCurve => f.write_str("no yaw recoil curve"),
            RecoilDisabled::MissingPitchCurve => f.write_str("no pitch recoil curve"),
            RecoilDisabled::MissingBothCurves => f.write_str("no recoil curves"),
        }
    }
}

/// Outcome of validating the recoil section.
#[derive(Debug, Clone)]
pub enum RecoilSetup {
    Enabled(RecoilTimeline),
    Disabled(RecoilDisabled),
}

impl RecoilSetup {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RecoilSetup::Enabled(_))
    }
}

/// Validated runtime parts for one weapon.
#[derive(Debug, Clone)]
pub struct WeaponSetup {
    pub ammo: AmmoStore,
    pub fire: FireSettings,
    pub aim: AimIntegrator,
    pub recoil: RecoilSetup,
}

impl WeaponConfig {
    /// Check every field and build the runtime parts.
    ///
    /// Missing curves are not an error: they yield [`RecoilSetup::Disabled`].
    /// Curves that are present but malformed are.
    pub fn validate(&self) -> Result<WeaponSetup, ConfigError> {
        if self.magazine_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.fire_period.is_finite() && self.fire_period > 0.0) {
            return Err(ConfigError::FirePeriod(self.fire_period));
        }
        if !(self.reload_delay.is_finite() && self.reload_delay >= 0.0) {
            return Err(ConfigError::ReloadDelay(self.reload_delay));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(ConfigError::MaxRange(self.max_range));
        }
        if !(self.recovery_speed.is_finite() && self.recovery_speed > 0.0) {
            return Err(ConfigError::RecoverySpeed(self.recovery_speed));
        }

        Ok(WeaponSetup {
            ammo: AmmoStore::new(self.magazine_capacity, self.magazine_ammo, self.reserve_ammo),
            fire: FireSettings {
                fire_period: self.fire_period,
                reload_delay: self.reload_delay,
                max_range: self.max_range,
                fire_sound: self.fire_sound.clone(),
                fire_animation: self.fire_animation.clone(),
                reload_animation: self.reload_animation.clone(),
                restart_recoil_per_shot: self.restart_recoil_per_shot,
                fire_interrupts_reload: self.fire_interrupts_reload,
            },
            aim: AimIntegrator::new(self.recovery_speed, self.sample_mode),
            recoil: self.recoil_setup()?,
        })
    }

    fn recoil_setup(&self) -> Result<RecoilSetup, ConfigError> {
        let (yaw, pitch) = match (&self.yaw_curve, &self.pitch_curve) {
            (Some(yaw), Some(pitch)) => (yaw, pitch),
            (None, None) => return Ok(RecoilSetup::Disabled(RecoilDisabled::MissingBothCurves)),
            (None, Some(_)) => return Ok(RecoilSetup::Disabled(RecoilDisabled::MissingYawCurve)),
            (Some(_), None) => return Ok(RecoilSetup::Disabled(RecoilDisabled::MissingPitchCurve)),
        };

        let yaw = RecoilCurve::new(yaw.clone()).map_err(|source| ConfigError::Curve {
            axis: RecoilAxis::Yaw,
            source,
        })?;
        let pitch = RecoilCurve::new(pitch.clone()).map_err(|source| ConfigError::Curve {
            axis: RecoilAxis::Pitch,
            source,
        })?;
        Ok(RecoilSetup::Enabled(RecoilTimeline::new(yaw, pitch)?))
    }
}
