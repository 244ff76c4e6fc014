//! Sandbox configuration (tick rate, range layout, weapon, script).
//! Loaded from config.ron at startup.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weapons::WeaponConfig;

use crate::script::SessionScript;

/// Persistent sandbox settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed simulation rate in Hz.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    /// Degrees of turn per unit of scripted look input.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub weapon: WeaponConfig,
    #[serde(default)]
    pub script: SessionScript,
}

/// Where the shooter stands and what it shoots at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default)]
    pub shooter_position: Vec3,
    #[serde(default = "default_eye_height")]
    pub eye_height: f32,
    /// Initial yaw in degrees (0 looks down -Z).
    #[serde(default)]
    pub start_yaw: f32,
    #[serde(default)]
    pub start_pitch: f32,
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub position: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
}

fn default_tick_rate() -> f32 {
    60.0
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_eye_height() -> f32 {
    1.6
}
fn default_half_extents() -> Vec3 {
    Vec3::new(0.5, 1.0, 0.5)
}
fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig {
            name: "near".to_string(),
            position: Vec3::new(0.0, 1.6, -25.0),
            half_extents: Vec3::new(1.0, 1.0, 0.25),
        },
        TargetConfig {
            name: "mid".to_string(),
            position: Vec3::new(0.0, 3.2, -40.0),
            half_extents: Vec3::new(1.5, 0.6, 0.25),
        },
        TargetConfig {
            name: "far".to_string(),
            position: Vec3::new(6.0, 1.5, -60.0),
            half_extents: default_half_extents(),
        },
    ]
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            shooter_position: Vec3::ZERO,
            eye_height: default_eye_height(),
            start_yaw: 0.0,
            start_pitch: 0.0,
            targets: default_targets(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            sensitivity: default_sensitivity(),
            range: RangeConfig::default(),
            weapon: WeaponConfig::default(),
            script: SessionScript::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Seconds per simulation tick. Non-positive rates fall back to 60 Hz.
    pub fn tick_seconds(&self) -> f32 {
        if self.tick_rate.is_finite() && self.tick_rate > 0.0 {
            1.0 / self.tick_rate
        } else {
            log::warn!("tick_rate {} is not positive, using 60 Hz", self.tick_rate);
            1.0 / default_tick_rate()
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
