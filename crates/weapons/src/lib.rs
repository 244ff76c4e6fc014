//! Weapon handling for a first-person character.
//!
//! - `AmmoStore`: magazine/reserve counts and reload arithmetic
//! - `RecoilTimeline`: two-axis curve playback, forward on fire, reverse on release
//! - `AimIntegrator`: applies recoil to the controller and eases it back
//! - `FireControl`: trigger, automatic fire, hit-scan shots, delayed reloads
//! - `WeaponRig`: the host-facing entry points tying them together
//!
//! Everything engine-owned (controller rotation, traces, sound, animation)
//! is reached through the traits in [`host`] and [`hitscan`].

pub mod aim;
pub mod ammo;
pub mod config;
pub mod curve;
pub mod error;
pub mod fire;
pub mod hitscan;
pub mod host;
pub mod rig;
pub mod timeline;

pub use aim::*;
pub use ammo::*;
pub use config::*;
pub use curve::*;
pub use error::*;
pub use fire::*;
pub use hitscan::*;
pub use host::*;
pub use rig::*;
pub use timeline::*;
