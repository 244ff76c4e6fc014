//! Core engine types shared by the recoil sandbox crates.
//!
//! - Aim rotation math (`Rotator`)
//! - Simulated-time timer service (`Scheduler`)

pub mod rotator;
pub mod timer;

pub use rotator::*;
pub use timer::*;

// Re-export commonly used types
pub use glam::Vec3;
