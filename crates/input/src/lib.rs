//! Input handling for weapon actions and look axes.
//!
//! Device plumbing lives in the host. This crate only turns raw action
//! presses and look deltas into per-frame state with edge detection.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Discrete weapon actions bound by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Trigger; held for automatic fire.
    Fire,
    /// Start a reload.
    Reload,
}

/// Press or release of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementState {
    Pressed,
    Released,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held down.
    held: HashSet<Action>,
    /// Actions pressed this frame.
    pressed: HashSet<Action>,
    /// Actions released this frame.
    released: HashSet<Action>,

    /// Look delta accumulated this frame (x = yaw, y = pitch).
    look: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call once the frame has consumed its input.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.look = Vec2::ZERO;
    }

    /// Process an action event.
    pub fn process_action(&mut self, action: Action, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.held.contains(&action) {
                    self.pressed.insert(action);
                }
                self.held.insert(action);
            }
            ElementState::Released => {
                if self.held.remove(&action) {
                    self.released.insert(action);
                }
            }
        }
    }

    /// Accumulate look input (yaw, pitch) for this frame.
    pub fn process_look(&mut self, delta: Vec2) {
        self.look += delta;
    }

    /// Check if an action is currently held.
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was pressed this frame.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was released this frame.
    pub fn is_released(&self, action: Action) -> bool {
        self.released.contains(&action)
    }

    /// Look delta for this frame (x = yaw, y = pitch).
    pub fn look_delta(&self) -> Vec2 {
        self.look
    }

    /// Check if fire was pressed this frame.
    pub fn is_fire_pressed(&self) -> bool {
        self.is_pressed(Action::Fire)
    }

    /// Check if fire was released this frame.
    pub fn is_fire_released(&self) -> bool {
        self.is_released(Action::Fire)
    }

    /// Check if reload was pressed this frame.
    pub fn is_reload_pressed(&self) -> bool {
        self.is_pressed(Action::Reload)
    }
}
