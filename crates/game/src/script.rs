//! Timed input for the headless session.

use glam::Vec2;
use input::{Action, ElementState, InputState};
use serde::{Deserialize, Serialize};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScriptInput {
    Press(Action),
    Release(Action),
    /// Steady look input for `duration` seconds, in input units per second.
    Look { yaw: f32, pitch: f32, duration: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    /// Session time in seconds.
    pub at: f32,
    pub input: ScriptInput,
}

impl ScriptEvent {
    pub fn new(at: f32, input: ScriptInput) -> Self {
        Self { at, input }
    }
}

/// What to press and when, plus how long to keep simulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default = "default_events")]
    pub events: Vec<ScriptEvent>,
}

fn default_duration() -> f32 {
    10.0
}

/// Short burst, reload, tap with a flick during recovery, then a burst
/// long enough to run the magazine dry, and a final reload.
fn default_events() -> Vec<ScriptEvent> {
    use ScriptInput::*;
    vec![
        ScriptEvent::new(0.0, Press(Action::Fire)),
        ScriptEvent::new(0.8, Release(Action::Fire)),
        ScriptEvent::new(1.0, Press(Action::Reload)),
        ScriptEvent::new(1.1, Release(Action::Reload)),
        ScriptEvent::new(2.6, Press(Action::Fire)),
        ScriptEvent::new(3.0, Release(Action::Fire)),
        ScriptEvent::new(
            3.1,
            Look {
                yaw: 6.0,
                pitch: 0.0,
                duration: 0.1,
            },
        ),
        ScriptEvent::new(4.0, Press(Action::Fire)),
        ScriptEvent::new(7.5, Release(Action::Fire)),
        ScriptEvent::new(8.0, Press(Action::Reload)),
        ScriptEvent::new(8.1, Release(Action::Reload)),
    ]
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            events: default_events(),
        }
    }
}

/// A look input still being applied.
#[derive(Debug, Clone, Copy)]
struct ActiveLook {
    until: f32,
    rate: Vec2,
}

/// Replays a [`SessionScript`] into an [`InputState`], one tick at a time.
#[derive(Debug)]
pub struct ScriptPlayer {
    events: Vec<ScriptEvent>,
    cursor: usize,
    looks: Vec<ActiveLook>,
}

impl ScriptPlayer {
    pub fn new(script: &SessionScript) -> Self {
        let mut events = script.events.clone();
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            events,
            cursor: 0,
            looks: Vec::new(),
        }
    }

    /// Deliver every event due by the tick starting at `now`, then add
    /// this tick's share of any active look input.
    pub fn feed(&mut self, now: f32, dt: f32, input: &mut InputState) {
        // Half a tick of slack so events land on the nearest tick.
        let horizon = now + dt * 0.5;
        while let Some(event) = self.events.get(self.cursor) {
            if event.at > horizon {
                break;
            }
            self.cursor += 1;
            match event.input {
                ScriptInput::Press(action) => input.process_action(action, ElementState::Pressed),
                ScriptInput::Release(action) => {
                    input.process_action(action, ElementState::Released)
                }
                ScriptInput::Look {
                    yaw,
                    pitch,
                    duration,
                } => self.looks.push(ActiveLook {
                    until: event.at + duration.max(0.0),
                    rate: Vec2::new(yaw, pitch),
                }),
            }
        }

        self.looks.retain(|look| look.until > horizon);
        for look in &self.looks {
            input.process_look(look.rate * dt);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len() && self.looks.is_empty()
    }
}
