//! Fire control: trigger handling, automatic fire, hit-scan shots and reloads.

use crate::aim::Recoil;
use crate::ammo::AmmoStore;
use crate::hitscan::HitResult;
use crate::host::{FeedbackSink, Host};
use engine_core::{Scheduler, TimerHandle, Vec3};

/// Seconds between automatic shots (10 rounds per second).
pub const DEFAULT_FIRE_PERIOD: f32 = 0.1;
/// Seconds from reload press until rounds move into the magazine.
pub const DEFAULT_RELOAD_DELAY: f32 = 1.25;
/// Hit-scan reach in world units.
pub const DEFAULT_MAX_RANGE: f32 = 10_000.0;

/// Deferred work the weapon schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTimer {
    AutomaticFire,
    ReloadComplete,
}

/// Tuning for fire control.
#[derive(Debug, Clone, PartialEq)]
pub struct FireSettings {
    pub fire_period: f32,
    pub reload_delay: f32,
    pub max_range: f32,
    pub fire_sound: Option<String>,
    /// Without a fire animation a burst ends on its first automatic shot.
    pub fire_animation: Option<String>,
    pub reload_animation: Option<String>,
    /// Restart the recoil curve on every automatic shot, not just on trigger press.
    pub restart_recoil_per_shot: bool,
    /// Pressing the trigger cancels a pending reload.
    pub fire_interrupts_reload: bool,
}

impl Default for FireSettings {
    fn default() -> Self {
        Self {
            fire_period: DEFAULT_FIRE_PERIOD,
            reload_delay: DEFAULT_RELOAD_DELAY,
            max_range: DEFAULT_MAX_RANGE,
            fire_sound: Some("rifle_fire".to_string()),
            fire_animation: Some("rifle_fire_montage".to_string()),
            reload_animation: Some("rifle_reload_montage".to_string()),
            restart_recoil_per_shot: false,
            fire_interrupts_reload: false,
        }
    }
}

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    /// Shots fired by this weapon so far, including this one.
    pub sequence: u64,
    pub origin: Vec3,
    pub direction: Vec3,
    pub hit: Option<HitResult>,
    /// Rounds left in the magazine after this shot.
    pub magazine_after: u32,
}

/// Lives while the trigger is held.
#[derive(Debug)]
struct FireSession {
    auto_fire: Option<TimerHandle>,
    shots: u32,
}

/// Owns ammunition, recoil state and the weapon's timers.
#[derive(Debug)]
pub struct FireControl {
    settings: FireSettings,
    ammo: AmmoStore,
    recoil: Option<Recoil>,
    timers: Scheduler<WeaponTimer>,
    session: Option<FireSession>,
    pending_reload: Option<TimerHandle>,
    shots_fired: u64,
    last_shot: Option<ShotReport>,
}

impl FireControl {
    /// `recoil` is `None` when the weapon has no recoil curves.
    pub fn new(settings: FireSettings, ammo: AmmoStore, recoil: Option<Recoil>) -> Self {
        Self::with_timers(settings, ammo, recoil, Scheduler::new())
    }

    /// Build on a timer service supplied by the host, e.g. one whose clock
    /// is already in step with the simulation.
    pub fn with_timers(
        settings: FireSettings,
        ammo: AmmoStore,
        recoil: Option<Recoil>,
        timers: Scheduler<WeaponTimer>,
    ) -> Self {
        Self {
            settings,
            ammo,
            recoil,
            timers,
            session: None,
            pending_reload: None,
            shots_fired: 0,
            last_shot: None,
        }
    }

    pub fn settings(&self) -> &FireSettings {
        &self.settings
    }

    pub fn ammo(&self) -> &AmmoStore {
        &self.ammo
    }

    pub fn timers(&self) -> &Scheduler<WeaponTimer> {
        &self.timers
    }

    pub fn recoil(&self) -> Option<&Recoil> {
        self.recoil.as_ref()
    }

    pub fn recoil_mut(&mut self) -> Option<&mut Recoil> {
        self.recoil.as_mut()
    }

    /// Trigger is held.
    pub fn is_firing(&self) -> bool {
        self.session.is_some()
    }

    /// The repeating fire timer is armed.
    pub fn is_auto_firing(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.auto_fire)
            .is_some_and(|handle| self.timers.is_active(handle))
    }

    pub fn is_reloading(&self) -> bool {
        self.pending_reload.is_some()
    }

    /// Seconds until a pending reload lands.
    pub fn reload_remaining(&self) -> Option<f32> {
        self.pending_reload.and_then(|h| self.timers.remaining(h))
    }

    pub fn shots_fired(&self) -> u64 {
        self.shots_fired
    }

    pub fn last_shot(&self) -> Option<&ShotReport> {
        self.last_shot.as_ref()
    }

    /// Trigger pressed. Dry-fires silently on an empty magazine.
    ///
    /// Captures the aim baseline, fires one round immediately, starts the
    /// recoil curve and arms the repeating fire timer.
    pub fn start_fire(&mut self, host: &mut Host<'_>) -> bool {
        if self.settings.fire_interrupts_reload {
            self.cancel_reload();
        }
        if self.ammo.is_empty() {
            log::debug!("dry fire: magazine empty");
            return false;
        }
        if let Some(previous) = self.session.take() {
            if let Some(handle) = previous.auto_fire {
                self.timers.cancel(handle);
            }
        }

        let baseline = host.controller.control_rotation();
        self.session = Some(FireSession {
            auto_fire: None,
            shots: 0,
        });

        self.fire_one_shot(host);
        if let Some(recoil) = &mut self.recoil {
            recoil.begin(baseline);
        }

        // Never arm the timer against an empty magazine.
        if !self.ammo.is_empty() {
            let handle = self
                .timers
                .schedule_repeating(self.settings.fire_period, WeaponTimer::AutomaticFire);
            if let Some(session) = &mut self.session {
                session.auto_fire = Some(handle);
            }
        }

        log::info!(
            "burst started at pitch {:.2} yaw {:.2}, {} left",
            baseline.pitch,
            baseline.yaw,
            self.ammo.ammo_display()
        );
        true
    }

    /// End automatic fire: disarm the repeating timer and play recoil back.
    pub fn stop_fire(&mut self) {
        self.cancel_auto_fire();
        if let Some(recoil) = &mut self.recoil {
            if recoil.release() {
                log::debug!("recoil reversing from t={:.3}", recoil.timeline().elapsed());
            }
        }
    }

    /// Trigger released: stop firing and close the session.
    pub fn release(&mut self) {
        self.stop_fire();
        if let Some(session) = self.session.take() {
            log::info!(
                "burst ended after {} shots, {} left",
                session.shots,
                self.ammo.ammo_display()
            );
        }
    }

    /// Spend a round and resolve it. Returns `None` on an empty magazine.
    pub fn fire_one_shot(&mut self, host: &mut Host<'_>) -> Option<ShotReport> {
        if !self.ammo.fire() {
            return None;
        }

        let (origin, rotation) = host.controller.view_point();
        let direction = rotation.direction();
        let hit = host
            .hitscan
            .trace_line(origin, direction, self.settings.max_range);

        self.shots_fired += 1;
        if let Some(session) = &mut self.session {
            session.shots += 1;
        }
        let report = ShotReport {
            sequence: self.shots_fired,
            origin,
            direction,
            hit,
            magazine_after: self.ammo.magazine(),
        };
        self.last_shot = Some(report);

        match &hit {
            Some(hit) => log::debug!(
                "shot {} hit at {:?} ({:.1} away)",
                report.sequence,
                hit.point,
                hit.distance
            ),
            None => log::debug!("shot {} hit nothing", report.sequence),
        }

        if let Some(cue) = &self.settings.fire_sound {
            host.feedback.play_sound(cue, origin);
        }
        host.feedback.shot_fired(&report);

        let animated = self.settings.fire_animation.is_some();
        if let Some(cue) = &self.settings.fire_animation {
            host.feedback.play_animation(cue);
        }
        if !animated {
            self.stop_fire();
        }

        if self.ammo.is_empty() && self.cancel_auto_fire() {
            log::info!("magazine empty, automatic fire disarmed");
        }
        Some(report)
    }

    /// Reload pressed: schedule the transfer after the reload delay.
    ///
    /// Ignored while a reload is already pending or when it would move nothing.
    pub fn request_reload(&mut self, feedback: &mut dyn FeedbackSink) -> bool {
        if self.pending_reload.is_some() {
            log::debug!("reload already pending");
            return false;
        }
        if !self.ammo.can_reload() {
            log::debug!("reload skipped: {}", self.ammo.ammo_display());
            return false;
        }

        let handle = self
            .timers
            .schedule_once(self.settings.reload_delay, WeaponTimer::ReloadComplete);
        self.pending_reload = Some(handle);
        if let Some(cue) = &self.settings.reload_animation {
            feedback.play_animation(cue);
        }
        log::info!("reloading ({:.2}s)", self.settings.reload_delay);
        true
    }

    /// Drop a pending reload. Returns false if none was pending.
    pub fn cancel_reload(&mut self) -> bool {
        match self.pending_reload.take() {
            Some(handle) => {
                self.timers.cancel(handle);
                log::info!("reload cancelled");
                true
            }
            None => false,
        }
    }

    /// Advance the weapon's clock and run whatever came due.
    pub fn advance_timers(&mut self, dt: f32, host: &mut Host<'_>) {
        self.timers.advance(dt);
        while let Some((handle, timer)) = self.timers.pop_due() {
            match timer {
                WeaponTimer::AutomaticFire => self.auto_fire(host),
                WeaponTimer::ReloadComplete => {
                    if self.pending_reload == Some(handle) {
                        self.complete_reload();
                    }
                }
            }
        }
    }

    fn auto_fire(&mut self, host: &mut Host<'_>) {
        let fired = self.fire_one_shot(host).is_some();
        if fired && self.settings.restart_recoil_per_shot && self.is_auto_firing() {
            if let Some(recoil) = &mut self.recoil {
                recoil.retrigger();
            }
        }
    }

    fn complete_reload(&mut self) {
        self.pending_reload = None;
        let moved = self.ammo.reload();
        log::info!("reloaded {} rounds, {}", moved, self.ammo.ammo_display());
    }

    /// Returns true if a timer was armed.
    fn cancel_auto_fire(&mut self) -> bool {
        let handle = self.session.as_mut().and_then(|s| s.auto_fire.take());
        match handle {
            Some(handle) => self.timers.cancel(handle),
            None => false,
        }
    }
}
