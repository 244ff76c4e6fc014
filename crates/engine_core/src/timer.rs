//! Simulated-time timer service for deferred and repeating callbacks.
//!
//! Timers carry a payload event instead of a closure. The owner advances the
//! clock once per tick and then drains due events one at a time, so a handler
//! can cancel or schedule timers before the next due event is looked at.

/// Slack used when comparing due times against the clock.
const TIME_EPSILON: f64 = 1.0e-6;

/// Shortest accepted repeat period, keeps a zero period from spinning forever.
const MIN_PERIOD: f64 = 1.0e-3;

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<E> {
    handle: TimerHandle,
    due: f64,
    period: Option<f64>,
    event: E,
}

/// Timer queue driven by simulated time.
#[derive(Debug)]
pub struct Scheduler<E> {
    /// Current simulated time in seconds.
    now: f64,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Simulated seconds since the scheduler was created.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `event` once, `delay` seconds from now.
    pub fn schedule_once(&mut self, delay: f32, event: E) -> TimerHandle {
        let due = self.now + f64::from(delay.max(0.0));
        self.insert(due, None, event)
    }

    /// Run `event` every `period` seconds, first firing one period from now.
    pub fn schedule_repeating(&mut self, period: f32, event: E) -> TimerHandle {
        let period = f64::from(period).max(MIN_PERIOD);
        self.insert(self.now + period, Some(period), event)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Check whether a timer is still pending.
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Seconds until the timer next fires.
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| (t.due - self.now).max(0.0) as f32)
    }

    /// Move the clock forward. Due timers are collected with [`Self::pop_due`].
    pub fn advance(&mut self, dt: f32) {
        self.now += f64::from(dt.max(0.0));
    }

    fn insert(&mut self, due: f64, period: Option<f64>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            due,
            period,
            event,
        });
        handle
    }

    /// Index of the earliest due timer, ties going to the one scheduled first.
    fn earliest_due(&self) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.now + TIME_EPSILON)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .partial_cmp(&b.due)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(index, _)| index)
    }
}

impl<E: Clone> Scheduler<E> {
    /// Pop the next due timer, in due-time order.
    ///
    /// One-shot timers are removed; repeating timers are re-armed one period
    /// later and can come back in the same drain if the tick covered several
    /// periods.
    pub fn pop_due(&mut self) -> Option<(TimerHandle, E)> {
        let index = self.earliest_due()?;
        match self.timers[index].period {
            Some(period) => {
                let timer = &mut self.timers[index];
                timer.due += period;
                Some((timer.handle, timer.event.clone()))
            }
            None => {
                let timer = self.timers.swap_remove(index);
                Some((timer.handle, timer.event))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, event)) = scheduler.pop_due() {
            fired.push(event);
        }
        fired
    }

    #[test]
    fn one_shot_fires_once_after_delay() {
        let mut s = Scheduler::new();
        let handle = s.schedule_once(1.25, "reload");

        s.advance(1.0);
        assert!(drain(&mut s).is_empty());
        assert!(s.is_active(handle));

        s.advance(0.25);
        assert_eq!(drain(&mut s), vec!["reload"]);
        assert!(!s.is_active(handle));

        s.advance(5.0);
        assert!(drain(&mut s).is_empty());
    }

    #[test]
    fn repeating_fires_every_period_until_cancelled() {
        let mut s = Scheduler::new();
        let handle = s.schedule_repeating(0.1, "shot");

        let mut shots = 0;
        for _ in 0..10 {
            s.advance(0.05);
            shots += drain(&mut s).len();
        }
        assert_eq!(shots, 5);

        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));
        s.advance(1.0);
        assert!(drain(&mut s).is_empty());
    }

    #[test]
    fn long_tick_fires_each_elapsed_period() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0.1, "shot");
        s.advance(0.35);
        assert_eq!(drain(&mut s).len(), 3);
    }

    #[test]
    fn due_events_come_out_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule_once(0.3, "late");
        s.schedule_once(0.1, "early");
        s.schedule_once(0.1, "early-second");
        s.advance(1.0);
        assert_eq!(drain(&mut s), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn cancel_during_drain_stops_later_occurrences() {
        let mut s = Scheduler::new();
        let repeating = s.schedule_repeating(0.1, "shot");
        s.advance(0.45);

        let mut fired = 0;
        while let Some((handle, _)) = s.pop_due() {
            fired += 1;
            if fired == 2 {
                s.cancel(handle);
            }
        }
        assert_eq!(fired, 2);
        assert!(!s.is_active(repeating));
    }

    #[test]
    fn remaining_reports_time_to_next_fire() {
        let mut s = Scheduler::new();
        let handle = s.schedule_once(1.25, "reload");
        s.advance(0.25);
        let remaining = s.remaining(handle).unwrap();
        assert!((remaining - 1.0).abs() < 1e-5);
        assert!(s.cancel(handle));
        assert_eq!(s.remaining(handle), None);
    }
}
