//! Magazine and reserve ammunition bookkeeping.

/// Rounds a full magazine holds unless configured otherwise.
pub const DEFAULT_MAGAZINE_CAPACITY: u32 = 30;

/// Magazine and reserve counters for one weapon.
///
/// The magazine never exceeds capacity and neither counter can go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmoStore {
    magazine: u32,
    reserve: u32,
    capacity: u32,
}

impl Default for AmmoStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAGAZINE_CAPACITY, DEFAULT_MAGAZINE_CAPACITY, 90)
    }
}

impl AmmoStore {
    /// Create a store. A magazine count above capacity is clamped to capacity.
    pub fn new(capacity: u32, magazine: u32, reserve: u32) -> Self {
        Self {
            magazine: magazine.min(capacity),
            reserve,
            capacity,
        }
    }

    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.magazine == 0
    }

    pub fn is_full(&self) -> bool {
        self.magazine >= self.capacity
    }

    /// A reload would move at least one round.
    pub fn can_reload(&self) -> bool {
        !self.is_full() && self.reserve > 0
    }

    /// Spend one round. Returns false with no change when the magazine is empty.
    pub fn fire(&mut self) -> bool {
        if self.magazine == 0 {
            return false;
        }
        self.magazine -= 1;
        true
    }

    /// Top up the magazine from reserve and return how many rounds moved.
    ///
    /// Moves `min(capacity - magazine, reserve)`; a full magazine or empty
    /// reserve makes this a no-op returning 0.
    pub fn reload(&mut self) -> u32 {
        if !self.can_reload() {
            return 0;
        }
        let needed = self.capacity - self.magazine;
        let moved = needed.min(self.reserve);

        self.magazine += moved;
        self.reserve -= moved;
        moved
    }

    /// Get ammo display string.
    pub fn ammo_display(&self) -> String {
        format!("{} / {}", self.magazine, self.reserve)
    }
}
