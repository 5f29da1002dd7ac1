//! Fixed-capacity FIFO of recent distance readings.

use heapless::Deque;

use crate::config::MAX_WINDOW_CAPACITY;

/// Most recent distance readings, oldest first.
///
/// Backed by a `heapless::Deque` sized for [`MAX_WINDOW_CAPACITY`]; the
/// configured capacity may be smaller.  Length never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Deque<f32, MAX_WINDOW_CAPACITY>,
    capacity: usize,
}

impl SampleWindow {
    /// `capacity` is clamped to `1..=MAX_WINDOW_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Deque::new(),
            capacity: capacity.clamp(1, MAX_WINDOW_CAPACITY),
        }
    }

    /// Append a reading, evicting the oldest ones beyond capacity.
    pub fn push(&mut self, distance_cm: f32) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        // Cannot fail: capacity <= MAX_WINDOW_CAPACITY and we just made room.
        let _ = self.samples.push_back(distance_cm);
    }

    /// `max − min` over the current contents, `None` while empty.
    pub fn spread(&self) -> Option<f32> {
        let mut iter = self.samples.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(max - min)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Readings in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }
}
