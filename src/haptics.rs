//! Haptic feedback requests
//!
//! The face never drives the motor itself. It asks for a pulse through
//! [`Haptics`] and moves on; whoever owns the motor decides when to play it.

use heapless::Deque;

/// Vibration patterns understood by the motor driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    /// Two 200 ms pulses
    Double,
}

impl Pulse {
    /// On-time of a single pulse in milliseconds.
    pub const fn duration_ms(self) -> u32 {
        match self {
            Pulse::Double => 200,
        }
    }

    /// How many times the motor fires for this pattern.
    pub const fn count(self) -> u8 {
        match self {
            Pulse::Double => 2,
        }
    }
}

/// Fire-and-forget haptic actuator.
pub trait Haptics {
    fn pulse(&mut self, pulse: Pulse);
}

/// Maximum number of requests held before new ones are dropped.
pub const QUEUE_DEPTH: usize = 4;

/// Pending pulse requests, oldest first.
///
/// Requests past [`QUEUE_DEPTH`] are dropped: a backlog of vibrations is
/// worse than a missed one.
#[derive(Default)]
pub struct HapticQueue {
    pending: Deque<Pulse, QUEUE_DEPTH>,
}

impl HapticQueue {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Number of requests waiting to be played.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the oldest request.
    pub fn take(&mut self) -> Option<Pulse> {
        self.pending.pop_front()
    }

    /// Take every pending request.
    pub fn drain(&mut self) -> impl Iterator<Item = Pulse> + '_ {
        core::iter::from_fn(move || self.pending.pop_front())
    }
}

impl Haptics for HapticQueue {
    fn pulse(&mut self, pulse: Pulse) {
        let _ = self.pending.push_back(pulse);
    }
}
