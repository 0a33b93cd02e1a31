//! Virtual-clock scheduler for the periodic and deferred session effects
//!
//! Every armed effect is addressed by a [`TimerHandle`] carrying the
//! generation of its slot. Cancelling or re-using a slot bumps the
//! generation, so a superseded handle can never fire or cancel anything.
//!
//! Effects due at the same instant fire in kind order (tick, clock, power
//! expiry), then in the order they were armed.

use serde::{Deserialize, Serialize};

/// The kinds of scheduled effects a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    Tick,
    Clock,
    PowerExpiry,
}

/// Cancellable reference to one armed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    slot: usize,
    generation: u64,
}

/// An effect that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub kind: TimerKind,
    pub handle: TimerHandle,
    /// Virtual time the effect was due
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    kind: TimerKind,
    due_ms: u64,
    /// `Some` for repeating effects
    period_ms: Option<u64>,
    generation: u64,
    armed: bool,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    slots: Vec<Slot>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm a repeating effect; first due one period from now
    pub fn schedule_repeating(&mut self, kind: TimerKind, period_ms: u64) -> TimerHandle {
        self.arm(kind, period_ms.max(1), Some(period_ms.max(1)))
    }

    /// Arm a one-shot effect due `delay_ms` from now
    pub fn schedule_once(&mut self, kind: TimerKind, delay_ms: u64) -> TimerHandle {
        self.arm(kind, delay_ms, None)
    }

    fn arm(&mut self, kind: TimerKind, delay_ms: u64, period_ms: Option<u64>) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_ms = self.now_ms + delay_ms;

        let slot = match self.slots.iter().position(|s| !s.armed) {
            Some(i) => {
                let s = &mut self.slots[i];
                s.kind = kind;
                s.due_ms = due_ms;
                s.period_ms = period_ms;
                s.generation += 1;
                s.armed = true;
                s.seq = seq;
                i
            }
            None => {
                self.slots.push(Slot {
                    kind,
                    due_ms,
                    period_ms,
                    generation: 0,
                    armed: true,
                    seq,
                });
                self.slots.len() - 1
            }
        };

        TimerHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    /// True if `handle` still refers to an armed effect
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.slot)
            .is_some_and(|s| s.armed && s.generation == handle.generation)
    }

    /// Disarm the effect behind `handle`. Stale handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if !self.is_active(handle) {
            return false;
        }
        let slot = &mut self.slots[handle.slot];
        slot.armed = false;
        slot.generation += 1;
        true
    }

    pub fn cancel_all(&mut self) {
        for slot in self.slots.iter_mut().filter(|s| s.armed) {
            slot.armed = false;
            slot.generation += 1;
        }
    }

    /// Time of the next armed effect
    pub fn next_due(&self) -> Option<u64> {
        self.slots.iter().filter(|s| s.armed).map(|s| s.due_ms).min()
    }

    pub fn armed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.armed).count()
    }

    /// Fire the earliest effect due at or before `until_ms`, moving the
    /// clock to its due time. Repeating effects are re-armed in place;
    /// one-shot effects are disarmed and their handle goes stale.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let index = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.armed && s.due_ms <= until_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.kind, s.seq))
            .map(|(i, _)| i)?;

        let slot = &mut self.slots[index];
        let fired = Fired {
            kind: slot.kind,
            handle: TimerHandle {
                slot: index,
                generation: slot.generation,
            },
            at_ms: slot.due_ms,
        };
        self.now_ms = self.now_ms.max(slot.due_ms);

        match slot.period_ms {
            Some(period) => slot.due_ms += period,
            None => {
                slot.armed = false;
                slot.generation += 1;
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
