//! Deferred effects: state mutations that run after a delay
//!
//! The engine never owns a timer. A transition that needs a delayed follow-up
//! returns a [`ScheduledEffect`]; the host waits `delay` and hands the
//! [`EffectId`] back to the engine. Each [`EffectKind`] carries a generation
//! counter, and scheduling or cancelling bumps it, so an id from an older
//! event is stale and firing it does nothing. The newest event wins no
//! matter in which order host timers fire.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a deferred effect does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Return from `ERROR` to a cleared, idle display
    ErrorReset,
    /// Remove the angle-unit indicator from the secondary display
    ModeIndicatorExpiry,
    /// Remove the power-on banner
    BannerExpiry,
}

impl EffectKind {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            Self::ErrorReset => 0,
            Self::ModeIndicatorExpiry => 1,
            Self::BannerExpiry => 2,
        }
    }
}

/// Identity of one scheduled effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId {
    /// Effect kind
    pub kind: EffectKind,
    /// Generation of `kind` at scheduling time
    pub generation: u64,
}

/// Request to fire `id` after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    /// Handle to pass back to the engine
    pub id: EffectId,
    /// How long the host waits before firing
    pub delay: Duration,
}

/// Generation bookkeeping for deferred effects
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    generations: [u64; EffectKind::COUNT],
    armed: [bool; EffectKind::COUNT],
}

impl EffectScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind`, superseding any earlier request of the same kind
    pub fn schedule(&mut self, kind: EffectKind, delay: Duration) -> ScheduledEffect {
        let idx = kind.index();
        self.generations[idx] += 1;
        self.armed[idx] = true;
        ScheduledEffect {
            id: EffectId {
                kind,
                generation: self.generations[idx],
            },
            delay,
        }
    }

    /// Cancels any outstanding request of `kind`
    ///
    /// Returns true if one was pending.
    pub fn cancel(&mut self, kind: EffectKind) -> bool {
        let idx = kind.index();
        let was_armed = self.armed[idx];
        if was_armed {
            self.generations[idx] += 1;
            self.armed[idx] = false;
        }
        was_armed
    }

    /// Returns true while `kind` has an outstanding request
    #[must_use]
    pub fn is_pending(&self, kind: EffectKind) -> bool {
        self.armed[kind.index()]
    }

    /// Consumes `id` if it is the live request for its kind
    ///
    /// Stale or already-fired ids return false.
    pub fn take(&mut self, id: EffectId) -> bool {
        let idx = id.kind.index();
        if self.armed[idx] && self.generations[idx] == id.generation {
            self.armed[idx] = false;
            true
        } else {
            false
        }
    }
}

/// Host-side timer queue driven by a [`Clock`]
///
/// Holds scheduled effects until their due time and yields them in due-time
/// order. Staleness is still decided by the engine when an id is fired.
#[derive(Debug)]
pub struct EffectQueue<C: Clock> {
    clock: C,
    pending: Vec<(Duration, u64, EffectId)>,
    sequence: u64,
}

impl<C: Clock> EffectQueue<C> {
    /// Creates an empty queue on `clock`
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            pending: Vec::new(),
            sequence: 0,
        }
    }

    /// The queue's clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts the timer for `effect`
    pub fn push(&mut self, effect: ScheduledEffect) {
        let due = self.clock.now() + effect.delay;
        self.sequence += 1;
        self.pending.push((due, self.sequence, effect.id));
    }

    /// Removes and returns every effect due by now, earliest first
    pub fn due(&mut self) -> Vec<EffectId> {
        let now = self.clock.now();
        self.drain_where(|due| due <= now)
    }

    /// Removes and returns every pending effect regardless of due time
    pub fn drain_all(&mut self) -> Vec<EffectId> {
        self.drain_where(|_| true)
    }

    /// Earliest due time among pending effects
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|(due, _, _)| *due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn drain_where(&mut self, mut is_due: impl FnMut(Duration) -> bool) -> Vec<EffectId> {
        let (mut ready, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(due, _, _)| is_due(*due));
        self.pending = waiting;
        ready.sort_by_key(|(due, seq, _)| (*due, *seq));
        ready.into_iter().map(|(_, _, id)| id).collect()
    }
}
