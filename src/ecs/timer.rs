//! Cancelable periodic tasks keyed by the parameters they were scheduled with.
//!
//! A task never changes period in place: when its key changes it is cancelled
//! and re-armed from the current instant, so at most one schedule per task is
//! ever live.

use bevy_ecs::resource::Resource;

use super::time::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Unscheduled,
    Armed { next_fire: SimTime },
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PeriodicTask<K> {
    state: TaskState,
    key: Option<K>,
    period_ms: u64,
    generation: u32,
}

impl<K: PartialEq + Copy> PeriodicTask<K> {
    pub fn new() -> Self {
        Self {
            state: TaskState::Unscheduled,
            key: None,
            period_ms: 0,
            generation: 0,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn key(&self) -> Option<K> {
        self.key
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// How many times the task has been armed.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn next_fire(&self) -> Option<SimTime> {
        match self.state {
            TaskState::Armed { next_fire } => Some(next_fire),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TaskState::Cancelled
    }

    /// Arm the task if it has never run, or cancel and re-arm it from `now` if
    /// `key` differs from the one it was armed with. Returns true if the task
    /// was (re)armed. A cancelled task stays cancelled.
    pub fn sync(&mut self, key: K, period_ms: u64, now: SimTime) -> bool {
        match self.state {
            TaskState::Cancelled => false,
            TaskState::Armed { .. } if self.key == Some(key) => false,
            _ => {
                self.arm(key, period_ms, now);
                true
            }
        }
    }

    fn arm(&mut self, key: K, period_ms: u64, now: SimTime) {
        let period_ms = period_ms.max(1);
        self.key = Some(key);
        self.period_ms = period_ms;
        self.generation += 1;
        self.state = TaskState::Armed {
            next_fire: now.after(period_ms),
        };
    }

    pub fn is_due(&self, now: SimTime) -> bool {
        matches!(self.state, TaskState::Armed { next_fire } if now >= next_fire)
    }

    /// Record a firing at `now` and schedule the next one a period later. If
    /// the clock has already passed that deadline the task realigns to
    /// `now + period` rather than firing in a burst.
    pub fn fire(&mut self, now: SimTime) {
        if let TaskState::Armed { next_fire } = self.state {
            let mut next = next_fire.after(self.period_ms);
            if next <= now {
                next = now.after(self.period_ms);
            }
            self.state = TaskState::Armed { next_fire: next };
        }
    }

    pub fn cancel(&mut self) {
        self.state = TaskState::Cancelled;
    }
}

impl<K: PartialEq + Copy> Default for PeriodicTask<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs the gate timer depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateKey {
    pub membrane_potential: f64,
}

/// Inputs the walk timer depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkKey {
    pub speed_ms: u64,
    pub p_right: f64,
    pub p_stay: f64,
    pub channel_open: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct GateTimer(pub PeriodicTask<GateKey>);

#[derive(Resource, Debug, Clone, Default)]
pub struct WalkTimer(pub PeriodicTask<WalkKey>);
