use std::fmt;

use serde::{Deserialize, Serialize};

pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Simulation time as total elapsed milliseconds since start.
///
/// A plain `u64` wrapper. Natural ordering equals chronological ordering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// This instant shifted forward by `ms`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed between `earlier` and `self` (saturating).
    pub fn millis_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole seconds component.
    pub fn seconds(self) -> u64 {
        self.0 / MILLIS_PER_SECOND
    }

    /// Millisecond within the current second (0–999).
    pub fn subsec_millis(self) -> u64 {
        self.0 % MILLIS_PER_SECOND
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.seconds(), self.subsec_millis())
    }
}
