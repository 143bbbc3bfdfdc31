use serde::{Deserialize, Serialize};

/// One move of the ion along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Right,
    Stay,
    Left,
}

impl Step {
    pub fn delta(self) -> i64 {
        match self {
            Step::Right => 1,
            Step::Stay => 0,
            Step::Left => -1,
        }
    }
}

/// Ternary step weights. `p_left` is implicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepProbabilities {
    pub p_right: f64,
    pub p_stay: f64,
}

impl StepProbabilities {
    pub fn new(p_right: f64, p_stay: f64) -> Self {
        Self { p_right, p_stay }
    }

    /// Remaining mass for a left step, floored at zero.
    pub fn p_left(&self) -> f64 {
        (1.0 - self.p_right - self.p_stay).max(0.0)
    }

    /// Pick a step for a uniform draw `u` in `[0, 1)`.
    ///
    /// `[0, p_right)` is Right, `[p_right, p_right + p_stay)` is Stay, the rest
    /// is Left. Right is checked first, so weights summing past 1 squeeze out
    /// Stay and then Left.
    pub fn select(&self, u: f64) -> Step {
        if u < self.p_right {
            Step::Right
        } else if u < self.p_right + self.p_stay {
            Step::Stay
        } else {
            Step::Left
        }
    }
}

impl Default for StepProbabilities {
    fn default() -> Self {
        Self::new(0.6, 0.1)
    }
}
