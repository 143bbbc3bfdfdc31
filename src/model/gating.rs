use serde::{Deserialize, Serialize};

/// Potential (mV) at which the channel is open half the time.
pub const THRESHOLD_POTENTIAL_MV: f64 = -55.0;

/// Steepness of the logistic gating curve (1/mV).
pub const STEEPNESS: f64 = 0.1;

/// Logistic mapping from membrane potential to channel open probability.
///
/// `P(V) = 1 / (1 + exp(-k * (V - threshold)))`. Strictly increasing in `V`,
/// exactly 0.5 at the threshold. Mathematically the output never reaches 0 or 1
/// for finite input; in `f64` it saturates once `|k * (V - threshold)|` exceeds
/// roughly 37, far outside the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatingCurve {
    pub threshold_mv: f64,
    pub steepness: f64,
}

impl GatingCurve {
    pub fn new(threshold_mv: f64, steepness: f64) -> Self {
        Self {
            threshold_mv,
            steepness,
        }
    }

    pub fn open_probability(&self, membrane_potential: f64) -> f64 {
        1.0 / (1.0 + (-self.steepness * (membrane_potential - self.threshold_mv)).exp())
    }
}

impl Default for GatingCurve {
    fn default() -> Self {
        Self::new(THRESHOLD_POTENTIAL_MV, STEEPNESS)
    }
}
