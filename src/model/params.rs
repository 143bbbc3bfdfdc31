use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::step::StepProbabilities;
use crate::error::ParameterError;

pub const SPEED_RANGE_MS: RangeInclusive<u64> = 10..=200;
pub const P_RIGHT_RANGE: RangeInclusive<f64> = 0.1..=0.9;
pub const P_STAY_RANGE: RangeInclusive<f64> = 0.0..=0.5;
pub const MEMBRANE_POTENTIAL_RANGE_MV: RangeInclusive<f64> = -90.0..=40.0;

/// Slack for `p_right + p_stay <= 1` so slider values like 0.7 + 0.3 pass.
const STEP_SUM_TOLERANCE: f64 = 1e-9;

/// A single write from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterUpdate {
    /// Walk tick period in milliseconds.
    Speed(u64),
    PRight(f64),
    PStay(f64),
    /// Millivolts.
    MembranePotential(f64),
}

impl ParameterUpdate {
    /// Range and finiteness check for this field alone. The `p_right + p_stay`
    /// constraint needs the other field and is checked by the state on apply.
    pub fn validate(&self) -> Result<(), ParameterError> {
        match *self {
            ParameterUpdate::Speed(ms) => check_speed(ms),
            ParameterUpdate::PRight(p) => check_range("pRight", p, &P_RIGHT_RANGE),
            ParameterUpdate::PStay(p) => check_range("pStay", p, &P_STAY_RANGE),
            ParameterUpdate::MembranePotential(v) => {
                check_range("membranePotential", v, &MEMBRANE_POTENTIAL_RANGE_MV)
            }
        }
    }
}

/// The full set of externally settable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub speed_ms: u64,
    pub p_right: f64,
    pub p_stay: f64,
    pub membrane_potential: f64,
}

impl SimParams {
    pub fn step_probabilities(&self) -> StepProbabilities {
        StepProbabilities::new(self.p_right, self.p_stay)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check_speed(self.speed_ms)?;
        check_range("pRight", self.p_right, &P_RIGHT_RANGE)?;
        check_range("pStay", self.p_stay, &P_STAY_RANGE)?;
        check_range(
            "membranePotential",
            self.membrane_potential,
            &MEMBRANE_POTENTIAL_RANGE_MV,
        )?;
        check_step_sum(&self.step_probabilities())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        let step = StepProbabilities::default();
        Self {
            speed_ms: 100,
            p_right: step.p_right,
            p_stay: step.p_stay,
            membrane_potential: -70.0,
        }
    }
}

pub(crate) fn check_step_sum(step: &StepProbabilities) -> Result<(), ParameterError> {
    if step.p_right + step.p_stay > 1.0 + STEP_SUM_TOLERANCE {
        return Err(ParameterError::StepProbabilitiesExceedOne {
            p_right: step.p_right,
            p_stay: step.p_stay,
        });
    }
    Ok(())
}

fn check_speed(ms: u64) -> Result<(), ParameterError> {
    if !SPEED_RANGE_MS.contains(&ms) {
        return Err(ParameterError::OutOfRange {
            name: "speed",
            value: ms as f64,
            min: *SPEED_RANGE_MS.start() as f64,
            max: *SPEED_RANGE_MS.end() as f64,
        });
    }
    Ok(())
}

fn check_range(
    name: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name });
    }
    if !range.contains(&value) {
        return Err(ParameterError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}
