use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::timer::{GateKey, WalkKey};
use crate::error::ParameterError;
use crate::model::params::check_step_sum;
use crate::model::{GatingCurve, ParameterUpdate, SimParams, StepProbabilities};

/// The gate and where it sits on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    pub open: bool,
    pub position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickIntervals {
    pub gate_interval_ms: u64,
    /// The "speed" slider.
    pub walk_interval_ms: u64,
}

/// Shared record read and written by both processes and read by the renderer.
///
/// Only the gate process writes `channel.open` and only the walk process
/// writes `ion_position`. Parameter fields change through [`apply`] and
/// [`set_params`], which validate before writing.
///
/// [`apply`]: SimulationState::apply
/// [`set_params`]: SimulationState::set_params
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub channel: ChannelState,
    pub ion_position: i64,
    pub membrane_potential: f64,
    pub step: StepProbabilities,
    pub intervals: TickIntervals,
    pub gating: GatingCurve,
}

impl SimulationState {
    pub fn open_probability(&self) -> f64 {
        self.gating.open_probability(self.membrane_potential)
    }

    /// True when the walk must skip its update: the ion is at or past a
    /// closed gate.
    pub fn ion_blocked(&self) -> bool {
        self.ion_position >= self.channel.position && !self.channel.open
    }

    pub fn params(&self) -> SimParams {
        SimParams {
            speed_ms: self.intervals.walk_interval_ms,
            p_right: self.step.p_right,
            p_stay: self.step.p_stay,
            membrane_potential: self.membrane_potential,
        }
    }

    /// Validate and apply one parameter write. On error nothing changes.
    pub fn apply(&mut self, update: ParameterUpdate) -> Result<(), ParameterError> {
        update.validate()?;
        match update {
            ParameterUpdate::Speed(ms) => self.intervals.walk_interval_ms = ms,
            ParameterUpdate::PRight(p) => {
                let step = StepProbabilities::new(p, self.step.p_stay);
                check_step_sum(&step)?;
                self.step = step;
            }
            ParameterUpdate::PStay(p) => {
                let step = StepProbabilities::new(self.step.p_right, p);
                check_step_sum(&step)?;
                self.step = step;
            }
            ParameterUpdate::MembranePotential(v) => self.membrane_potential = v,
        }
        Ok(())
    }

    /// Validate and apply a full parameter set atomically.
    pub fn set_params(&mut self, params: SimParams) -> Result<(), ParameterError> {
        params.validate()?;
        self.intervals.walk_interval_ms = params.speed_ms;
        self.step = params.step_probabilities();
        self.membrane_potential = params.membrane_potential;
        Ok(())
    }

    pub fn gate_key(&self) -> GateKey {
        GateKey {
            membrane_potential: self.membrane_potential,
        }
    }

    pub fn walk_key(&self) -> WalkKey {
        WalkKey {
            speed_ms: self.intervals.walk_interval_ms,
            p_right: self.step.p_right,
            p_stay: self.step.p_stay,
            channel_open: self.channel.open,
        }
    }
}
