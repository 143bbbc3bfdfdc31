pub mod gating;
pub mod params;
pub mod step;

pub use gating::{GatingCurve, STEEPNESS, THRESHOLD_POTENTIAL_MV};
pub use params::{
    MEMBRANE_POTENTIAL_RANGE_MV, P_RIGHT_RANGE, P_STAY_RANGE, ParameterUpdate, SPEED_RANGE_MS,
    SimParams,
};
pub use step::{Step, StepProbabilities};
