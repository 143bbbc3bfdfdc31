pub mod ecs;
pub mod error;
pub mod model;
pub mod simulation;

pub use ecs::{ConfigOverrides, SimConfig, SimTime, SimulationState, Snapshot, SnapshotSink};
pub use error::{ConfigError, ParameterError};
pub use model::{GatingCurve, ParameterUpdate, SimParams, Step, StepProbabilities};
pub use simulation::Simulation;
