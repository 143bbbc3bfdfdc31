use std::path::PathBuf;

use thiserror::Error;

/// A parameter write rejected at the boundary. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be finite")]
    NotFinite { name: &'static str },

    #[error("{name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("pRight ({p_right}) + pStay ({p_stay}) exceeds 1")]
    StepProbabilitiesExceedOne { p_right: f64, p_stay: f64 },
}

/// Invalid `SimConfig`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid initial parameters: {0}")]
    Parameter(#[from] ParameterError),

    #[error("clock resolution must be at least 1 ms")]
    ZeroResolution,

    #[error("gate interval must be at least 1 ms")]
    ZeroGateInterval,

    #[error("ion starts at {ion}, not before the channel at {channel}")]
    IonStartsPastChannel { ion: i64, channel: i64 },

    #[error("gating curve parameters must be finite")]
    NonFiniteGating,

    #[error("gating steepness {steepness} must be positive")]
    NonPositiveSteepness { steepness: f64 },

    #[error("reading {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("parsing {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}
