use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;

use bevy_ecs::resource::Resource;
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::state::{ChannelState, SimulationState, TickIntervals};
use crate::error::ConfigError;
use crate::model::{GatingCurve, SimParams};

/// Simulation configuration (seed, clock, initial layout and parameters).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    /// Clock step per `SimTick`.
    pub resolution_ms: u64,
    pub gate_interval_ms: u64,
    pub channel_position: i64,
    pub initial_ion_position: i64,
    pub gating: GatingCurve,
    pub params: SimParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            resolution_ms: 10,
            gate_interval_ms: 1_000,
            channel_position: 0,
            initial_ion_position: -15,
            gating: GatingCurve::default(),
            params: SimParams::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_ms == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.gate_interval_ms == 0 {
            return Err(ConfigError::ZeroGateInterval);
        }
        if self.initial_ion_position >= self.channel_position {
            return Err(ConfigError::IonStartsPastChannel {
                ion: self.initial_ion_position,
                channel: self.channel_position,
            });
        }
        if !self.gating.threshold_mv.is_finite() || !self.gating.steepness.is_finite() {
            return Err(ConfigError::NonFiniteGating);
        }
        if self.gating.steepness <= 0.0 {
            return Err(ConfigError::NonPositiveSteepness {
                steepness: self.gating.steepness,
            });
        }
        self.params.validate()?;
        Ok(())
    }

    /// Read a full or partial config from a JSON file. Missing fields take
    /// their defaults; the result is not validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Replace any field named in `overrides`.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(v) = overrides.membrane_potential {
            self.params.membrane_potential = v;
        }
        if let Some(ms) = overrides.speed_ms {
            self.params.speed_ms = ms;
        }
        if let Some(p) = overrides.p_right {
            self.params.p_right = p;
        }
        if let Some(p) = overrides.p_stay {
            self.params.p_stay = p;
        }
        self
    }

    /// State at simulation start: channel closed, ion at its start position.
    pub fn initial_state(&self) -> SimulationState {
        SimulationState {
            channel: ChannelState {
                open: false,
                position: self.channel_position,
            },
            ion_position: self.initial_ion_position,
            membrane_potential: self.params.membrane_potential,
            step: self.params.step_probabilities(),
            intervals: TickIntervals {
                gate_interval_ms: self.gate_interval_ms,
                walk_interval_ms: self.params.speed_ms,
            },
            gating: self.gating,
        }
    }
}

/// Field overrides layered on top of a loaded config, typically from
/// command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub membrane_potential: Option<f64>,
    pub speed_ms: Option<u64>,
    pub p_right: Option<f64>,
    pub p_stay: Option<f64>,
}

/// Deterministic root RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Split off an independent stream for `process`. Forks are taken in a
    /// fixed order at startup, so each stream depends only on the root seed.
    pub fn fork(&mut self, process: &str) -> SmallRng {
        let draw: u64 = self.rng.random();
        SmallRng::seed_from_u64(derive_process_seed(draw, process))
    }
}

// ---------------------------------------------------------------------------
// Per-process RNG resources
// ---------------------------------------------------------------------------

macro_rules! process_rng {
    ($name:ident, $label:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl $name {
            pub fn fork_from(root: &mut SimRng) -> Self {
                Self(root.fork($label))
            }
        }
    };
}

process_rng!(GateRng, "gate", "Uniform draws for gate sampling.");
process_rng!(WalkRng, "walk", "Uniform draws for ion steps.");

/// Derive a deterministic per-process seed from a root draw and process name.
fn derive_process_seed(seed: u64, process: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    process.hash(&mut hasher);
    hasher.finish()
}

/// Running totals of process activity.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessCounters {
    pub gate_ticks: u64,
    pub walk_ticks: u64,
    /// Walk ticks that fired but left the ion in place at a closed gate.
    pub blocked_ticks: u64,
    /// Closed-to-open transitions.
    pub openings: u64,
}

/// Which processes fired during the current `SimTick`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickActivity {
    pub gate_fired: bool,
    pub walk_fired: bool,
}

impl TickActivity {
    pub fn any(&self) -> bool {
        self.gate_fired || self.walk_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn ion_must_start_before_channel() {
        let config = SimConfig {
            initial_ion_position: 0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IonStartsPastChannel { ion: 0, channel: 0 })
        );
    }

    #[test]
    fn zero_intervals_rejected() {
        let config = SimConfig {
            resolution_ms: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroResolution));

        let config = SimConfig {
            gate_interval_ms: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGateInterval));
    }

    #[test]
    fn invalid_initial_params_rejected() {
        let mut config = SimConfig::default();
        config.params.membrane_potential = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Parameter(_))));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "seed": 7, "params": { "p_right": 0.5 } }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.params.p_right, 0.5);
        assert_eq!(config.params.speed_ms, 100);
        assert_eq!(config.resolution_ms, 10);
    }

    #[test]
    fn process_rngs_are_independent_and_reproducible() {
        let mut root_a = SimRng::new(42);
        let mut root_b = SimRng::new(42);
        let mut gate_a = GateRng::fork_from(&mut root_a);
        let mut gate_b = GateRng::fork_from(&mut root_b);
        let mut walk = WalkRng::fork_from(&mut root_a);
        let a: Vec<f64> = (0..8).map(|_| gate_a.0.random()).collect();
        let b: Vec<f64> = (0..8).map(|_| gate_b.0.random()).collect();
        let w: Vec<f64> = (0..8).map(|_| walk.0.random()).collect();
        assert_eq!(a, b);
        assert_ne!(a, w);
        assert_eq!(root_a.seed, 42);
    }

    #[test]
    fn root_seed_changes_every_stream() {
        let mut gate_a = GateRng::fork_from(&mut SimRng::new(1));
        let mut gate_b = GateRng::fork_from(&mut SimRng::new(2));
        let a: Vec<f64> = (0..8).map(|_| gate_a.0.random()).collect();
        let b: Vec<f64> = (0..8).map(|_| gate_b.0.random()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn non_positive_steepness_rejected() {
        for steepness in [0.0, -0.1] {
            let config = SimConfig {
                gating: GatingCurve::new(-55.0, steepness),
                ..SimConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::NonPositiveSteepness { steepness })
            );
        }
    }

    #[test]
    fn coarse_resolution_is_accepted() {
        let config = SimConfig {
            resolution_ms: 1_000,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn overrides_replace_only_named_fields() {
        let overrides = ConfigOverrides {
            seed: Some(3),
            membrane_potential: Some(-90.0),
            p_stay: Some(0.0),
            ..ConfigOverrides::default()
        };
        let config = SimConfig::default().with_overrides(&overrides);
        assert_eq!(config.seed, 3);
        assert_eq!(config.params.membrane_potential, -90.0);
        assert_eq!(config.params.p_stay, 0.0);
        assert_eq!(config.params.speed_ms, 100);
        assert_eq!(config.params.p_right, 0.6);
    }
}
