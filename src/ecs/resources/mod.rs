pub mod sim_resources;
pub mod state;

pub use sim_resources::{
    ConfigOverrides, GateRng, ProcessCounters, SimConfig, SimRng, TickActivity, WalkRng,
};
pub use state::{ChannelState, SimulationState, TickIntervals};
