pub mod app;
pub mod clock;
pub mod conditions;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod snapshot;
pub mod systems;
pub mod time;
pub mod timer;

#[cfg(test)]
pub mod test_helpers;

pub use app::{build_core_app, build_sim_app, build_sim_app_with_executor};
pub use clock::SimClock;
pub use conditions::{gate_due, process_fired, walk_due};
pub use plugin::IonChannelPlugin;
pub use resources::{
    ChannelState, ConfigOverrides, GateRng, ProcessCounters, SimConfig, SimRng, SimulationState,
    TickActivity, TickIntervals, WalkRng,
};
pub use schedule::{ProcessSet, SimPhase, SimTick, configure_sim_schedule};
pub use snapshot::{RenderSnapshot, Snapshot, SnapshotSink};
pub use time::SimTime;
pub use timer::{GateKey, GateTimer, PeriodicTask, TaskState, WalkKey, WalkTimer};
