use bevy_app::App;
use bevy_ecs::schedule::ExecutorKind;

use super::clock::SimClock;
use super::plugin::IonChannelPlugin;
use super::resources::{GateRng, ProcessCounters, SimConfig, SimRng, TickActivity, WalkRng};
use super::schedule::configure_sim_schedule;
use super::snapshot::{RenderSnapshot, Snapshot};
use super::time::SimTime;
use super::timer::{GateTimer, WalkTimer};

/// Build a headless Bevy app running the ion channel simulation.
///
/// Uses the single-threaded executor, so a given seed always replays the same
/// run. Manual tick control:
/// ```no_run
/// # use ion_channel_sim::ecs::{build_sim_app, SimConfig, SimTick};
/// let mut app = build_sim_app(&SimConfig::default());
/// for _ in 0..6_000 {  // one minute at 10 ms resolution
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(config: &SimConfig) -> App {
    build_sim_app_with_executor(config, ExecutorKind::SingleThreaded)
}

/// Build the simulation app with a specific executor kind.
pub fn build_sim_app_with_executor(config: &SimConfig, executor: ExecutorKind) -> App {
    let mut app = build_core_app(config, executor);
    app.add_plugins(IonChannelPlugin);
    app
}

/// Clock, state, timers and RNGs without any process systems installed.
pub fn build_core_app(config: &SimConfig, executor: ExecutorKind) -> App {
    let mut app = App::empty();
    let state = config.initial_state();

    app.insert_resource(SimClock::new(config.resolution_ms));
    app.insert_resource(RenderSnapshot(Snapshot::capture(&state, SimTime::ZERO)));
    app.insert_resource(state);
    app.insert_resource(config.clone());
    let mut root = SimRng::new(config.seed);
    app.insert_resource(GateRng::fork_from(&mut root));
    app.insert_resource(WalkRng::fork_from(&mut root));
    app.insert_resource(root);
    app.init_resource::<GateTimer>();
    app.init_resource::<WalkTimer>();
    app.init_resource::<ProcessCounters>();
    app.init_resource::<TickActivity>();

    app.add_schedule(configure_sim_schedule(executor));
    app
}
