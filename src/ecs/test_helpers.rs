use bevy_app::App;

use crate::ecs::app::build_sim_app;
use crate::ecs::clock::SimClock;
use crate::ecs::resources::{ProcessCounters, SimConfig, SimulationState};
use crate::ecs::schedule::SimTick;
use crate::ecs::timer::GateTimer;

/// Run `n` clock steps.
pub fn tick_n(app: &mut App, n: u64) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run clock steps until `ms` milliseconds have passed.
pub fn tick_ms(app: &mut App, ms: u64) {
    let end = app.world().resource::<SimClock>().time.after(ms);
    while app.world().resource::<SimClock>().time < end {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run until the walk process has fired `n` more times.
pub fn tick_walks(app: &mut App, n: u64) {
    let target = app.world().resource::<ProcessCounters>().walk_ticks + n;
    while app.world().resource::<ProcessCounters>().walk_ticks < target {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Stop the gate process and pin the channel to `open`.
pub fn hold_channel(app: &mut App, open: bool) {
    app.world_mut().resource_mut::<GateTimer>().0.cancel();
    app.world_mut().resource_mut::<SimulationState>().channel.open = open;
}

/// Channel state after each of the first `n` gate ticks of a fresh run.
pub fn gate_outcomes(config: &SimConfig, n: usize) -> Vec<bool> {
    let mut app = build_sim_app(config);
    let mut outcomes = Vec::with_capacity(n);
    let mut seen = 0;
    while outcomes.len() < n {
        app.world_mut().run_schedule(SimTick);
        let gate_ticks = app.world().resource::<ProcessCounters>().gate_ticks;
        if gate_ticks > seen {
            seen = gate_ticks;
            outcomes.push(app.world().resource::<SimulationState>().channel.open);
        }
    }
    outcomes
}
