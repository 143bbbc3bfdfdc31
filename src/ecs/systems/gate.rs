//! Gate process: on every gate tick, redraw the channel state from the gating
//! curve. Each tick is an independent Bernoulli trial; the previous state
//! plays no part in the outcome.

use bevy_app::App;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};
use rand::Rng;

use crate::ecs::clock::SimClock;
use crate::ecs::conditions::gate_due;
use crate::ecs::resources::{GateRng, ProcessCounters, SimulationState, TickActivity};
use crate::ecs::schedule::{ProcessSet, SimTick};
use crate::ecs::timer::GateTimer;

pub fn add_gate_systems(app: &mut App) {
    app.add_systems(
        SimTick,
        (sync_gate_timer, sample_gate.run_if(gate_due))
            .chain()
            .in_set(ProcessSet::Gate),
    );
}

/// Cancel and re-arm the gate timer whenever the membrane potential changed.
fn sync_gate_timer(
    clock: Res<SimClock>,
    state: Res<SimulationState>,
    mut timer: ResMut<GateTimer>,
) {
    let key = state.gate_key();
    if timer.0.sync(key, state.intervals.gate_interval_ms, clock.time) {
        tracing::debug!(
            time = %clock.time,
            membrane_potential = key.membrane_potential,
            generation = timer.0.generation(),
            "gate timer scheduled"
        );
    }
}

fn sample_gate(
    clock: Res<SimClock>,
    mut state: ResMut<SimulationState>,
    mut rng: ResMut<GateRng>,
    mut timer: ResMut<GateTimer>,
    mut counters: ResMut<ProcessCounters>,
    mut activity: ResMut<TickActivity>,
) {
    timer.0.fire(clock.time);

    let p_open = state.open_probability();
    let open = rng.0.random::<f64>() < p_open;
    if open && !state.channel.open {
        counters.openings += 1;
    }
    state.channel.open = open;

    counters.gate_ticks += 1;
    activity.gate_fired = true;
    tracing::trace!(time = %clock.time, p_open, open, "gate sampled");
}
