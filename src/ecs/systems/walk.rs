//! Walk process: on every walk tick, move the ion one ternary step unless it
//! is held at a closed gate.
//!
//! Position is unbounded in both directions. A blocked tick still counts as a
//! tick; only the position update (and its random draw) is skipped.

use bevy_app::App;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};
use rand::Rng;

use crate::ecs::clock::SimClock;
use crate::ecs::conditions::walk_due;
use crate::ecs::resources::{ProcessCounters, SimulationState, TickActivity, WalkRng};
use crate::ecs::schedule::{ProcessSet, SimTick};
use crate::ecs::timer::WalkTimer;

pub fn add_walk_systems(app: &mut App) {
    app.add_systems(
        SimTick,
        (sync_walk_timer, step_ion.run_if(walk_due))
            .chain()
            .in_set(ProcessSet::Walk),
    );
}

/// Cancel and re-arm the walk timer whenever speed, step weights, or the
/// channel state changed. Runs after the gate, so a flip this instant restarts
/// the walk period from now.
fn sync_walk_timer(
    clock: Res<SimClock>,
    state: Res<SimulationState>,
    mut timer: ResMut<WalkTimer>,
) {
    let key = state.walk_key();
    if timer.0.sync(key, key.speed_ms, clock.time) {
        tracing::debug!(
            time = %clock.time,
            speed_ms = key.speed_ms,
            p_right = key.p_right,
            p_stay = key.p_stay,
            channel_open = key.channel_open,
            generation = timer.0.generation(),
            "walk timer scheduled"
        );
    }
}

fn step_ion(
    clock: Res<SimClock>,
    mut state: ResMut<SimulationState>,
    mut rng: ResMut<WalkRng>,
    mut timer: ResMut<WalkTimer>,
    mut counters: ResMut<ProcessCounters>,
    mut activity: ResMut<TickActivity>,
) {
    timer.0.fire(clock.time);
    counters.walk_ticks += 1;
    activity.walk_fired = true;

    if state.ion_blocked() {
        counters.blocked_ticks += 1;
        tracing::trace!(time = %clock.time, position = state.ion_position, "ion held at closed gate");
        return;
    }

    let step = state.step.select(rng.0.random::<f64>());
    state.ion_position += step.delta();
    tracing::trace!(time = %clock.time, ?step, position = state.ion_position, "ion stepped");
}
