use bevy_ecs::system::Res;

use super::clock::SimClock;
use super::resources::TickActivity;
use super::timer::{GateTimer, WalkTimer};

// Bevy run condition functions (for use with `.run_if()`).

pub fn gate_due(clock: Res<SimClock>, timer: Res<GateTimer>) -> bool {
    timer.0.is_due(clock.time)
}

pub fn walk_due(clock: Res<SimClock>, timer: Res<WalkTimer>) -> bool {
    timer.0.is_due(clock.time)
}

pub fn process_fired(activity: Res<TickActivity>) -> bool {
    activity.any()
}
