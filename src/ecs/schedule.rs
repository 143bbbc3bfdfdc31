use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for one clock step of the simulation.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Phases run in declaration order: PreUpdate < Update < PostUpdate < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Last,
}

/// The two periodic processes within `SimPhase::Update`.
///
/// Both write `SimulationState`, so they are ordered explicitly: when both
/// timers fall due in the same tick the gate is sampled first and the walk
/// reads the fresh channel state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcessSet {
    Gate,
    Walk,
}

/// Build a configured `SimTick` schedule with phase ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Update,
            SimPhase::PostUpdate,
            SimPhase::Last,
        )
            .chain(),
    );
    schedule.configure_sets(ProcessSet::Gate.in_set(SimPhase::Update));
    schedule.configure_sets(ProcessSet::Walk.in_set(SimPhase::Update));
    schedule.configure_sets(ProcessSet::Walk.after(ProcessSet::Gate));
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
