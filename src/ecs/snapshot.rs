use std::io;

use bevy_app::App;
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};
use serde::Serialize;

use super::clock::SimClock;
use super::conditions::process_fired;
use super::resources::{SimulationState, TickActivity};
use super::schedule::{SimPhase, SimTick};
use super::time::SimTime;

/// Read-only view of the simulation for a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elapsed_ms: u64,
    pub ion_position: i64,
    pub channel_open: bool,
    pub membrane_potential: f64,
    pub open_probability: f64,
}

impl Snapshot {
    pub fn capture(state: &SimulationState, time: SimTime) -> Self {
        Self {
            elapsed_ms: time.as_millis(),
            ion_position: state.ion_position,
            channel_open: state.channel.open,
            membrane_potential: state.membrane_potential,
            open_probability: state.open_probability(),
        }
    }
}

/// Latest snapshot, refreshed after every tick in which either process fired.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot(pub Snapshot);

/// Consumer of snapshots, e.g. a renderer or a frame recorder.
pub trait SnapshotSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

impl SnapshotSink for Vec<Snapshot> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.push(*snapshot);
        Ok(())
    }
}

pub fn add_snapshot_systems(app: &mut App) {
    app.add_systems(SimTick, reset_tick_activity.in_set(SimPhase::PreUpdate));
    app.add_systems(
        SimTick,
        refresh_snapshot
            .run_if(process_fired)
            .in_set(SimPhase::PostUpdate),
    );
}

fn reset_tick_activity(mut activity: ResMut<TickActivity>) {
    *activity = TickActivity::default();
}

fn refresh_snapshot(
    clock: Res<SimClock>,
    state: Res<SimulationState>,
    mut snapshot: ResMut<RenderSnapshot>,
) {
    snapshot.0 = Snapshot::capture(&state, clock.time);
}
