use bevy_app::{App, Plugin};

use super::snapshot::add_snapshot_systems;
use super::systems::gate::add_gate_systems;
use super::systems::walk::add_walk_systems;

/// Installs the gate process, the walk process, and snapshot refresh.
pub struct IonChannelPlugin;

impl Plugin for IonChannelPlugin {
    fn build(&self, app: &mut App) {
        add_gate_systems(app);
        add_walk_systems(app);
        add_snapshot_systems(app);
    }
}
