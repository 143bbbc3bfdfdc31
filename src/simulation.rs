use std::io;

use bevy_app::App;

use crate::ecs::app::build_sim_app;
use crate::ecs::clock::SimClock;
use crate::ecs::resources::{ProcessCounters, SimConfig, SimulationState, TickActivity};
use crate::ecs::schedule::SimTick;
use crate::ecs::snapshot::{RenderSnapshot, Snapshot, SnapshotSink};
use crate::ecs::time::SimTime;
use crate::ecs::timer::{GateTimer, WalkTimer};
use crate::error::{ConfigError, ParameterError};
use crate::model::{ParameterUpdate, SimParams};

/// Owned handle on a running ion channel simulation.
///
/// Parameter writes are validated here and land in the shared state right
/// away; the processes pick them up on their next tick.
pub struct Simulation {
    app: App,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            app: build_sim_app(&config),
        })
    }

    pub fn config(&self) -> &SimConfig {
        self.app.world().resource::<SimConfig>()
    }

    pub fn now(&self) -> SimTime {
        self.app.world().resource::<SimClock>().time
    }

    pub fn state(&self) -> &SimulationState {
        self.app.world().resource::<SimulationState>()
    }

    pub fn counters(&self) -> &ProcessCounters {
        self.app.world().resource::<ProcessCounters>()
    }

    /// Latest render snapshot (as of the last tick in which a process fired).
    pub fn snapshot(&self) -> Snapshot {
        self.app.world().resource::<RenderSnapshot>().0
    }

    /// Advance the clock by one step, firing any due process. A step covers
    /// `resolution_ms` or ends early at the next process deadline.
    pub fn tick(&mut self) {
        self.app.world_mut().run_schedule(SimTick);
    }

    /// Like [`tick`](Self::tick), pushing a snapshot to `sink` if either
    /// process fired.
    pub fn tick_with<S: SnapshotSink>(&mut self, sink: &mut S) -> io::Result<()> {
        self.tick();
        if self.app.world().resource::<TickActivity>().any() {
            sink.on_snapshot(&self.snapshot())?;
        }
        Ok(())
    }

    /// Process every instant in `[now, now + duration_ms)`.
    pub fn run_for(&mut self, duration_ms: u64) {
        let end = self.now().after(duration_ms);
        while self.now() < end {
            self.tick();
        }
    }

    /// Like [`run_for`](Self::run_for), pushing a snapshot to `sink` after
    /// every tick in which either process fired.
    pub fn run_for_with<S: SnapshotSink>(
        &mut self,
        duration_ms: u64,
        sink: &mut S,
    ) -> io::Result<()> {
        let end = self.now().after(duration_ms);
        while self.now() < end {
            self.tick_with(sink)?;
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, update: ParameterUpdate) -> Result<(), ParameterError> {
        let result = self
            .app
            .world_mut()
            .resource_mut::<SimulationState>()
            .apply(update);
        if let Err(err) = &result {
            tracing::warn!(?update, %err, "parameter update rejected");
        }
        result
    }

    pub fn set_parameters(&mut self, params: SimParams) -> Result<(), ParameterError> {
        let result = self
            .app
            .world_mut()
            .resource_mut::<SimulationState>()
            .set_params(params);
        if let Err(err) = &result {
            tracing::warn!(?params, %err, "parameter set rejected");
        }
        result
    }

    /// Cancel both process timers. The clock still advances on `tick`, but
    /// neither process fires again.
    pub fn shutdown(&mut self) {
        let world = self.app.world_mut();
        world.resource_mut::<GateTimer>().0.cancel();
        world.resource_mut::<WalkTimer>().0.cancel();
        tracing::debug!("gate and walk timers cancelled");
        tracing::info!(time = %self.now(), "simulation stopped");
    }

    pub fn is_running(&self) -> bool {
        let world = self.app.world();
        !(world.resource::<GateTimer>().0.is_cancelled()
            && world.resource::<WalkTimer>().0.is_cancelled())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            app: build_sim_app(&SimConfig::default()),
        }
    }
}
