use ion_channel_sim::ecs::{GateTimer, SimulationState};
use ion_channel_sim::{SimConfig, Simulation};

#[allow(dead_code)]
/// Clock steps as long as one walk period, so each `tick()` fires exactly one
/// walk while the gate is held.
pub fn one_walk_per_tick() -> SimConfig {
    SimConfig {
        resolution_ms: 100,
        ..SimConfig::default()
    }
}

/// Stop the gate process and pin the channel to `open`.
pub fn hold_channel(sim: &mut Simulation, open: bool) {
    let world = sim.app_mut().world_mut();
    world.resource_mut::<GateTimer>().0.cancel();
    world.resource_mut::<SimulationState>().channel.open = open;
}

#[allow(dead_code)]
/// Channel state sampled right after each of the first `n` gate ticks.
pub fn gate_sequence(sim: &mut Simulation, n: usize) -> Vec<bool> {
    let gate_ms = sim.config().gate_interval_ms;
    sim.tick();
    (0..n)
        .map(|_| {
            sim.run_for(gate_ms);
            sim.state().channel.open
        })
        .collect()
}
