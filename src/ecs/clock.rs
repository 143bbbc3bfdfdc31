use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};

use super::time::SimTime;
use super::timer::{GateTimer, WalkTimer};

/// Simulation clock resource tracking the current time and tick count.
///
/// Advances by at most `resolution_ms` per tick, stopping short at the next
/// timer deadline so every process fires on its exact instant whatever the
/// resolution. The `advance_clock` system moves the clock forward at the end
/// of each tick (in `SimPhase::Last`), so systems see the current time before
/// it advances.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    pub time: SimTime,
    pub tick_count: u64,
    pub resolution_ms: u64,
}

impl SimClock {
    pub fn new(resolution_ms: u64) -> Self {
        Self {
            time: SimTime::ZERO,
            tick_count: 0,
            resolution_ms: resolution_ms.max(1),
        }
    }

    /// Advance the clock by one resolution step.
    pub fn advance(&mut self) {
        self.advance_until(None);
    }

    /// Advance by one resolution step, or only as far as `deadline` when it
    /// falls inside that step.
    pub fn advance_until(&mut self, deadline: Option<SimTime>) {
        let step = self.time.after(self.resolution_ms);
        self.time = match deadline {
            Some(at) if at > self.time && at < step => at,
            _ => step,
        };
        self.tick_count += 1;
    }
}

/// Bevy system that advances the simulation clock to the next step or timer
/// deadline, whichever comes first. Registered in `SimPhase::Last` so all
/// other systems see the current time before it advances.
pub fn advance_clock(mut clock: ResMut<SimClock>, gate: Res<GateTimer>, walk: Res<WalkTimer>) {
    let now = clock.time;
    let deadline = [gate.0.next_fire(), walk.0.next_fire()]
        .into_iter()
        .flatten()
        .filter(|&at| at > now)
        .min();
    clock.advance_until(deadline);
}
