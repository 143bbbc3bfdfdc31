mod common;

use ion_channel_sim::ecs::WalkTimer;
use ion_channel_sim::{
    ConfigError, ConfigOverrides, ParameterError, ParameterUpdate, SimConfig, SimParams,
    Simulation,
};

#[test]
fn valid_updates_are_applied() {
    let mut sim = Simulation::default();
    sim.set_parameter(ParameterUpdate::Speed(30)).unwrap();
    sim.set_parameter(ParameterUpdate::PRight(0.4)).unwrap();
    sim.set_parameter(ParameterUpdate::PStay(0.35)).unwrap();
    sim.set_parameter(ParameterUpdate::MembranePotential(-10.0))
        .unwrap();
    assert_eq!(
        sim.state().params(),
        SimParams {
            speed_ms: 30,
            p_right: 0.4,
            p_stay: 0.35,
            membrane_potential: -10.0,
        }
    );
}

#[test]
fn out_of_range_updates_are_rejected() {
    let mut sim = Simulation::default();
    let before = sim.state().clone();
    for update in [
        ParameterUpdate::Speed(5),
        ParameterUpdate::Speed(500),
        ParameterUpdate::PRight(0.95),
        ParameterUpdate::PStay(-0.1),
        ParameterUpdate::MembranePotential(-120.0),
        ParameterUpdate::MembranePotential(f64::INFINITY),
    ] {
        assert!(sim.set_parameter(update).is_err(), "{update:?} accepted");
    }
    assert_eq!(sim.state(), &before);
}

#[test]
fn oversubscribed_step_weights_are_rejected() {
    let mut sim = Simulation::default();
    sim.set_parameter(ParameterUpdate::PStay(0.4)).unwrap();
    assert_eq!(
        sim.set_parameter(ParameterUpdate::PRight(0.7)),
        Err(ParameterError::StepProbabilitiesExceedOne {
            p_right: 0.7,
            p_stay: 0.4,
        })
    );
    assert_eq!(sim.state().step.p_right, 0.6);
}

#[test]
fn full_parameter_set_is_atomic() {
    let mut sim = Simulation::default();
    let bad = SimParams {
        speed_ms: 20,
        p_right: 0.9,
        p_stay: 0.5,
        membrane_potential: 0.0,
    };
    assert!(sim.set_parameters(bad).is_err());
    assert_eq!(sim.state().params(), SimParams::default());
}

#[test]
fn update_takes_effect_on_next_walk_tick() {
    let mut sim = Simulation::default();
    sim.run_for(150);
    sim.set_parameter(ParameterUpdate::Speed(10)).unwrap();
    // The running schedule is untouched until the next tick re-arms it.
    let period = sim.app().world().resource::<WalkTimer>().0.period_ms();
    assert_eq!(period, 100);

    sim.tick();
    let period = sim.app().world().resource::<WalkTimer>().0.period_ms();
    assert_eq!(period, 10);
}

#[test]
fn repeated_writes_never_stack_timers() {
    let mut sim = Simulation::default();
    common::hold_channel(&mut sim, false);
    for speed in [10, 20, 30, 40, 50] {
        sim.set_parameter(ParameterUpdate::Speed(speed)).unwrap();
        sim.tick();
    }
    let walks_before = sim.counters().walk_ticks;
    sim.run_for(1_000);
    // One live timer at 50 ms: 20 firings, not one per historical speed.
    assert_eq!(sim.counters().walk_ticks - walks_before, 20);
}

#[test]
fn invalid_initial_config_is_rejected() {
    let mut config = SimConfig::default();
    config.params.p_right = 0.9;
    config.params.p_stay = 0.5;
    assert!(matches!(
        Simulation::new(config),
        Err(ConfigError::Parameter(
            ParameterError::StepProbabilitiesExceedOne { .. }
        ))
    ));
}

#[test]
fn config_loads_from_json_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.json");
    std::fs::write(
        &path,
        r#"{ "seed": 9, "initial_ion_position": -30, "params": { "membrane_potential": -40.0 } }"#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        speed_ms: Some(50),
        ..ConfigOverrides::default()
    };
    let config = SimConfig::from_json_file(&path)
        .unwrap()
        .with_overrides(&overrides);
    let sim = Simulation::new(config).unwrap();
    assert_eq!(sim.config().seed, 9);
    assert_eq!(sim.state().ion_position, -30);
    assert_eq!(sim.state().membrane_potential, -40.0);
    assert_eq!(sim.state().params().speed_ms, 50);
    assert_eq!(sim.state().params().p_right, 0.6);
}

#[test]
fn unreadable_or_malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        SimConfig::from_json_file(&missing),
        Err(ConfigError::Read { path, .. }) if path == missing
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ \"seed\": ").unwrap();
    assert!(matches!(
        SimConfig::from_json_file(&broken),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn decreasing_gating_curve_is_rejected() {
    let mut config = SimConfig::default();
    config.gating.steepness = -0.1;
    assert_eq!(
        Simulation::new(config).err(),
        Some(ConfigError::NonPositiveSteepness { steepness: -0.1 })
    );
}
