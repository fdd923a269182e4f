use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lorentz_sim::simulation::states::wrap;
use lorentz_sim::{Boost, FixedDelta, NVec2, Parameters, Scenario, ScenarioConfig, SimError, Simulator, ViewerConfig};
use lorentz_sim::{lorentz_transform, velocity_at, WallClock};

/// Default parameters with a fixed seed
pub fn test_params() -> Parameters {
    Parameters {
        seed: 42,
        ..Parameters::default()
    }
}

/// Seeded simulator with default sizes
pub fn test_sim() -> Simulator {
    Simulator::from_seed(test_params()).expect("default parameters are valid")
}

/// Undo `boost` on `p` and check the raw coordinate comes back
fn assert_round_trip(boost: &Boost, raw: &NVec2, transformed: &NVec2) {
    let back = boost.inverse().apply(transformed);
    assert_relative_eq!(back.x, raw.x, epsilon = 1e-3, max_relative = 1e-4);
    assert_relative_eq!(back.y, raw.y, epsilon = 1e-3, max_relative = 1e-4);
}

// ==================================================================================
// Velocity law and boost tests
// ==================================================================================

#[test]
fn velocity_stays_below_c() {
    let p = test_params();
    let mut t = -500.0_f64;
    while t < 500.0 {
        let v = velocity_at(t, &p);
        assert!(v.abs() <= 0.75 + 1e-6, "v = {v} at t = {t}");

        let boost = Boost::new(v, p.c).expect("|v| < c");
        assert!(boost.gamma >= 1.0 && boost.gamma.is_finite());
        t += 0.37;
    }
}

#[test]
fn boost_rejects_light_speed() {
    assert_eq!(Boost::new(1.5, 1.5), Err(SimError::VelocityBound { v: 1.5, c: 1.5 }));
    assert!(Boost::new(-2.0, 1.5).is_err());
    assert!(Boost::new(f32::NAN, 1.5).is_err());
    assert!(lorentz_transform(&NVec2::new(1.0, 1.0), 1.6, 1.5).is_err());
}

#[test]
fn zero_velocity_is_identity() {
    let p = NVec2::new(12.5, -3.0);
    let out = lorentz_transform(&p, 0.0, 1.5).unwrap();
    assert_eq!(out, p);
}

#[test]
fn boost_matrix_matches_apply() {
    let boost = Boost::new(0.6, 1.5).unwrap();
    let p = NVec2::new(-40.0, 7.5);

    let direct = boost.apply(&p);
    let linear = boost.matrix() * p;

    assert_relative_eq!(direct.x, linear.x, epsilon = 1e-4);
    assert_relative_eq!(direct.y, linear.y, epsilon = 1e-4);
}

#[test]
fn light_cone_is_invariant() {
    // x^2 - c^2 t^2 is preserved by the boost
    let c = 1.5_f32;
    let boost = Boost::new(0.7, c).unwrap();
    let p = NVec2::new(3.0, 4.0);
    let q = boost.apply(&p);

    let before = p.x * p.x - c * c * p.y * p.y;
    let after = q.x * q.x - c * c * q.y * q.y;
    assert_relative_eq!(before, after, epsilon = 1e-3);
}

proptest! {
    #[test]
    fn inverse_boost_recovers_coordinate(
        x in -500.0_f32..500.0,
        t in -250.0_f32..250.0,
        v in -0.75_f32..0.75,
    ) {
        let boost = Boost::new(v, 1.5).unwrap();
        let raw = NVec2::new(x, t);
        let back = boost.inverse().apply(&boost.apply(&raw));

        prop_assert!((back.x - x).abs() <= 1e-3 + 1e-4 * x.abs());
        prop_assert!((back.y - t).abs() <= 1e-3 + 1e-4 * t.abs());
    }
}

// ==================================================================================
// Construction tests
// ==================================================================================

#[test]
fn cloud_seeded_inside_window() {
    let sim = test_sim();
    assert_eq!(sim.raw_cloud().len(), 1000);
    assert_eq!(sim.transformed_cloud().len(), 1000);

    for p in sim.raw_cloud() {
        assert!((-200.0..200.0).contains(&p.x), "x = {}", p.x);
        assert!((-20.0..20.0).contains(&p.y), "t = {}", p.y);
    }
    // transformed buffers start zeroed
    assert!(sim.transformed_cloud().iter().all(|p| *p == NVec2::zeros()));
    assert!(sim.transformed_path().iter().all(|p| *p == NVec2::zeros()));
}

#[test]
fn path_integration_starts_one_step_ahead() {
    let sim = test_sim();
    let path = sim.raw_path();
    assert_eq!(path.len(), 2048);

    assert_eq!(path[0], NVec2::zeros());
    // first segment slope sampled at t = 2 dt
    assert_relative_eq!(path[1].y, 0.2, epsilon = 1e-6);
    let slope = (0.2_f64 * 0.08).sin() * 0.75 * 0.1;
    assert_relative_eq!(path[1].x, slope as f32, epsilon = 1e-7);

    assert_relative_eq!(path[2047].y, 204.8, epsilon = 1e-3);
    // time increases along the curve
    assert!(path.windows(2).all(|w| w[1].y > w[0].y));
}

#[test]
fn invalid_parameters_rejected() {
    let mut p = test_params();
    p.amplitude = 1.0;
    assert!(matches!(Simulator::from_seed(p), Err(SimError::InvalidParameters(_))));

    let mut p = test_params();
    p.c = 0.0;
    assert!(Simulator::from_seed(p).is_err());

    let mut p = test_params();
    p.path_num = 0;
    assert!(Simulator::from_seed(p).is_err());
}

#[test]
fn overflowing_extents_rejected() {
    // each factor is finite but the seeded x range is not
    let mut p = test_params();
    p.space_max = 1.0e38;
    p.space_wide = 10.0;
    assert!(matches!(p.validate(), Err(SimError::InvalidParameters(_))));
    assert!(matches!(Simulator::from_seed(p), Err(SimError::InvalidParameters(_))));

    // the wrap period 2 * space_max overflows
    let mut p = test_params();
    p.space_max = 2.0e38;
    p.space_wide = 1.0e-38;
    assert!(matches!(Simulator::from_seed(p), Err(SimError::InvalidParameters(_))));
}

#[test]
fn injected_rng_matches_seeded_constructor() {
    let p = test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(p.seed);
    let a = Simulator::new(p.clone(), &mut rng).unwrap();
    let b = Simulator::from_seed(p).unwrap();
    assert_eq!(a.raw_cloud(), b.raw_cloud());
}

// ==================================================================================
// Step tests
// ==================================================================================

#[test]
fn first_step_scenario() {
    let mut sim = test_sim();
    sim.step(0.1).unwrap();

    assert_eq!(sim.time(), 0.1_f32 as f64);
    let v = (0.1_f32 * 0.08).sin() * 1.5 * 0.5;
    assert_relative_eq!(sim.velocity(), v, epsilon = 1e-8);
    assert_relative_eq!(sim.velocity(), 0.0059998, epsilon = 1e-6);

    // path vertex 0 started at the origin and moved against the frame
    let raw0 = sim.raw_path()[0];
    assert_relative_eq!(raw0.x, -v * 0.1, epsilon = 1e-9);
    assert_relative_eq!(raw0.y, -0.1, epsilon = 1e-9);

    let g = sim.gamma();
    let v = sim.velocity();
    let c = 1.5_f32;
    let lor0 = sim.transformed_path()[0];
    assert_relative_eq!(lor0.x, g * (raw0.x - v * raw0.y), epsilon = 1e-7);
    assert_relative_eq!(lor0.y, g * (raw0.y - v * raw0.x / (c * c)), epsilon = 1e-7);
    assert!(g >= 1.0);
}

#[test]
fn every_coordinate_round_trips_every_step() {
    let mut sim = test_sim();
    for _ in 0..60 {
        sim.step(0.25).unwrap();
        assert!(sim.gamma() >= 1.0);

        let boost = *sim.boost();
        for (raw, lor) in sim.raw_cloud().iter().zip(sim.transformed_cloud()) {
            assert_round_trip(&boost, raw, lor);
        }
        for (raw, lor) in sim.raw_path().iter().zip(sim.transformed_path()) {
            assert_round_trip(&boost, raw, lor);
        }
    }
}

#[test]
fn cloud_stays_wrapped() {
    let mut sim = test_sim();
    let dts = [0.016, 0.5, 1.3, -0.7, 3.9, -2.2, 0.0];
    for i in 0..400 {
        sim.step(dts[i % dts.len()]).unwrap();
        for p in sim.raw_cloud() {
            assert!(p.y >= -20.0 && p.y < 20.0, "t = {} after step {i}", p.y);
        }
    }
}

#[test]
fn wrap_boundary() {
    let mut sim = test_sim();
    sim.set_raw_cloud(vec![NVec2::new(0.0, 19.95); 1000]).unwrap();
    sim.step(0.1).unwrap();

    // the time slot wraps independently of the velocity drift
    let v = sim.velocity();
    for p in sim.raw_cloud() {
        assert_relative_eq!(p.y, 19.95 + 0.1 - 40.0, epsilon = 1e-4);
        assert_relative_eq!(p.x, v * 0.1, epsilon = 1e-9);
    }
}

#[test]
fn wrap_folds_both_edges() {
    assert_eq!(wrap(20.0, 20.0), -20.0);
    assert_relative_eq!(wrap(-20.5, 20.0), 19.5, epsilon = 1e-5);
    assert_relative_eq!(wrap(5.0, 20.0), 5.0);
    // jumps wider than the window
    let t = wrap(125.0, 20.0);
    assert!((-20.0..20.0).contains(&t));
    assert_relative_eq!(t, 5.0, epsilon = 1e-4);
}

#[test]
fn path_order_preserved() {
    let mut sim = test_sim();
    for _ in 0..10 {
        sim.step(0.3).unwrap();
    }
    let boost = *sim.boost();
    for (i, raw) in sim.raw_path().iter().enumerate() {
        assert_eq!(sim.transformed_path()[i], boost.apply(raw));
    }
    // rigid translation keeps the curve's time ordering
    assert!(sim.raw_path().windows(2).all(|w| w[1].y > w[0].y));
}

#[test]
fn runs_are_deterministic() {
    let dts = [0.016, 0.033, 0.1, 0.02, 0.5];
    let mut a = test_sim();
    let mut b = test_sim();
    for dt in dts.iter().cycle().take(100) {
        a.step(*dt).unwrap();
        b.step(*dt).unwrap();
    }
    assert_eq!(a.transformed_cloud(), b.transformed_cloud());
    assert_eq!(a.transformed_path(), b.transformed_path());

    let mut p = test_params();
    p.seed = 43;
    let c = Simulator::from_seed(p).unwrap();
    assert_ne!(test_sim().raw_cloud(), c.raw_cloud());
}

#[test]
fn negative_dt_runs_backward() {
    let mut sim = test_sim();
    let start = sim.raw_path().to_vec();

    sim.step(0.5).unwrap();
    sim.step(-0.5).unwrap();

    assert_relative_eq!(sim.time(), 0.0, epsilon = 1e-6);
    for (now, before) in sim.raw_path().iter().zip(&start) {
        assert_relative_eq!(now.y, before.y, epsilon = 1e-4);
        // each step drifts with the velocity at its own end time, so x only comes back approximately
        assert_relative_eq!(now.x, before.x, epsilon = 5e-2);
    }
}

#[test]
fn nan_dt_leaves_state_untouched() {
    let mut sim = test_sim();
    sim.step(0.1).unwrap();
    let before = sim.clone();

    assert!(matches!(sim.step(f32::NAN), Err(SimError::NonFiniteDelta(d)) if d.is_nan()));
    assert!(sim.step(f32::INFINITY).is_err());

    assert_eq!(sim.time(), before.time());
    assert_eq!(sim.steps(), 1);
    assert_eq!(sim.raw_cloud(), before.raw_cloud());
    assert_eq!(sim.transformed_cloud(), before.transformed_cloud());
    assert_eq!(sim.transformed_path(), before.transformed_path());
}

#[test]
fn overflow_reported_not_emitted() {
    let mut sim = test_sim();
    let mut raw = sim.raw_cloud().to_vec();
    raw[3] = NVec2::new(f32::MAX, 0.0);
    sim.set_raw_cloud(raw).unwrap();
    let before = sim.clone();

    let err = sim.step(1.0).unwrap_err();
    assert_eq!(err, SimError::NonFiniteOutput { index: 3 });
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.raw_cloud(), before.raw_cloud());
    assert_eq!(sim.raw_path(), before.raw_path());
}

#[test]
fn step_with_fixed_delta() {
    let mut sim = test_sim();
    let mut clock = FixedDelta(0.25);
    for _ in 0..4 {
        assert_eq!(sim.step_with(&mut clock).unwrap(), 0.25);
    }
    assert_eq!(sim.time(), 1.0);
    assert_eq!(sim.steps(), 4);
}

#[test]
fn step_with_wall_clock() {
    let mut sim = test_sim();
    let mut clock = WallClock::new();
    let dt = sim.step_with(&mut clock).unwrap();
    assert!(dt >= 0.0);
    assert_eq!(sim.time(), dt as f64);
}

#[test]
fn clock_keeps_resolution_on_long_runs() {
    let mut sim = test_sim();
    sim.step(300000.0).unwrap();
    let start = sim.time();

    let dt = 1.0_f32 / 60.0;
    for _ in 0..600 {
        sim.step(dt).unwrap();
    }

    assert_relative_eq!(sim.time() - start, 10.0, epsilon = 1e-4);
    assert_eq!(sim.velocity(), velocity_at(sim.time(), sim.params()));
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn partial_yaml_fills_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("simulation:\n  seed: 9\n  amplitude: 0.25\n").unwrap();
    assert_eq!(cfg.simulation.seed, 9);
    assert_eq!(cfg.simulation.amplitude, 0.25);
    assert_eq!(cfg.simulation.verts_num, 1000);
    assert_eq!(cfg.simulation.path_num, 2048);
    assert_eq!(cfg.viewer, ViewerConfig::default());

    assert_eq!(ScenarioConfig::from_yaml_str("").unwrap(), ScenarioConfig::default());
    assert!(ScenarioConfig::from_yaml_str("simulation:\n  speed: 3\n").is_err());
}

#[test]
fn headless_scenario_runs() {
    let cfg = ScenarioConfig::from_yaml_str("simulation:\n  verts_num: 50\nviewer:\n  fixed_dt: 0.5\n").unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    scenario.run_headless(20).unwrap();

    assert_eq!(scenario.simulator.steps(), 20);
    assert_relative_eq!(scenario.simulator.time(), 10.0, epsilon = 1e-5);
    assert_eq!(scenario.simulator.transformed_cloud().len(), 50);
}
