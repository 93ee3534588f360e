// Simple end-to-end test: estimate the bounce count, simulate, and check the
// trajectory actually settles below the threshold after the reported bounce.

use bounce_core::{estimate_bounces, SimulationParams};
use bounce_sim::{simulate, SimOptions};

#[test]
fn estimate_then_simulate_settles_below_threshold() {
    let params = SimulationParams {
        initial_height: 10.0,
        minimum_height: 0.1,
        efficiency: 0.5,
    };
    params.validate().expect("valid parameters");

    let estimate = estimate_bounces(params);
    assert_eq!(estimate.floored, 6);

    let sim = simulate(params, estimate.floored, SimOptions::default());

    assert!(sim.series.len() > 100, "trajectory should have many samples");
    assert_eq!(sim.series.times.len(), sim.series.heights.len());

    // One bounce-time entry per detected bounce, in order.
    assert!(sim.bounce_times.len() >= 9);
    for w in sim.bounce_times.windows(2) {
        assert!(w[1] > w[0]);
    }

    // After the target bounce the apex stays below the threshold (within a
    // step's worth of integration slack).
    let target = sim.target_time;
    let slack = 0.05;
    let max_after = sim
        .series
        .times
        .iter()
        .zip(&sim.series.heights)
        .filter(|(&t, _)| t > target)
        .map(|(_, &h)| h)
        .fold(f64::MIN, f64::max);
    assert!(
        max_after <= params.minimum_height + slack,
        "apex after target bounce was {max_after}, above the {} threshold",
        params.minimum_height
    );
}
