use std::time::Instant;

use tracing::info;

use crate::simulation::engine::Simulator;
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;

/// Time `Simulator::step` for growing cloud sizes with the default path
pub fn bench_step() -> Result<(), SimError> {
    // Different cloud sizes to test
    let ns = [1000, 4000, 16000, 64000, 256000];
    let steps = 200; // steps timed per size
    let dt = 1.0 / 60.0;

    for n in ns {
        let parameters = Parameters {
            verts_num: n,
            seed: 42,
            ..Parameters::default()
        };
        let mut sim = Simulator::from_seed(parameters)?;

        // Warm up
        sim.step(dt)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            sim.step(dt)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        info!("N = {n:6}, path = {}, step = {:10.3} us", sim.transformed_path().len(), per_step * 1.0e6);
    }
    Ok(())
}
