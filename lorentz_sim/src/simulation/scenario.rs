//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! the viewer and the headless runner work on:
//! - viewer settings (`ViewerConfig`)
//! - the seeded simulator at t = 0

use bevy::prelude::Resource;
use tracing::info;

use crate::configuration::config::{ScenarioConfig, ViewerConfig};
use crate::simulation::clock::FixedDelta;
use crate::simulation::engine::Simulator;
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;

/// Bevy resource holding the simulator and how to drive and draw it
///
/// Inserted into the Bevy app by the viewer; the step system mutates
/// `simulator` and the draw system only reads it
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub viewer: ViewerConfig,
    pub simulator: Simulator,
    pub halted: bool, // set once a step fails, freezes the last good frame
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let simulator = Simulator::from_seed(Parameters::from(&cfg.simulation))?;

        let params = simulator.params();
        info!(
            seed = params.seed,
            verts = params.verts_num,
            path = params.path_num,
            "scenario built"
        );

        Ok(Self {
            viewer: cfg.viewer,
            simulator,
            halted: false,
        })
    }

    /// Step `steps` times at the configured fixed dt, without a window
    pub fn run_headless(&mut self, steps: u64) -> Result<(), SimError> {
        let mut clock = FixedDelta(self.viewer.fixed_dt);
        for _ in 0..steps {
            self.simulator.step_with(&mut clock)?;
        }
        Ok(())
    }
}
