//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario file has two optional sections:
//!
//! - [`SimulationConfig`] – parameters of the point field and velocity law
//! - [`ViewerConfig`]     – how the 2D viewer and headless runs drive it
//!
//! Every field falls back to its default when missing, so an empty file is
//! a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! simulation:
//!   seed: 7                 # cloud seed
//!   verts_num: 1000         # number of cloud points
//!   space_max: 20.0         # time window half width
//!   space_wide: 10.0        # x spread multiplier
//!   c: 1.5                  # speed of light
//!   path_num: 2048          # path vertices
//!   path_dt: 0.1            # path integration step
//!   omega: 0.08             # velocity angular rate
//!   amplitude: 0.5          # peak speed as a fraction of c
//!
//! viewer:
//!   scale: 20.0             # pixels per world unit
//!   point_radius: 1.0       # cloud point radius in pixels
//!   max_frame_dt: 0.25      # frame deltas are clamped to this
//!   fixed_dt: 0.016         # step size for headless runs
//! ```

use serde::Deserialize;

use crate::simulation::params::{self, Parameters};

/// Simulation parameters as they appear in the scenario file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub seed: u64, // deterministic seed to make runs reproducible
    pub verts_num: usize, // points in the cloud
    pub space_max: f32, // half width of the wrapped time window
    pub space_wide: f32, // x spread multiplier
    pub c: f32, // speed of light
    pub path_num: usize, // path curve vertices
    pub path_dt: f32, // path integration step
    pub omega: f32, // angular rate of the velocity law
    pub amplitude: f32, // peak speed as a fraction of c, must stay below 1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            verts_num: params::VERTS_NUM,
            space_max: params::SPACE_MAX,
            space_wide: params::SPACE_WIDE,
            c: params::C,
            path_num: params::PATH_NUM,
            path_dt: params::DT,
            omega: params::OMEGA,
            amplitude: params::AMPLITUDE,
        }
    }
}

impl From<&SimulationConfig> for Parameters {
    fn from(cfg: &SimulationConfig) -> Self {
        Parameters {
            verts_num: cfg.verts_num,
            space_max: cfg.space_max,
            space_wide: cfg.space_wide,
            c: cfg.c,
            path_num: cfg.path_num,
            path_dt: cfg.path_dt,
            omega: cfg.omega,
            amplitude: cfg.amplitude,
            seed: cfg.seed,
        }
    }
}

/// Viewer and runner settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub scale: f32, // world units -> pixels
    pub point_radius: f32, // drawn radius of a cloud point
    pub max_frame_dt: f32, // upper clamp on a frame's dt
    pub fixed_dt: f32, // headless step size
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 20.0,
            point_radius: 1.0,
            max_frame_dt: 0.25,
            fixed_dt: 1.0 / 60.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub viewer: ViewerConfig,
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, treat it as all defaults
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}
