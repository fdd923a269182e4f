//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the construction-time settings:
//! - point cloud size and the spatial window it wraps in,
//! - speed of light `c`,
//! - path curve length and integration step,
//! - angular rate and amplitude of the velocity law,
//! - random seed for the point cloud
//!
//! The defaults are exported as constants so the core can be used without
//! any configuration file.

use crate::simulation::error::SimError;

pub const VERTS_NUM: usize = 1000; // number of points in the cloud
pub const SPACE_MAX: f32 = 20.0; // half width of the wrapped time window
pub const SPACE_WIDE: f32 = 10.0; // x range multiplier, x in +-SPACE_MAX*SPACE_WIDE
pub const C: f32 = 1.5; // speed of light

pub const PATH_NUM: usize = 2048; // number of path curve vertices
pub const DT: f32 = 0.1; // path integration step
pub const OMEGA: f32 = 0.08; // angular rate of the velocity law
pub const AMPLITUDE: f32 = 0.5; // peak speed as a fraction of c

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub verts_num: usize, // cloud size
    pub space_max: f32, // wrap window half width
    pub space_wide: f32, // x spread multiplier
    pub c: f32, // speed of light
    pub path_num: usize, // path length
    pub path_dt: f32, // path integration step
    pub omega: f32, // velocity angular rate
    pub amplitude: f32, // velocity amplitude factor k
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            verts_num: VERTS_NUM,
            space_max: SPACE_MAX,
            space_wide: SPACE_WIDE,
            c: C,
            path_num: PATH_NUM,
            path_dt: DT,
            omega: OMEGA,
            amplitude: AMPLITUDE,
            seed: 0,
        }
    }
}

impl Parameters {
    /// Peak speed reached by the velocity law, `c * amplitude`
    pub fn max_speed(&self) -> f32 {
        self.c * self.amplitude
    }

    /// Reject parameter sets that could drive `|v|` to `c` or produce
    /// non-finite coordinates
    pub fn validate(&self) -> Result<(), SimError> {
        fn positive(name: &str, value: f32) -> Result<(), SimError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidParameters(format!("{name} must be positive and finite, got {value}")))
            }
        }

        positive("c", self.c)?;
        positive("space_max", self.space_max)?;
        positive("space_wide", self.space_wide)?;
        positive("path_dt", self.path_dt)?;
        // derived extents used for seeding and wrapping
        positive("2 * space_max * space_wide", 2.0 * self.space_max * self.space_wide)?;
        positive("2 * space_max", 2.0 * self.space_max)?;

        if self.path_num == 0 {
            return Err(SimError::InvalidParameters("path_num must be at least 1".into()));
        }
        if !self.omega.is_finite() {
            return Err(SimError::InvalidParameters(format!("omega must be finite, got {}", self.omega)));
        }
        // |v| <= c * amplitude, so amplitude < 1 keeps the boost real
        if !(self.amplitude >= 0.0 && self.amplitude < 1.0) {
            return Err(SimError::InvalidParameters(format!(
                "amplitude must lie in [0, 1), got {}",
                self.amplitude
            )));
        }
        Ok(())
    }
}
