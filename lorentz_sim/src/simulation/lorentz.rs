//! Velocity law and the 1+1D Lorentz boost
//!
//! The frame velocity follows `v(t) = sin(t w) c k`. A `Boost` is built once
//! per step from that velocity and applied to every coordinate:
//!
//! ```text
//! x' = G (x - v t)
//! t' = G (t - v x / c^2)
//! G  = 1 / sqrt(1 - (v / c)^2)
//! ```

use nalgebra::Matrix2;

use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

/// Instantaneous frame velocity at simulated time `t`.
/// Evaluated in f64 so long running clocks keep their resolution
pub fn velocity_at(t: f64, params: &Parameters) -> f32 {
    let v = (t * params.omega as f64).sin() * params.c as f64 * params.amplitude as f64;
    v as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boost {
    pub v: f32, // frame velocity
    pub c: f32, // speed of light
    pub gamma: f32, // lorentz factor
}

impl Boost {
    /// Build the boost for velocity `v`, refusing `|v| >= c`
    pub fn new(v: f32, c: f32) -> Result<Self, SimError> {
        if !v.is_finite() || !(v.abs() < c) {
            return Err(SimError::VelocityBound { v, c });
        }
        let b = v / c;
        let gamma = 1.0 / (1.0 - b * b).sqrt();
        if !gamma.is_finite() {
            return Err(SimError::VelocityBound { v, c });
        }
        Ok(Self { v, c, gamma })
    }

    /// Identity boost, used before the first step
    pub fn identity(c: f32) -> Self {
        Self { v: 0.0, c, gamma: 1.0 }
    }

    /// Boost by `-v`, undoing `self`
    pub fn inverse(&self) -> Self {
        Self { v: -self.v, ..*self }
    }

    /// Transform a single (x, t) coordinate
    pub fn apply(&self, p: &NVec2) -> NVec2 {
        let (x, t) = (p.x, p.y);
        let g = self.gamma;
        let v = self.v;
        NVec2::new(g * (x - v * t), g * (t - (v * x) / (self.c * self.c)))
    }

    /// The boost as a linear map acting on column vectors (x, t)
    pub fn matrix(&self) -> Matrix2<f32> {
        let g = self.gamma;
        let v = self.v;
        Matrix2::new(
            g, -g * v,
            -g * v / (self.c * self.c), g,
        )
    }

    /// Transform every coordinate of `raw` into `out`.
    /// Fails on the first non-finite result
    pub fn apply_into(&self, raw: &[NVec2], out: &mut [NVec2]) -> Result<(), SimError> {
        for (index, (src, dst)) in raw.iter().zip(out.iter_mut()).enumerate() {
            let p = self.apply(src);
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(SimError::NonFiniteOutput { index });
            }
            *dst = p;
        }
        Ok(())
    }
}

/// Pure transform of a raw coordinate into the frame moving at `v`
pub fn lorentz_transform(raw: &NVec2, v: f32, c: f32) -> Result<NVec2, SimError> {
    Ok(Boost::new(v, c)?.apply(raw))
}
