//! Core state types for the point field simulation.
//!
//! Defines the two point sets the simulator owns:
//! - `PointCloud` random points wrapped in the time window
//! - `PathCurve`  the precomputed polyline of the moving reference object
//!
//! Both keep the raw lab-frame coordinates and a parallel buffer of
//! observer-frame coordinates of the same length. A coordinate is an
//! `NVec2` with component 0 = x and component 1 = t.

use nalgebra::Vector2;
use rand::Rng;

use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f32>;

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub raw: Vec<NVec2>, // lab frame (x, t)
    pub lorentz: Vec<NVec2>, // observer frame (x', t')
}

impl PointCloud {
    /// Draw `verts_num` points, x then t for each, from `rng`
    pub fn seed<R: Rng + ?Sized>(params: &Parameters, rng: &mut R) -> Self {
        let x_max = params.space_max * params.space_wide;
        let t_max = params.space_max;

        let raw: Vec<NVec2> = (0..params.verts_num)
            .map(|_| {
                let x = rng.gen_range(-x_max..x_max);
                let t = rng.gen_range(-t_max..t_max);
                NVec2::new(x, t)
            })
            .collect();

        Self::from_raw(raw)
    }

    /// Wrap an existing set of raw coordinates, transformed buffer zeroed
    pub fn from_raw(raw: Vec<NVec2>) -> Self {
        let lorentz = vec![NVec2::zeros(); raw.len()];
        Self { raw, lorentz }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Write the drifted and wrapped raw coordinates into `out.raw`.
    /// Every point moves with the frame: x += v dt, t += dt
    pub fn drift_into(&self, v: f32, dt: f32, space_max: f32, out: &mut PointCloud) {
        for (src, dst) in self.raw.iter().zip(out.raw.iter_mut()) {
            let x = src.x + v * dt;
            let t = wrap(src.y + dt, space_max);
            *dst = NVec2::new(x, t);
        }
    }
}

/// Fold `t` back into `[-space_max, space_max)`.
///
/// A single `2 * space_max` correction covers any `|dt| < 2 * space_max`;
/// larger jumps fall back to a euclidean remainder.
pub fn wrap(t: f32, space_max: f32) -> f32 {
    let period = 2.0 * space_max;
    let mut t = t;
    if t >= space_max {
        t -= period;
    } else if t < -space_max {
        t += period;
    }
    if t >= space_max || t < -space_max {
        t = (t + space_max).rem_euclid(period) - space_max;
        // rem_euclid can round up to exactly `period`
        if t >= space_max {
            t -= period;
        }
    }
    t
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathCurve {
    pub raw: Vec<NVec2>, // lab frame polyline, index order is connectivity
    pub lorentz: Vec<NVec2>, // observer frame polyline
}

impl PathCurve {
    /// Integrate dx/dt = sin(t w) c k with a fixed step `path_dt`.
    ///
    /// Vertex 0 sits at the origin. The time accumulator starts one step
    /// ahead, so vertex i carries t = (i + 1) dt and the first segment's
    /// slope is sampled at t = 2 dt.
    pub fn integrate(params: &Parameters) -> Self {
        let dt = params.path_dt as f64;
        let omega = params.omega as f64;
        let speed = params.max_speed() as f64;

        let mut raw = vec![NVec2::zeros(); params.path_num];
        let mut x = 0.0_f64;
        let mut t = dt;
        for p in raw.iter_mut().skip(1) {
            t += dt;
            x += (t * omega).sin() * speed * dt;
            *p = NVec2::new(x as f32, t as f32);
        }

        let lorentz = vec![NVec2::zeros(); raw.len()];
        Self { raw, lorentz }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Write the rigidly translated path into `out.raw`.
    /// The curve moves against the frame: x -= v dt, t -= dt
    pub fn translate_into(&self, v: f32, dt: f32, out: &mut PathCurve) {
        for (src, dst) in self.raw.iter().zip(out.raw.iter_mut()) {
            *dst = NVec2::new(src.x - v * dt, src.y - dt);
        }
    }
}
