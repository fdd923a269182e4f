//! The relativistic point simulator
//!
//! Owns the point cloud, the path curve and the simulation clock, and
//! advances all of them by one caller supplied `dt` per frame. Each step is
//! computed into scratch buffers and committed only after every check passes.

use rand::SeedableRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::simulation::clock::DeltaSource;
use crate::simulation::error::SimError;
use crate::simulation::lorentz::{velocity_at, Boost};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, PathCurve, PointCloud};

#[derive(Debug, Clone)]
pub struct Simulator {
    params: Parameters,
    t: f64, // elapsed simulated time
    boost: Boost, // boost used for the current transformed arrays
    steps: u64, // committed steps
    cloud: PointCloud,
    path: PathCurve,
    // scratch buffers for the next step, same lengths as above
    next_cloud: PointCloud,
    next_path: PathCurve,
}

impl Simulator {
    /// Seed the cloud from `rng` and integrate the path curve
    pub fn new<R: Rng + ?Sized>(params: Parameters, rng: &mut R) -> Result<Self, SimError> {
        params.validate()?;

        let cloud = PointCloud::seed(&params, rng);
        let path = PathCurve::integrate(&params);

        debug!(
            verts = cloud.len(),
            path = path.len(),
            c = params.c,
            max_speed = params.max_speed(),
            "simulator initialized"
        );

        Ok(Self {
            t: 0.0,
            boost: Boost::identity(params.c),
            steps: 0,
            next_cloud: cloud.clone(),
            next_path: path.clone(),
            cloud,
            path,
            params,
        })
    }

    /// Build with a ChaCha8 generator seeded from `params.seed`
    pub fn from_seed(params: Parameters) -> Result<Self, SimError> {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        Self::new(params, &mut rng)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Negative and zero `dt` are valid. On error nothing is modified.
    pub fn step(&mut self, dt: f32) -> Result<(), SimError> {
        if !dt.is_finite() {
            return Err(SimError::NonFiniteDelta(dt));
        }

        let t = self.t + dt as f64;
        let v = velocity_at(t, &self.params);
        let boost = Boost::new(v, self.params.c)?;

        // path moves against the frame, cloud moves with it
        self.path.translate_into(v, dt, &mut self.next_path);
        self.cloud.drift_into(v, dt, self.params.space_max, &mut self.next_cloud);

        // path indices are reported after the cloud's
        let offset = self.next_cloud.len();
        boost.apply_into(&self.next_cloud.raw, &mut self.next_cloud.lorentz)?;
        boost
            .apply_into(&self.next_path.raw, &mut self.next_path.lorentz)
            .map_err(|e| match e {
                SimError::NonFiniteOutput { index } => SimError::NonFiniteOutput { index: offset + index },
                other => other,
            })?;

        std::mem::swap(&mut self.cloud, &mut self.next_cloud);
        std::mem::swap(&mut self.path, &mut self.next_path);
        self.t = t;
        self.boost = boost;
        self.steps += 1;

        trace!(t = self.t, v, gamma = boost.gamma, "step");
        Ok(())
    }

    /// Pull the next delta from `clock` and step with it
    pub fn step_with<D: DeltaSource + ?Sized>(&mut self, clock: &mut D) -> Result<f32, SimError> {
        let dt = clock.next_delta();
        self.step(dt)?;
        Ok(dt)
    }

    /// Observer frame coordinates of the cloud, one per raw point
    pub fn transformed_cloud(&self) -> &[NVec2] {
        &self.cloud.lorentz
    }

    /// Observer frame path, in line strip order
    pub fn transformed_path(&self) -> &[NVec2] {
        &self.path.lorentz
    }

    pub fn raw_cloud(&self) -> &[NVec2] {
        &self.cloud.raw
    }

    pub fn raw_path(&self) -> &[NVec2] {
        &self.path.raw
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn velocity(&self) -> f32 {
        self.boost.v
    }

    pub fn gamma(&self) -> f32 {
        self.boost.gamma
    }

    pub fn boost(&self) -> &Boost {
        &self.boost
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Seeding hook: replace the raw cloud with caller placed points.
    /// The length must match the configured cloud size; the transformed
    /// buffer is recomputed with the current boost
    pub fn set_raw_cloud(&mut self, raw: Vec<NVec2>) -> Result<(), SimError> {
        if raw.len() != self.cloud.len() {
            return Err(SimError::InvalidParameters(format!(
                "expected {} cloud points, got {}",
                self.cloud.len(),
                raw.len()
            )));
        }
        let mut cloud = PointCloud::from_raw(raw);
        self.boost.apply_into(&cloud.raw, &mut cloud.lorentz)?;
        self.cloud = cloud;
        Ok(())
    }
}
