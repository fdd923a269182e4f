pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{NVec2, PointCloud, PathCurve};
pub use simulation::params::Parameters;
pub use simulation::engine::Simulator;
pub use simulation::error::SimError;
pub use simulation::lorentz::{Boost, lorentz_transform, velocity_at};
pub use simulation::clock::{DeltaSource, FixedDelta, WallClock};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, SimulationConfig, ViewerConfig};

pub use visualization::lorentz_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;
