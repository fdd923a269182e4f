pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod lorentz;
pub mod clock;
pub mod scenario;
