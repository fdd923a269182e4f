pub mod lorentz_vis2d;
