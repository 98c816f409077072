//! Hydrogen orbital probability clouds.
//!
//! Evaluates the hydrogen wavefunction for quantum numbers (n, l, m) and
//! turns it into a coloured 3D point sample ready for a point renderer.

pub mod color;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod physics;
pub mod sampler;
pub mod special;

pub use color::{map_color, ColorScheme, Rgba};
pub use config::{ResolvedRequest, SampleRequest};
pub use error::{OrbitalError, OrbitalResult};
pub use physics::{
    probability_amplitude, probability_density, radial_wavefunction, real_spherical_harmonic,
    DensityMode, QuantumState,
};
pub use sampler::{
    sample_orbital, sample_point_cloud, sample_point_cloud_par, Point3D, PointCloud, SampleConfig,
};
