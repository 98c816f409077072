//! Point sampling for the orbital cloud.
//!
//! Coordinates are drawn uniformly in (r, theta, phi), not weighted by the
//! density, so the cloud's shape comes from colour and opacity rather than
//! from where points land.

use std::f32::consts::PI;
use std::io::Write;

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::color::{map_color, ColorScheme, Rgba};
use crate::error::OrbitalResult;
use crate::physics::{probability_density, spherical_to_cartesian, DensityMode, QuantumState};

pub const DEFAULT_POINT_COUNT: usize = 300_000;
pub const DEFAULT_MAX_RADIUS: f32 = 10.0;
/// Raw densities are small; this brings them into a usable [0, 1] range.
pub const INTENSITY_SCALE: f32 = 100.0;
/// Points per independent random stream in the parallel sampler.
const PAR_CHUNK: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleConfig {
    pub point_count: usize,
    pub color_scheme: ColorScheme,
    /// Outer radius cutoff, independent of n.
    pub max_radius: f32,
    pub density_mode: DensityMode,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            point_count: DEFAULT_POINT_COUNT,
            color_scheme: ColorScheme::RedBlue,
            max_radius: DEFAULT_MAX_RADIUS,
            density_mode: DensityMode::Absolute,
        }
    }
}

impl SampleConfig {
    pub fn new(point_count: usize, color_scheme: ColorScheme) -> Self {
        SampleConfig {
            point_count,
            color_scheme,
            ..SampleConfig::default()
        }
    }

    /// Radius actually used for drawing; non-positive or non-finite values
    /// fall back to the default cutoff.
    pub fn effective_radius(&self) -> f32 {
        if self.max_radius.is_finite() && self.max_radius > 0.0 {
            self.max_radius
        } else {
            DEFAULT_MAX_RADIUS
        }
    }
}

/// One renderable point. Laid out for direct upload as a vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize)]
pub struct Point3D {
    pub position: [f32; 3],
    pub color: Rgba,
}

/// Output of one sampling pass. Immutable once returned.
#[derive(Debug, Clone)]
pub struct PointCloud {
    state: QuantumState,
    config: SampleConfig,
    points: Vec<Point3D>,
    /// Indices (ascending) of points whose density was not finite.
    degenerate: Vec<usize>,
}

#[derive(Serialize)]
struct CloudDocument<'a> {
    n: u32,
    l: u32,
    m: i32,
    label: String,
    scheme: ColorScheme,
    density: DensityMode,
    max_radius: f32,
    count: usize,
    degenerate: &'a [usize],
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl PointCloud {
    pub fn state(&self) -> QuantumState {
        self.state
    }

    pub fn config(&self) -> &SampleConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn degenerate_count(&self) -> usize {
        self.degenerate.len()
    }

    pub fn degenerate_indices(&self) -> &[usize] {
        &self.degenerate
    }

    pub fn is_degenerate(&self, index: usize) -> bool {
        self.degenerate.binary_search(&index).is_ok()
    }

    /// Points with the degenerate ones dropped, order preserved.
    pub fn without_degenerate(&self) -> Vec<Point3D> {
        self.points
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_degenerate(*i))
            .map(|(_, p)| *p)
            .collect()
    }

    /// Flat x, y, z buffer of length 3N.
    pub fn positions(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.position).collect()
    }

    /// Flat r, g, b, a buffer of length 4N.
    pub fn colors(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.color.to_array()).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn to_json_writer<W: Write>(&self, writer: W) -> OrbitalResult<()> {
        let doc = CloudDocument {
            n: self.state.n(),
            l: self.state.l(),
            m: self.state.m(),
            label: self.state.to_string(),
            scheme: self.config.color_scheme,
            density: self.config.density_mode,
            max_radius: self.config.effective_radius(),
            count: self.points.len(),
            degenerate: &self.degenerate,
            positions: self.positions(),
            colors: self.colors(),
        };
        serde_json::to_writer(writer, &doc)?;
        Ok(())
    }
}

/// Validate (n, l, m) and sample. Invalid numbers are rejected before any
/// random draw happens.
pub fn sample_orbital<R: Rng + ?Sized>(
    n: u32,
    l: u32,
    m: i32,
    config: &SampleConfig,
    rng: &mut R,
) -> OrbitalResult<PointCloud> {
    let state = QuantumState::new(n, l, m)?;
    Ok(sample_point_cloud(state, config, rng))
}

/// Sample `config.point_count` points from a single random stream, in draw order.
pub fn sample_point_cloud<R: Rng + ?Sized>(
    state: QuantumState,
    config: &SampleConfig,
    rng: &mut R,
) -> PointCloud {
    debug!(orbital = %state, count = config.point_count, "sampling orbital cloud");
    let mut points = Vec::with_capacity(config.point_count);
    let mut degenerate = Vec::new();
    fill_points(state, config, 0, config.point_count, rng, &mut points, &mut degenerate);
    finish(state, *config, points, degenerate)
}

/// Parallel variant. Chunk `i` draws from its own `StdRng` derived from
/// `seed` and `i`, so the result for a seed does not depend on thread count.
pub fn sample_point_cloud_par(state: QuantumState, config: &SampleConfig, seed: u64) -> PointCloud {
    let count = config.point_count;
    debug!(orbital = %state, count, seed, "sampling orbital cloud in parallel");

    let chunks: Vec<(Vec<Point3D>, Vec<usize>)> = (0..count.div_ceil(PAR_CHUNK))
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PAR_CHUNK;
            let len = PAR_CHUNK.min(count - start);
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));
            let mut points = Vec::with_capacity(len);
            let mut degenerate = Vec::new();
            fill_points(state, config, start, len, &mut rng, &mut points, &mut degenerate);
            (points, degenerate)
        })
        .collect();

    let mut points = Vec::with_capacity(count);
    let mut degenerate = Vec::new();
    for (chunk_points, chunk_degenerate) in chunks {
        points.extend(chunk_points);
        degenerate.extend(chunk_degenerate);
    }
    finish(state, *config, points, degenerate)
}

fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed ^ (chunk as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn finish(
    state: QuantumState,
    config: SampleConfig,
    points: Vec<Point3D>,
    degenerate: Vec<usize>,
) -> PointCloud {
    if !degenerate.is_empty() {
        warn!(
            orbital = %state,
            degenerate = degenerate.len(),
            "non-finite density at some points; marked degenerate"
        );
    }
    debug!(orbital = %state, points = points.len(), "sampling finished");
    PointCloud {
        state,
        config,
        points,
        degenerate,
    }
}

fn fill_points<R: Rng + ?Sized>(
    state: QuantumState,
    config: &SampleConfig,
    offset: usize,
    len: usize,
    rng: &mut R,
    points: &mut Vec<Point3D>,
    degenerate: &mut Vec<usize>,
) {
    let max_radius = config.effective_radius();
    for i in 0..len {
        let r = rng.gen_range(0.0..max_radius);
        let theta = rng.gen_range(0.0..PI);
        let phi = rng.gen_range(0.0..2.0 * PI);

        let density = probability_density(state, r, theta, phi, config.density_mode);
        let color = shade(density, config.color_scheme).unwrap_or_else(|| {
            degenerate.push(offset + i);
            Rgba::DEGENERATE
        });

        points.push(Point3D {
            position: spherical_to_cartesian(r, theta, phi),
            color,
        });
    }
}

/// Colour for a density value, or `None` when the density is not finite.
fn shade(density: f32, scheme: ColorScheme) -> Option<Rgba> {
    if !density.is_finite() {
        return None;
    }
    let intensity = (density * INTENSITY_SCALE).min(1.0);
    Some(map_color(intensity, scheme))
}
