//! Density on the x-z plane (y = 0) rendered as a red/blue heatmap.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use rayon::prelude::*;
use tracing::debug;

use crate::color::heatmap_color;
use crate::error::{OrbitalError, OrbitalResult};
use crate::physics::{cartesian_to_spherical, probability_density, DensityMode, QuantumState};
use crate::sampler::DEFAULT_MAX_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceConfig {
    pub width: u32,
    pub height: u32,
    /// Half-width of the square window, in Bohr radii.
    pub extent: f32,
    pub density_mode: DensityMode,
}

impl Default for SliceConfig {
    fn default() -> Self {
        SliceConfig {
            width: 256,
            height: 256,
            extent: DEFAULT_MAX_RADIUS,
            density_mode: DensityMode::Absolute,
        }
    }
}

impl SliceConfig {
    /// Half-width actually plotted; non-positive or non-finite values fall
    /// back to the default window.
    pub fn effective_extent(&self) -> f32 {
        if self.extent.is_finite() && self.extent > 0.0 {
            self.extent
        } else {
            DEFAULT_MAX_RADIUS
        }
    }
}

/// Row-major grid of densities normalised by their maximum. Row 0 is the
/// top edge (z = +extent). Non-finite samples count as 0.
pub fn density_slice(state: QuantumState, config: &SliceConfig) -> Vec<f32> {
    let width = config.width as usize;
    let height = config.height as usize;
    let mut values = vec![0.0_f32; width * height];
    if values.is_empty() {
        return values;
    }

    let extent = config.effective_extent();
    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            let z = extent - (row as f32 + 0.5) / height as f32 * 2.0 * extent;
            for (col, value) in out.iter_mut().enumerate() {
                let x = -extent + (col as f32 + 0.5) / width as f32 * 2.0 * extent;
                let (r, theta, phi) = cartesian_to_spherical(x, 0.0, z);
                let density = probability_density(state, r, theta, phi, config.density_mode);
                *value = if density.is_finite() { density } else { 0.0 };
            }
        });

    let max = values.iter().copied().fold(0.0_f32, f32::max);
    debug!(orbital = %state, max, "density slice computed");
    if max > 0.0 {
        for value in &mut values {
            *value /= max;
        }
    }
    values
}

/// Paint normalised values into an image. Missing values render as 0.
pub fn render(values: &[f32], width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let idx = y as usize * width as usize + x as usize;
        Rgb(heatmap_color(values.get(idx).copied().unwrap_or(0.0)))
    })
}

pub fn write_png(image: &RgbImage, path: &Path) -> OrbitalResult<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(OrbitalError::from)
}
