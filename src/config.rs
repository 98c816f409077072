//! Sampling requests as a UI or a JSON file would describe them, resolved
//! into validated quantum numbers plus a `SampleConfig`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorScheme;
use crate::error::{OrbitalError, OrbitalResult};
use crate::physics::{DensityMode, QuantumState};
use crate::sampler::{SampleConfig, DEFAULT_MAX_RADIUS, DEFAULT_POINT_COUNT};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SampleRequest {
    pub n: Option<u32>,
    pub l: Option<u32>,
    pub m: Option<i32>,
    #[serde(alias = "points")]
    pub count: Option<i64>,
    #[serde(alias = "colorSet")]
    pub scheme: Option<String>,
    pub max_radius: Option<f32>,
    pub density: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRequest {
    pub state: QuantumState,
    pub config: SampleConfig,
    pub seed: Option<u64>,
}

impl SampleRequest {
    pub fn from_path(path: &Path) -> OrbitalResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| OrbitalError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fields set in `other` win.
    pub fn overlay(self, other: SampleRequest) -> Self {
        SampleRequest {
            n: other.n.or(self.n),
            l: other.l.or(self.l),
            m: other.m.or(self.m),
            count: other.count.or(self.count),
            scheme: other.scheme.or(self.scheme),
            max_radius: other.max_radius.or(self.max_radius),
            density: other.density.or(self.density),
            seed: other.seed.or(self.seed),
        }
    }

    /// Apply defaults and validate. Bad quantum numbers are an error; a
    /// negative count or an unknown scheme are not.
    pub fn resolve(&self) -> OrbitalResult<ResolvedRequest> {
        let state = QuantumState::new(
            self.n.unwrap_or(1),
            self.l.unwrap_or(0),
            self.m.unwrap_or(0),
        )?;

        let point_count = match self.count {
            Some(count) => usize::try_from(count).unwrap_or(0),
            None => DEFAULT_POINT_COUNT,
        };

        let color_scheme = ColorScheme::from_name(self.scheme.as_deref());
        if let Some(name) = self.scheme.as_deref() {
            if name.parse::<ColorScheme>().is_err() {
                debug!(scheme = name, "unknown color scheme, using redBlue");
            }
        }

        Ok(ResolvedRequest {
            state,
            config: SampleConfig {
                point_count,
                color_scheme,
                max_radius: self.max_radius.unwrap_or(DEFAULT_MAX_RADIUS),
                density_mode: DensityMode::from_name(self.density.as_deref()),
            },
            seed: self.seed,
        })
    }
}
