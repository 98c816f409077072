//! Hydrogen atom wavefunction: radial part, real spherical harmonics and the
//! scalar density used to shade sampled points. Distances are in Bohr radii.

use std::f32::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::error::{OrbitalError, OrbitalResult};
use crate::special::{associated_laguerre, associated_legendre, factorial_f64};

/// Upper bound on n. Keeps `n + l` and `2l + 1` in range and bounds the
/// per-point polynomial work.
pub const MAX_PRINCIPAL: u32 = 1024;

const SUBSHELL_LETTERS: &[u8] = b"spdfghiklmnoqrtuvwxyz";

/// Validated quantum numbers (n, l, m).
/// n: principal (1, 2, 3, ...)
/// l: azimuthal (0 to n-1)
/// m: magnetic (-l to l)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantumState {
    n: u32,
    l: u32,
    m: i32,
}

impl QuantumState {
    pub fn new(n: u32, l: u32, m: i32) -> OrbitalResult<Self> {
        if n == 0 {
            return Err(OrbitalError::InvalidPrincipal { n });
        }
        if n > MAX_PRINCIPAL {
            return Err(OrbitalError::PrincipalTooLarge {
                n,
                max: MAX_PRINCIPAL,
            });
        }
        if l >= n {
            return Err(OrbitalError::InvalidAngular { n, l });
        }
        if m.unsigned_abs() > l {
            return Err(OrbitalError::InvalidMagnetic { l, m });
        }
        Ok(QuantumState { n, l, m })
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }
}

impl fmt::Display for QuantumState {
    /// Spectroscopic label, e.g. `2p (m=-1)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = SUBSHELL_LETTERS
            .get(self.l as usize)
            .map(|&b| b as char)
            .unwrap_or('?');
        write!(f, "{}{} (m={})", self.n, letter, self.m)
    }
}

/// How the amplitude R·Y is reduced to a non-negative density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityMode {
    /// |R·Y|, what the point colours have always been scaled from.
    #[default]
    Absolute,
    /// (R·Y)², the physical probability density.
    Squared,
}

impl DensityMode {
    pub fn from_name(value: Option<&str>) -> Self {
        match value.unwrap_or("absolute").to_lowercase().as_str() {
            "squared" | "square" => DensityMode::Squared,
            _ => DensityMode::Absolute,
        }
    }

    pub fn apply(self, amplitude: f32) -> f32 {
        match self {
            DensityMode::Absolute => amplitude.abs(),
            DensityMode::Squared => amplitude * amplitude,
        }
    }
}

/// Radial wavefunction R_nl(r). Requires `n > l`.
///
/// rho = 2r/n
/// norm = sqrt((2/n)^3 (n-l-1)! / (2n (n+l)!))
/// R = norm e^(-rho/2) rho^l L_{n-l-1}^{2l+1}(rho)
pub fn radial_wavefunction(n: u32, l: u32, r: f32) -> f32 {
    debug_assert!(n > l, "radial wavefunction needs n > l");
    let n_f = n as f32;
    let rho = 2.0 * r / n_f;

    let ratio = factorial_f64(n - l - 1) / (2.0 * n as f64 * factorial_f64(n + l));
    let norm = ((2.0 / n as f64).powi(3) * ratio).sqrt() as f32;

    let poly = associated_laguerre(n - l - 1, 2 * l + 1, rho);

    norm * (-rho / 2.0).exp() * rho.powi(l as i32) * poly
}

/// Real spherical harmonic used for chemistry-style orbitals.
/// m > 0 -> cos(m phi), m < 0 -> sin(-m phi), m = 0 -> no azimuthal factor.
///
/// The normalisation keeps the (l+m)!/(l-m)! ratio as the point colouring
/// has always used it.
pub fn real_spherical_harmonic(l: u32, m: i32, theta: f32, phi: f32) -> f32 {
    if m.unsigned_abs() > l {
        return 0.0;
    }
    let l_i = l as i32;
    let ratio = factorial_f64((l_i + m) as u32) / factorial_f64((l_i - m) as u32);
    let k = ((2.0 * l as f64 + 1.0) / (4.0 * std::f64::consts::PI) * ratio).sqrt() as f32;
    let p = associated_legendre(l, m, theta.cos());

    match m {
        m if m > 0 => k * p * (m as f32 * phi).cos(),
        m if m < 0 => k * p * (-m as f32 * phi).sin(),
        _ => k * p,
    }
}

/// Signed amplitude R(r) Y(theta, phi).
pub fn probability_amplitude(state: QuantumState, r: f32, theta: f32, phi: f32) -> f32 {
    radial_wavefunction(state.n, state.l, r) * real_spherical_harmonic(state.l, state.m, theta, phi)
}

/// Non-negative density at a point in spherical coordinates.
pub fn probability_density(
    state: QuantumState,
    r: f32,
    theta: f32,
    phi: f32,
    mode: DensityMode,
) -> f32 {
    mode.apply(probability_amplitude(state, r, theta, phi))
}

/// Spherical (r, theta, phi) to Cartesian (x, y, z).
pub fn spherical_to_cartesian(r: f32, theta: f32, phi: f32) -> [f32; 3] {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    [r * sin_t * cos_p, r * sin_t * sin_p, r * cos_t]
}

/// Cartesian to spherical, with theta = 0 at the origin and on the +z axis.
pub fn cartesian_to_spherical(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let r = (x * x + y * y + z * z).sqrt();
    if r <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let theta = (z / r).clamp(-1.0, 1.0).acos();
    let mut phi = y.atan2(x);
    if phi < 0.0 {
        phi += 2.0 * PI;
    }
    (r, theta, phi)
}
