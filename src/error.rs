use std::path::PathBuf;

pub type OrbitalResult<T> = Result<T, OrbitalError>;

#[derive(Debug, thiserror::Error)]
pub enum OrbitalError {
    #[error("principal quantum number must be at least 1, got n={n}")]
    InvalidPrincipal { n: u32 },
    #[error("principal quantum number must be at most {max}, got n={n}")]
    PrincipalTooLarge { n: u32, max: u32 },
    #[error("angular quantum number must satisfy l < n, got n={n}, l={l}")]
    InvalidAngular { n: u32, l: u32 },
    #[error("magnetic quantum number must satisfy |m| <= l, got l={l}, m={m}")]
    InvalidMagnetic { l: u32, m: i32 },
    #[error("unknown color scheme '{0}'")]
    UnknownScheme(String),
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

impl OrbitalError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
