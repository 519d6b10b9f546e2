//! Error types for configuration, generation and export.

use thiserror::Error;

/// Everything that can go wrong while configuring, running or exporting a generator.
#[derive(Debug, Error)]
pub enum Error {
    /// Dimensions, percentages or seed are outside the accepted domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The grid was queried or smoothed before any `generate()` call.
    #[error("terrain not yet generated")]
    NotYetGenerated,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
