use std::path::PathBuf;

use thiserror::Error;

/// Rejected map data. A `Grid` that exists has passed these checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("expected {expected} cells for a {width}x{height} grid, got {actual}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Border cells must all be walls or the ray walk can leave the map.
    #[error("border cell ({x}, {y}) is empty")]
    OpenBorder { x: usize, y: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("start position ({x}, {y}) is not on an empty cell")]
    BlockedStart { x: f64, y: f64 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("map error: {0}")]
    Grid(#[from] GridError),

    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
