//! Error types for configuration, desktop state and the host application.
//!
//! The camera choreography itself never fails: out-of-range input is clamped
//! or gated away. Only the edges of the crate return these.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid tunables or an unreadable config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and > 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} contains a non-finite component")]
    NonFinite { field: &'static str },

    #[error("zoom direction must have non-zero length")]
    ZeroZoomDirection,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the desktop overlay state (windows, media player)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesktopError {
    #[error("window not found: {0}")]
    WindowNotFound(String),

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),
}

/// Host application failures (window, GPU setup)
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
