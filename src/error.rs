use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the native library boundary.
#[derive(Error, Debug)]
pub enum NativeError {
    /// The shared object could not be loaded.
    #[error("failed to load imaging library from `{path}`: {source}")]
    Load {
        /// Path or library name handed to the system loader.
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A required entry point is missing from the loaded library.
    #[error("imaging library has no `{name}` entry point: {source}")]
    MissingSymbol {
        /// Symbol name that failed to resolve.
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// A path could not be converted for the C boundary.
    #[error("path `{0}` cannot be passed to the imaging library")]
    InvalidPath(PathBuf),
}

/// Errors produced while configuring or driving the image generation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Native(#[from] NativeError),

    /// Rendering was requested before a camera was installed.
    #[error("no camera configured")]
    CameraNotSet,

    /// Rendering was requested before an experiment was installed.
    #[error("no experiment configured")]
    ExperimentNotSet,

    /// A parameter combination the native library cannot handle.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario (de)serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
