//! Error types for the template engine

use std::path::PathBuf;

use thiserror::Error;

/// Engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// No compatibility entry exists for the requested Minecraft version
    #[error("Unsupported Minecraft version for {loader}: {version}")]
    UnsupportedMinecraftVersion {
        /// Loader the version was requested for
        loader: String,
        /// The unsupported version string
        version: String,
    },

    /// The template tree for a loader could not be found on disk
    #[error("Template directory not found: {0}")]
    TemplateRootMissing(PathBuf),

    /// A directory stayed locked through every delete attempt
    #[error("Directory still locked after {attempts} delete attempts: {path}")]
    DirectoryLocked {
        /// The directory that could not be removed
        path: PathBuf,
        /// How many attempts were made
        attempts: u32,
    },

    /// Loader could not be determined from the hint or the project tree
    #[error("Unable to determine mod loader for project: {0}")]
    LoaderUnknown(PathBuf),

    /// A required structured field was missing or matched more than once
    #[error("Metadata rewrite failed for {path}: {reason}")]
    MetadataRewrite {
        /// File the rewrite targeted
        path: PathBuf,
        /// Why the rewrite could not be applied
        reason: String,
    },

    /// The external build-tool bootstrap exited nonzero
    #[error("Build bootstrap failed with exit status {status}")]
    BootstrapFailed {
        /// Process exit code, or -1 if terminated by signal
        status: i32,
    },

    /// Filesystem failure, annotated with the path involved
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Generated-source template failed to render
    #[error("Template render error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Element record could not be read or written
    #[error("Element record error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Engine result alias
pub type Result<T> = std::result::Result<T, EngineError>;
