//! Error types for artifact resolution and staging.

use std::path::PathBuf;

use extlib_targets::{TargetDescriptor, TargetError};

/// Errors that can occur while resolving or staging an external library.
///
/// Every variant is fatal to the build step that raised it.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The environment key naming a library's installation root is unset or empty.
    #[error("installation root for '{library}' is not set: environment variable {key} has no value")]
    MissingEnvironmentValue { library: String, key: String },

    /// A variable the cargo build-script protocol guarantees is absent.
    #[error("build script variable {key} is not set")]
    MissingBuildVariable { key: String },

    /// Platform or configuration could not be interpreted.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// The runtime artifact is not where the naming convention says it is.
    #[error("source artifact not found: {}", path.display())]
    SourceArtifactNotFound { path: PathBuf },

    /// The destination directory could not be created.
    #[error("cannot create destination directory {}: {source}", path.display())]
    DestinationDirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying the artifact into place failed.
    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Build-script directives could not be written.
    #[error("cannot write build directives: {0}")]
    DirectiveWrite(#[source] std::io::Error),

    /// A failure attributed to one library and target.
    #[error("{library} ({target}): {source}")]
    Library {
        library: String,
        target: TargetDescriptor,
        #[source]
        source: Box<StageError>,
    },
}

impl StageError {
    /// Attach the library and target the failure occurred for.
    pub fn in_library(self, library: &str, target: TargetDescriptor) -> Self {
        match self {
            already @ StageError::Library { .. } => already,
            other => StageError::Library {
                library: library.to_string(),
                target,
                source: Box::new(other),
            },
        }
    }

    /// The underlying failure, with any library attribution peeled off.
    pub fn root_cause(&self) -> &StageError {
        match self {
            StageError::Library { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for resolution and staging operations.
pub type Result<T> = std::result::Result<T, StageError>;
