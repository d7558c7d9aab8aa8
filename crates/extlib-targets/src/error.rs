//! Error types for target descriptor parsing.

/// Errors that can occur while interpreting a build target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The platform is not one external libraries are published for.
    #[error("unsupported platform '{name}' (supported: Win32, Win64)")]
    UnsupportedPlatform {
        /// The platform identifier as given.
        name: String,
    },

    /// A descriptor string did not have the `platform-configuration` shape.
    #[error("malformed target descriptor '{input}': expected <platform>-<configuration>")]
    MalformedDescriptor {
        /// The descriptor string as given.
        input: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
