//! Target platform and build configuration model for external library staging.
//!
//! A build invocation is described by a [`TargetDescriptor`]: the platform
//! being built for plus the build configuration. Everything that varies by
//! target when naming a precompiled library's artifacts is derived from it.
//!
//! ## Modules
//!
//! - [`platform`] — Supported platforms and their artifact conventions
//! - [`configuration`] — Build configurations and suffix normalization
//! - [`descriptor`] — The (platform, configuration) pair and its parsing
//! - [`error`] — Target parsing errors

pub mod configuration;
pub mod descriptor;
pub mod error;
pub mod platform;

pub use configuration::{Configuration, ConfigurationSuffix};
pub use descriptor::TargetDescriptor;
pub use error::{Result, TargetError};
pub use platform::{ArtifactConventions, TargetPlatform};
