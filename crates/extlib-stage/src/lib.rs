//! Artifact resolution and runtime staging for precompiled external libraries.
//!
//! Given an installation root (discovered once from the environment), a
//! target platform and a build configuration, this crate computes the include
//! and library search paths and the platform-specific artifact file names,
//! then copies the runtime-loadable artifact next to the application binaries
//! so it can be found at run time.
//!
//! ## Modules
//!
//! - [`roots`] — Library declarations and the installation-root snapshot
//! - [`naming`] — Artifact base name and file name derivation
//! - [`resolve`] — Pure path/name resolution (no filesystem access)
//! - [`stage`] — Destination directory handling and the runtime copy
//! - [`observe`] — Optional diagnostic hook for intermediate values
//! - [`plan`] — End-to-end resolution + staging producing a [`LinkPlan`]
//! - [`cargo`] — `build.rs` directive emission for a [`LinkPlan`]

pub mod cargo;
pub mod error;
pub mod naming;
pub mod observe;
pub mod plan;
pub mod resolve;
pub mod roots;
pub mod stage;

// Re-export key types for convenience
pub use error::{Result, StageError};
pub use naming::ArtifactNames;
pub use observe::{LogObserver, NoopObserver, ResolveObserver};
pub use plan::{LinkPlan, RuntimeDependency, Stager};
pub use resolve::{resolve, resolve_include_only, IncludeResolution, Resolution};
pub use roots::{InstallRoot, InstallRoots, LibraryKind, LibrarySpec};
pub use stage::{ensure_directory, stage, DestinationLayout, StageOutcome, StagePolicy};
