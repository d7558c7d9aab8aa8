//! Path and name resolution.
//!
//! Resolution is pure: it only combines the installation root with the
//! naming convention. Nothing here touches the filesystem.

use std::path::PathBuf;

use serde::Serialize;

use extlib_targets::TargetDescriptor;

use crate::naming::ArtifactNames;
use crate::roots::InstallRoot;

/// Resolved paths and names for one library and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resolution {
    pub library: String,
    pub target: TargetDescriptor,
    pub install_root: PathBuf,
    /// `<root>/include`
    pub include_path: PathBuf,
    /// `<root>/lib`
    pub library_path: PathBuf,
    pub names: ArtifactNames,
}

impl Resolution {
    /// Where the runtime artifact is expected inside the installation.
    pub fn source_runtime_file(&self) -> PathBuf {
        self.library_path.join(&self.names.runtime)
    }

    /// Where the debug-symbol file would be, if the platform has one.
    pub fn source_debug_symbol_file(&self) -> Option<PathBuf> {
        self.names
            .debug_symbol
            .as_ref()
            .map(|name| self.library_path.join(name))
    }
}

/// Resolved include path for a header-only library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IncludeResolution {
    pub library: String,
    pub include_path: PathBuf,
}

/// Resolve the search paths and artifact names of `library` under `root`.
pub fn resolve(library: &str, root: &InstallRoot, target: TargetDescriptor) -> Resolution {
    let root = root.path();
    Resolution {
        library: library.to_string(),
        target,
        install_root: root.to_path_buf(),
        include_path: root.join("include"),
        library_path: root.join("lib"),
        names: ArtifactNames::derive(library, &target),
    }
}

/// Resolve a header-only library: the root itself is the include path.
pub fn resolve_include_only(library: &str, root: &InstallRoot) -> IncludeResolution {
    IncludeResolution {
        library: library.to_string(),
        include_path: root.path().to_path_buf(),
    }
}
