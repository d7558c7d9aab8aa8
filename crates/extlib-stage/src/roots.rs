//! Library declarations and installation-root configuration.
//!
//! Installation roots are read from the environment exactly once, at the
//! start of a build invocation, into an [`InstallRoots`] snapshot. Resolution
//! only ever consults the snapshot.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StageError};

/// How much of the resolver a library needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryKind {
    /// Headers, an import library and a runtime artifact that must be staged.
    #[default]
    Artifact,
    /// Header-only; the installation root itself is the include path.
    IncludeOnly,
}

/// An external library the application links against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpec {
    /// Library identifier, also the prefix of every artifact file name.
    pub identifier: String,
    /// Environment key holding the installation root.
    pub env_key: String,
    pub kind: LibraryKind,
}

impl LibrarySpec {
    pub fn artifact(identifier: impl Into<String>, env_key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            env_key: env_key.into(),
            kind: LibraryKind::Artifact,
        }
    }

    pub fn include_only(identifier: impl Into<String>, env_key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            env_key: env_key.into(),
            kind: LibraryKind::IncludeOnly,
        }
    }
}

/// A non-empty installation root path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallRoot(PathBuf);

impl InstallRoot {
    /// Wrap a path, rejecting the empty path.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(Self(path))
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for InstallRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Snapshot of environment values naming installation roots, keyed by variable name.
#[derive(Debug, Clone, Default)]
pub struct InstallRoots {
    values: HashMap<String, InstallRoot>,
}

impl InstallRoots {
    /// Read the given keys from the process environment.
    ///
    /// Unset and empty variables are left out of the snapshot.
    pub fn from_env<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lookup(keys, |key| std::env::var_os(key))
    }

    /// Snapshot the keys every spec needs from the process environment.
    pub fn for_specs(specs: &[LibrarySpec]) -> Self {
        Self::from_env(specs.iter().map(|s| s.env_key.as_str()))
    }

    /// Build a snapshot from explicit `(key, path)` pairs.
    pub fn from_pairs<I, K, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        let values = pairs
            .into_iter()
            .filter_map(|(k, p)| InstallRoot::new(p).map(|root| (k.into(), root)))
            .collect();
        Self { values }
    }

    pub(crate) fn from_lookup<I, S, F>(keys: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<OsString>,
    {
        let values = keys
            .into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let root = InstallRoot::new(lookup(key)?)?;
                Some((key.to_string(), root))
            })
            .collect();
        Self { values }
    }

    /// Raw lookup by environment key.
    pub fn get(&self, key: &str) -> Option<&InstallRoot> {
        self.values.get(key)
    }

    /// The installation root for a library, or `MissingEnvironmentValue`.
    pub fn lookup(&self, spec: &LibrarySpec) -> Result<&InstallRoot> {
        self.get(&spec.env_key)
            .ok_or_else(|| StageError::MissingEnvironmentValue {
                library: spec.identifier.clone(),
                key: spec.env_key.clone(),
            })
    }

}
