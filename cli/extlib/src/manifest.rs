//! `extlib.toml` manifest parsing.
//!
//! The manifest sits in the module directory: the directory staged binaries
//! are placed relative to.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use extlib_stage::{
    DestinationLayout, InstallRoots, LibraryKind, LibrarySpec, StagePolicy, Stager,
};
use extlib_targets::{Configuration, TargetDescriptor, TargetPlatform};

pub const MANIFEST_FILE: &str = "extlib.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtlibManifest {
    /// Module metadata (required).
    pub module: ModuleConfig,
    /// Default target for commands that need one.
    #[serde(default)]
    pub target: Option<TargetDefaults>,
    /// External libraries keyed by identifier.
    #[serde(default)]
    pub libraries: BTreeMap<String, LibraryEntry>,
}

/// Module section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleConfig {
    pub name: String,
    /// Staging offset from the module directory (default `../../Binaries`).
    #[serde(default)]
    pub binaries: Option<String>,
    /// Also stage debug-symbol files.
    #[serde(default)]
    pub stage_debug_symbols: bool,
    /// Skip the copy when the staged file is already identical.
    #[serde(default)]
    pub skip_identical: bool,
}

/// Default platform/configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefaults {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub configuration: Option<String>,
}

/// One `[libraries.<name>]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Environment variable holding the installation root.
    pub env: String,
    #[serde(default)]
    pub kind: LibraryKind,
}

impl ExtlibManifest {
    /// Search upward from `start_dir` for `extlib.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: ExtlibManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing extlib.toml")
    }

    /// All libraries as specs, in identifier order.
    pub fn specs(&self) -> Vec<LibrarySpec> {
        self.libraries
            .iter()
            .map(|(name, entry)| LibrarySpec {
                identifier: name.clone(),
                env_key: entry.env.clone(),
                kind: entry.kind,
            })
            .collect()
    }

    /// A single library's spec.
    pub fn spec(&self, name: &str) -> Result<LibrarySpec> {
        match self.libraries.get(name) {
            Some(entry) => Ok(LibrarySpec {
                identifier: name.to_string(),
                env_key: entry.env.clone(),
                kind: entry.kind,
            }),
            None => bail!(
                "library '{name}' is not declared in {MANIFEST_FILE} (known: {})",
                self.libraries.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Build a stager for this module using the given environment snapshot.
    pub fn stager(&self, roots: InstallRoots, module_dir: &Path) -> Stager {
        let layout = match &self.module.binaries {
            Some(offset) => DestinationLayout::with_offset(offset),
            None => DestinationLayout::default(),
        };
        let policy = if self.module.skip_identical {
            StagePolicy::SkipIdentical
        } else {
            StagePolicy::Overwrite
        };
        Stager::new(roots, module_dir)
            .with_layout(layout)
            .with_policy(policy)
            .with_debug_symbols(self.module.stage_debug_symbols)
    }

    /// Combine command-line overrides with the manifest's `[target]` defaults.
    pub fn target_descriptor(
        &self,
        platform: Option<&str>,
        configuration: Option<&str>,
    ) -> Result<TargetDescriptor> {
        let defaults = self.target.as_ref();
        let platform = platform
            .or_else(|| defaults.and_then(|t| t.platform.as_deref()))
            .context("no platform given (use --platform or set [target] platform)")?;
        let configuration = configuration
            .or_else(|| defaults.and_then(|t| t.configuration.as_deref()))
            .unwrap_or("Development");
        Ok(TargetDescriptor::new(
            TargetPlatform::parse(platform)?,
            Configuration::parse(configuration),
        ))
    }

    /// Generate the default template for `extlib init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[module]
name = "{name}"
binaries = "../../Binaries"

[target]
platform = "Win64"
configuration = "Development"

[libraries.PlanetLibrary]
env = "PLANET_LIB_ROOT"

[libraries.boost]
env = "BOOST_ROOT"
kind = "include-only"
"#
        )
    }
}
