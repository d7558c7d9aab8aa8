//! Supported target platforms.
//!
//! Precompiled external libraries are published per platform with a fixed
//! naming convention: an architecture suffix baked into the file name and a
//! set of platform-specific file extensions. Only platforms with a known
//! convention are representable; anything else is rejected at parse time
//! instead of producing empty extensions downstream.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// A platform external libraries can be resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPlatform {
    /// 32-bit Windows.
    Win32,
    /// 64-bit Windows.
    Win64,
}

/// File extensions a platform uses for library artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactConventions {
    /// Extension of the file referenced at link time (e.g. an import library).
    pub link_time_ext: &'static str,
    /// Extension of the dynamically loaded file.
    pub runtime_ext: &'static str,
    /// Extension of the debug-symbol file, if the platform produces one.
    pub debug_symbol_ext: Option<&'static str>,
}

const WINDOWS_CONVENTIONS: ArtifactConventions = ArtifactConventions {
    link_time_ext: ".lib",
    runtime_ext: ".dll",
    debug_symbol_ext: Some(".pdb"),
};

impl TargetPlatform {
    /// All supported platforms.
    pub const ALL: [TargetPlatform; 2] = [TargetPlatform::Win32, TargetPlatform::Win64];

    /// Parse a platform identifier (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win32" | "x86" => Ok(Self::Win32),
            "win64" | "x64" => Ok(Self::Win64),
            _ => Err(TargetError::UnsupportedPlatform { name: s.to_string() }),
        }
    }

    /// Map a Rust target triple (as seen in a build script's `TARGET`) to a platform.
    pub fn from_target_triple(triple: &str) -> Result<Self> {
        let mut parts = triple.split('-');
        let arch = parts.next().unwrap_or_default();
        let is_windows = triple.contains("-windows");
        match (arch, is_windows) {
            ("i586" | "i686", true) => Ok(Self::Win32),
            ("x86_64", true) => Ok(Self::Win64),
            _ => Err(TargetError::UnsupportedPlatform {
                name: triple.to_string(),
            }),
        }
    }

    /// Architecture width fragment embedded in artifact base names.
    pub fn architecture_suffix(&self) -> &'static str {
        match self {
            Self::Win32 => "32",
            Self::Win64 => "64",
        }
    }

    /// Architecture tag naming the per-platform binaries directory.
    pub fn architecture_tag(&self) -> &'static str {
        match self {
            Self::Win32 => "Win32",
            Self::Win64 => "Win64",
        }
    }

    /// Artifact file extensions for this platform.
    pub fn conventions(&self) -> ArtifactConventions {
        match self {
            Self::Win32 | Self::Win64 => WINDOWS_CONVENTIONS,
        }
    }
}

impl FromStr for TargetPlatform {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.architecture_tag())
    }
}
