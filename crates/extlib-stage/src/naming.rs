//! Artifact file naming.
//!
//! A library publishes one base name per (architecture, configuration):
//! `<identifier><32|64><Debug|Release>`. The link-time, runtime and
//! debug-symbol files all share it and differ only in extension.

use serde::Serialize;

use extlib_targets::TargetDescriptor;

/// The file names a library uses for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtifactNames {
    pub base_name: String,
    /// File registered with the linker.
    pub link_time: String,
    /// File loaded by the running application.
    pub runtime: String,
    /// Debug-symbol file, when the platform produces one.
    pub debug_symbol: Option<String>,
}

impl ArtifactNames {
    /// Derive the artifact names of `identifier` for `target`.
    pub fn derive(identifier: &str, target: &TargetDescriptor) -> Self {
        let base_name = format!(
            "{identifier}{}{}",
            target.platform.architecture_suffix(),
            target.configuration_suffix()
        );
        let conventions = target.platform.conventions();

        Self {
            link_time: format!("{base_name}{}", conventions.link_time_ext),
            runtime: format!("{base_name}{}", conventions.runtime_ext),
            debug_symbol: conventions
                .debug_symbol_ext
                .map(|ext| format!("{base_name}{ext}")),
            base_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extlib_targets::{Configuration, TargetPlatform};

    #[test]
    fn win64_release() {
        let target = TargetDescriptor::new(TargetPlatform::Win64, Configuration::Development);
        let names = ArtifactNames::derive("PlanetLibrary", &target);
        assert_eq!(names.base_name, "PlanetLibrary64Release");
        assert_eq!(names.link_time, "PlanetLibrary64Release.lib");
        assert_eq!(names.runtime, "PlanetLibrary64Release.dll");
        assert_eq!(names.debug_symbol.as_deref(), Some("PlanetLibrary64Release.pdb"));
    }

    #[test]
    fn win32_debug() {
        let target = TargetDescriptor::new(TargetPlatform::Win32, Configuration::Debug);
        let names = ArtifactNames::derive("PlanetLibrary", &target);
        assert_eq!(names.base_name, "PlanetLibrary32Debug");
        assert_eq!(names.runtime, "PlanetLibrary32Debug.dll");
    }

    #[test]
    fn debug_and_debug_game_agree() {
        for platform in TargetPlatform::ALL {
            let debug = ArtifactNames::derive(
                "Lib",
                &TargetDescriptor::new(platform, Configuration::Debug),
            );
            let debug_game = ArtifactNames::derive(
                "Lib",
                &TargetDescriptor::new(platform, Configuration::DebugGame),
            );
            assert_eq!(debug, debug_game);
        }
    }

    #[test]
    fn all_names_share_base() {
        for platform in TargetPlatform::ALL {
            for configuration in Configuration::ALL {
                let names = ArtifactNames::derive(
                    "PlanetLibrary",
                    &TargetDescriptor::new(platform, configuration),
                );
                assert!(names.link_time.starts_with(&names.base_name));
                assert!(names.runtime.starts_with(&names.base_name));
                if let Some(pdb) = &names.debug_symbol {
                    assert!(pdb.starts_with(&names.base_name));
                }
                assert_ne!(names.link_time, names.runtime);
            }
        }
    }
}
