//! The (platform, configuration) pair describing one build invocation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::configuration::{Configuration, ConfigurationSuffix};
use crate::error::{Result, TargetError};
use crate::platform::TargetPlatform;

/// Target of a single build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    pub platform: TargetPlatform,
    pub configuration: Configuration,
}

impl TargetDescriptor {
    pub fn new(platform: TargetPlatform, configuration: Configuration) -> Self {
        Self {
            platform,
            configuration,
        }
    }

    /// Build a descriptor from separate platform and configuration names.
    pub fn parse_parts(platform: &str, configuration: &str) -> Result<Self> {
        Ok(Self::new(
            TargetPlatform::parse(platform)?,
            Configuration::parse(configuration),
        ))
    }

    /// Build a descriptor from a cargo build-script environment.
    ///
    /// `triple` is the value of `TARGET`, `profile` the value of `PROFILE`
    /// (`debug` or `release`).
    pub fn from_cargo(triple: &str, profile: &str) -> Result<Self> {
        let platform = TargetPlatform::from_target_triple(triple)?;
        let configuration = match profile {
            "debug" => Configuration::Debug,
            _ => Configuration::Development,
        };
        Ok(Self::new(platform, configuration))
    }

    /// The configuration fragment used in artifact names.
    pub fn configuration_suffix(&self) -> ConfigurationSuffix {
        self.configuration.suffix()
    }
}

impl FromStr for TargetDescriptor {
    type Err = TargetError;

    /// Parse `<platform>-<configuration>`, e.g. `win64-debuggame`.
    fn from_str(s: &str) -> Result<Self> {
        let (platform, configuration) =
            s.split_once('-').ok_or_else(|| TargetError::MalformedDescriptor {
                input: s.to_string(),
            })?;
        Self::parse_parts(platform, configuration)
    }
}

impl std::fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.platform, self.configuration)
    }
}
