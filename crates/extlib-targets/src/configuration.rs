//! Build configurations and their naming suffix.

use std::str::FromStr;

use serde::{Deserialize, Serialize};


/// The build configuration of the consuming application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Configuration {
    /// Full debug build.
    Debug,
    /// Debug build of the game module only; links the same libraries as `Debug`.
    DebugGame,
    /// Optimized build with developer tooling.
    Development,
    /// Shipping build with test hooks left in.
    Test,
    /// Final optimized build.
    Shipping,
    /// Any configuration name not listed above; links the release libraries.
    Unknown,
}

/// The configuration fragment embedded in artifact base names.
///
/// External libraries only ship two variants; every configuration collapses
/// onto one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigurationSuffix {
    Debug,
    Release,
}

impl Configuration {
    pub const ALL: [Configuration; 6] = [
        Configuration::Debug,
        Configuration::DebugGame,
        Configuration::Development,
        Configuration::Test,
        Configuration::Shipping,
        Configuration::Unknown,
    ];

    /// Parse a configuration name (case-insensitive).
    ///
    /// `Release` is accepted as an alias of `Development`. Unrecognized names
    /// become [`Configuration::Unknown`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "debuggame" | "debug-game" => Self::DebugGame,
            "development" | "release" => Self::Development,
            "test" => Self::Test,
            "shipping" => Self::Shipping,
            _ => Self::Unknown,
        }
    }

    /// Normalize to the suffix used in artifact names.
    pub fn suffix(&self) -> ConfigurationSuffix {
        match self {
            Self::Debug | Self::DebugGame => ConfigurationSuffix::Debug,
            Self::Development | Self::Test | Self::Shipping | Self::Unknown => {
                ConfigurationSuffix::Release
            }
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::DebugGame => "DebugGame",
            Self::Development => "Development",
            Self::Test => "Test",
            Self::Shipping => "Shipping",
            Self::Unknown => "Unknown",
        }
    }
}

impl ConfigurationSuffix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl FromStr for Configuration {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ConfigurationSuffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
