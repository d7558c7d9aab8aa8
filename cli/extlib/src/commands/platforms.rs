//! `extlib platforms` — supported targets and naming fragments.

use anyhow::Result;
use extlib_targets::{Configuration, TargetPlatform};

/// Print supported platforms and how configurations map to artifact suffixes.
pub fn list() -> Result<()> {
    println!("Platforms:");
    for platform in TargetPlatform::ALL {
        let c = platform.conventions();
        println!(
            "  {:<8} suffix {:<3} link {:<5} runtime {:<5} symbols {}",
            platform.architecture_tag(),
            platform.architecture_suffix(),
            c.link_time_ext,
            c.runtime_ext,
            c.debug_symbol_ext.unwrap_or("-"),
        );
    }
    println!();
    println!("Configurations:");
    for configuration in Configuration::ALL {
        println!("  {:<12} -> {}", configuration.as_str(), configuration.suffix());
    }
    Ok(())
}
