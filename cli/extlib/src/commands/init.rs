//! `extlib init` — write a starter manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{ExtlibManifest, MANIFEST_FILE};

/// Create `extlib.toml` in `module_dir`.
pub fn run(module_dir: &Path, name: &str) -> Result<()> {
    let path = module_dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::write(&path, ExtlibManifest::template(name))
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
