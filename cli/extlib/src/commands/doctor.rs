//! `extlib doctor` — environment and installation diagnostics.

use std::path::Path;

use anyhow::Result;

use extlib_stage::{InstallRoots, LibraryKind};

use crate::manifest::{ExtlibManifest, MANIFEST_FILE};

/// Status of one library's installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryStatus {
    pub library: String,
    pub env_key: String,
    pub root: Option<String>,
    /// Directories the library needs, with whether each exists.
    pub directories: Vec<(String, bool)>,
}

impl LibraryStatus {
    pub fn healthy(&self) -> bool {
        self.root.is_some() && self.directories.iter().all(|(_, ok)| *ok)
    }
}

/// Inspect every manifest library against an environment snapshot.
pub fn check(manifest: &ExtlibManifest, roots: &InstallRoots) -> Vec<LibraryStatus> {
    manifest
        .specs()
        .into_iter()
        .map(|spec| {
            let root = roots.get(&spec.env_key);
            let directories = match (root, spec.kind) {
                (None, _) => Vec::new(),
                (Some(root), LibraryKind::IncludeOnly) => {
                    vec![(root.path().display().to_string(), root.path().is_dir())]
                }
                (Some(root), LibraryKind::Artifact) => ["include", "lib"]
                    .iter()
                    .map(|sub| {
                        let dir = root.path().join(sub);
                        (dir.display().to_string(), dir.is_dir())
                    })
                    .collect(),
            };
            LibraryStatus {
                library: spec.identifier,
                env_key: spec.env_key,
                root: root.map(|r| r.path().display().to_string()),
                directories,
            }
        })
        .collect()
}

/// Print diagnostics for the manifest found at or above `cwd`.
pub fn run(cwd: &Path) -> Result<()> {
    println!("=== extlib doctor ===");
    println!();
    println!("extlib version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let (manifest, module_dir) = match ExtlibManifest::find_and_load(cwd) {
        Ok(Some(found)) => found,
        Ok(None) => {
            println!("{MANIFEST_FILE}: not found");
            return Ok(());
        }
        Err(e) => {
            println!("{MANIFEST_FILE}: error: {e:#}");
            return Ok(());
        }
    };
    println!("{MANIFEST_FILE}: found at {}", module_dir.display());
    println!("Module:      {}", manifest.module.name);
    println!();

    println!("--- Libraries ---");
    let roots = InstallRoots::for_specs(&manifest.specs());
    for status in check(&manifest, &roots) {
        let mark = if status.healthy() { "ok" } else { "!!" };
        match &status.root {
            Some(root) => println!("  [{mark}] {} ({}={root})", status.library, status.env_key),
            None => println!("  [{mark}] {} ({} is not set)", status.library, status.env_key),
        }
        for (dir, exists) in &status.directories {
            if !exists {
                println!("         missing {dir}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn manifest() -> ExtlibManifest {
        toml::from_str(&ExtlibManifest::template("m")).unwrap()
    }

    #[test]
    fn reports_unset_and_incomplete_installs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("planet/include")).unwrap();
        let roots = InstallRoots::from_pairs([("PLANET_LIB_ROOT", dir.path().join("planet"))]);

        let statuses = check(&manifest(), &roots);
        assert_eq!(statuses.len(), 2);

        let planet = &statuses[0];
        assert_eq!(planet.library, "PlanetLibrary");
        assert!(!planet.healthy());
        assert_eq!(planet.directories.iter().filter(|(_, ok)| *ok).count(), 1);

        let boost = &statuses[1];
        assert!(boost.root.is_none());
        assert!(!boost.healthy());
    }

    #[test]
    fn healthy_install() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("planet/include")).unwrap();
        fs::create_dir_all(dir.path().join("planet/lib")).unwrap();
        fs::create_dir_all(dir.path().join("boost")).unwrap();
        let roots = InstallRoots::from_pairs([
            ("PLANET_LIB_ROOT", dir.path().join("planet")),
            ("BOOST_ROOT", dir.path().join("boost")),
        ]);
        assert!(check(&manifest(), &roots).iter().all(LibraryStatus::healthy));
    }

    #[test]
    fn doctor_runs_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
    }
}
