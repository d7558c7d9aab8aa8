//! `extlib stage` — resolve every library and stage runtime artifacts.

use std::path::Path;

use anyhow::Result;

use extlib_stage::{InstallRoots, LinkPlan, LogObserver};
use extlib_targets::TargetDescriptor;

use crate::commands::OutputFormat;
use crate::manifest::ExtlibManifest;

/// Stage all manifest libraries (or only `library`) for `target`.
pub fn execute(
    module_dir: &Path,
    manifest: &ExtlibManifest,
    roots: InstallRoots,
    target: TargetDescriptor,
    library: Option<&str>,
) -> Result<Vec<LinkPlan>> {
    let specs = match library {
        Some(name) => vec![manifest.spec(name)?],
        None => manifest.specs(),
    };
    log::info!(
        "staging {} librar{} for {target} from {}",
        specs.len(),
        if specs.len() == 1 { "y" } else { "ies" },
        module_dir.display()
    );
    let stager = manifest.stager(roots, module_dir);
    Ok(stager.run_all(&specs, target, &mut LogObserver)?)
}

/// Stage and print the resulting link plans.
pub fn run(
    module_dir: &Path,
    manifest: &ExtlibManifest,
    target: TargetDescriptor,
    library: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let roots = InstallRoots::for_specs(&manifest.specs());
    let plans = execute(module_dir, manifest, roots, target, library)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
        OutputFormat::Text => {
            println!("Target: {target}");
            for plan in &plans {
                print_plan(plan);
            }
        }
    }
    Ok(())
}

fn print_plan(plan: &LinkPlan) {
    println!();
    println!("[{}]", plan.library);
    for path in &plan.include_paths {
        println!("  include  {}", path.display());
    }
    for path in &plan.library_paths {
        println!("  libpath  {}", path.display());
    }
    for lib in &plan.link_libraries {
        println!("  link     {lib}");
    }
    for dep in &plan.runtime_dependencies {
        println!(
            "  runtime  {} -> {}",
            dep.source.display(),
            dep.destination.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use extlib_stage::StageError;
    use extlib_targets::{Configuration, TargetPlatform};

    fn setup() -> (tempfile::TempDir, ExtlibManifest) {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("planet").join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("PlanetLibrary64Debug.dll"), b"dll").unwrap();
        fs::create_dir_all(dir.path().join("boost")).unwrap();

        let manifest: ExtlibManifest = toml::from_str(
            r#"
[module]
name = "HexPlanet"
binaries = "Binaries"

[libraries.PlanetLibrary]
env = "PLANET_LIB_ROOT"

[libraries.boost]
env = "BOOST_ROOT"
kind = "include-only"
"#,
        )
        .unwrap();
        (dir, manifest)
    }

    fn roots(dir: &Path) -> InstallRoots {
        InstallRoots::from_pairs([
            ("PLANET_LIB_ROOT", dir.join("planet")),
            ("BOOST_ROOT", dir.join("boost")),
        ])
    }

    #[test]
    fn stages_all_libraries() {
        let (dir, manifest) = setup();
        let target = TargetDescriptor::new(TargetPlatform::Win64, Configuration::DebugGame);

        let plans = execute(dir.path(), &manifest, roots(dir.path()), target, None).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].link_libraries, vec!["PlanetLibrary64Debug.lib".to_string()]);
        assert!(dir
            .path()
            .join("Binaries/Win64/PlanetLibrary64Debug.dll")
            .is_file());
        assert_eq!(plans[1].include_paths, vec![dir.path().join("boost")]);
    }

    #[test]
    fn stage_single_library() {
        let (dir, manifest) = setup();
        let target = TargetDescriptor::new(TargetPlatform::Win64, Configuration::Debug);
        let plans = execute(
            dir.path(),
            &manifest,
            roots(dir.path()),
            target,
            Some("boost"),
        )
        .unwrap();
        assert_eq!(plans.len(), 1);
        assert!(!dir.path().join("Binaries").exists());
    }

    #[test]
    fn wrong_configuration_artifact_missing() {
        let (dir, manifest) = setup();
        let target = TargetDescriptor::new(TargetPlatform::Win64, Configuration::Shipping);
        let err = execute(dir.path(), &manifest, roots(dir.path()), target, None).unwrap_err();
        let stage_err = err.downcast_ref::<StageError>().unwrap();
        assert!(matches!(
            stage_err.root_cause(),
            StageError::SourceArtifactNotFound { .. }
        ));
    }
}
