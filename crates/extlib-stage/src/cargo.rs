//! Build-script integration.
//!
//! Turns [`LinkPlan`]s into `cargo:` directives so a crate's `build.rs` can
//! link against an external library and have its runtime artifact staged
//! next to the produced binaries.
//!
//! ```no_run
//! // build.rs
//! use extlib_stage::{cargo, LibrarySpec};
//!
//! fn main() {
//!     let specs = [
//!         LibrarySpec::artifact("PlanetLibrary", "PLANET_LIB_ROOT"),
//!         LibrarySpec::include_only("boost", "BOOST_ROOT"),
//!     ];
//!     if let Err(e) = cargo::configure(&specs, "target") {
//!         panic!("{e}");
//!     }
//! }
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use extlib_targets::TargetDescriptor;

use crate::error::{Result, StageError};
use crate::observe::LogObserver;
use crate::plan::{LinkPlan, Stager};
use crate::roots::{InstallRoots, LibrarySpec};
use crate::stage::DestinationLayout;

/// Write the directives for one plan.
///
/// `env_key` is the variable the plan's installation root came from; cargo
/// reruns the build script when it changes.
pub fn emit_directives<W: Write>(plan: &LinkPlan, env_key: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "cargo:rerun-if-env-changed={env_key}")?;
    for path in &plan.include_paths {
        writeln!(out, "cargo:include={}", path.display())?;
    }
    for path in &plan.library_paths {
        writeln!(out, "cargo:rustc-link-search=native={}", path.display())?;
    }
    for lib in &plan.link_libraries {
        let name = Path::new(lib)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| lib.clone());
        writeln!(out, "cargo:rustc-link-lib=dylib={name}")?;
    }
    for dep in &plan.runtime_dependencies {
        writeln!(out, "cargo:rerun-if-changed={}", dep.source.display())?;
    }
    Ok(())
}

/// Resolve and stage `specs` from inside a build script.
///
/// Reads `TARGET`, `PROFILE` and `CARGO_MANIFEST_DIR`; runtime artifacts are
/// staged under `<manifest dir>/<offset>/<architecture tag>`.
pub fn configure(specs: &[LibrarySpec], offset: impl Into<PathBuf>) -> Result<Vec<LinkPlan>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    configure_with(specs, offset, |key| std::env::var_os(key), &mut out)
}

/// [`configure`] with an explicit variable lookup and directive sink.
///
/// `lookup` answers both the cargo variables and the installation-root keys.
pub fn configure_with<F, W>(
    specs: &[LibrarySpec],
    offset: impl Into<PathBuf>,
    lookup: F,
    out: &mut W,
) -> Result<Vec<LinkPlan>>
where
    F: Fn(&str) -> Option<OsString>,
    W: Write,
{
    let build_var = |key: &str| {
        lookup(key)
            .and_then(|v| v.into_string().ok())
            .ok_or_else(|| StageError::MissingBuildVariable {
                key: key.to_string(),
            })
    };
    let target = TargetDescriptor::from_cargo(&build_var("TARGET")?, &build_var("PROFILE")?)?;
    let manifest_dir = PathBuf::from(build_var("CARGO_MANIFEST_DIR")?);

    let roots = InstallRoots::from_lookup(specs.iter().map(|s| s.env_key.as_str()), &lookup);
    let stager =
        Stager::new(roots, manifest_dir).with_layout(DestinationLayout::with_offset(offset));
    let plans = stager.run_all(specs, target, &mut LogObserver)?;

    for (spec, plan) in specs.iter().zip(&plans) {
        emit_directives(plan, &spec.env_key, out).map_err(StageError::DirectiveWrite)?;
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::RuntimeDependency;
    use std::collections::HashMap;
    use std::fs;

    fn sample_plan() -> LinkPlan {
        LinkPlan {
            library: "PlanetLibrary".into(),
            include_paths: vec![PathBuf::from("/opt/lib/include")],
            library_paths: vec![PathBuf::from("/opt/lib/lib")],
            link_libraries: vec!["PlanetLibrary64Release.lib".into()],
            runtime_dependencies: vec![RuntimeDependency {
                source: PathBuf::from("/opt/lib/lib/PlanetLibrary64Release.dll"),
                destination: PathBuf::from("/proj/Binaries/Win64/PlanetLibrary64Release.dll"),
            }],
        }
    }

    #[test]
    fn directives_for_artifact_plan() {
        let mut out = Vec::new();
        emit_directives(&sample_plan(), "PLANET_LIB_ROOT", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "cargo:rerun-if-env-changed=PLANET_LIB_ROOT",
                "cargo:include=/opt/lib/include",
                "cargo:rustc-link-search=native=/opt/lib/lib",
                "cargo:rustc-link-lib=dylib=PlanetLibrary64Release",
                "cargo:rerun-if-changed=/opt/lib/lib/PlanetLibrary64Release.dll",
            ]
        );
    }

    #[test]
    fn directives_for_include_only_plan() {
        let plan = LinkPlan {
            library: "boost".into(),
            include_paths: vec![PathBuf::from("/opt/boost")],
            ..LinkPlan::default()
        };
        let mut out = Vec::new();
        emit_directives(&plan, "BOOST_ROOT", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "cargo:rerun-if-env-changed=BOOST_ROOT\ncargo:include=/opt/boost\n"
        );
    }

    fn vars(pairs: &[(&str, &Path)]) -> HashMap<String, OsString> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_os_str().to_os_string()))
            .collect()
    }

    #[test]
    fn configure_stages_and_emits_for_every_spec() {
        let dir = tempfile::tempdir().unwrap();
        let planet = dir.path().join("planet");
        fs::create_dir_all(planet.join("lib")).unwrap();
        fs::write(planet.join("lib/PlanetLibrary64Debug.dll"), b"dll").unwrap();
        let boost = dir.path().join("boost");
        fs::create_dir_all(&boost).unwrap();
        let crate_dir = dir.path().join("crate");
        fs::create_dir_all(&crate_dir).unwrap();

        let env = vars(&[
            ("TARGET", Path::new("x86_64-pc-windows-msvc")),
            ("PROFILE", Path::new("debug")),
            ("CARGO_MANIFEST_DIR", crate_dir.as_path()),
            ("PLANET_LIB_ROOT", planet.as_path()),
            ("BOOST_ROOT", boost.as_path()),
        ]);
        let specs = [
            LibrarySpec::artifact("PlanetLibrary", "PLANET_LIB_ROOT"),
            LibrarySpec::include_only("boost", "BOOST_ROOT"),
        ];

        let mut out = Vec::new();
        let plans = configure_with(&specs, "bin", |key| env.get(key).cloned(), &mut out).unwrap();

        assert_eq!(plans.len(), 2);
        assert!(crate_dir.join("bin/Win64/PlanetLibrary64Debug.dll").is_file());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("cargo:rerun-if-env-changed=PLANET_LIB_ROOT\n"));
        assert!(text.contains("cargo:rustc-link-lib=dylib=PlanetLibrary64Debug\n"));
        assert!(text.contains("cargo:rerun-if-env-changed=BOOST_ROOT\n"));
        assert!(text.contains(&format!("cargo:include={}\n", boost.display())));
    }

    #[test]
    fn configure_requires_cargo_variables() {
        let dir = tempfile::tempdir().unwrap();
        let env = vars(&[
            ("PROFILE", Path::new("release")),
            ("CARGO_MANIFEST_DIR", dir.path()),
        ]);
        let mut out = Vec::new();
        let err = configure_with(&[], "bin", |key| env.get(key).cloned(), &mut out).unwrap_err();
        match err {
            StageError::MissingBuildVariable { key } => assert_eq!(key, "TARGET"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn configure_rejects_non_windows_target() {
        let dir = tempfile::tempdir().unwrap();
        let env = vars(&[
            ("TARGET", Path::new("x86_64-unknown-linux-gnu")),
            ("PROFILE", Path::new("release")),
            ("CARGO_MANIFEST_DIR", dir.path()),
        ]);
        let mut out = Vec::new();
        let err = configure_with(&[], "bin", |key| env.get(key).cloned(), &mut out).unwrap_err();
        assert!(matches!(err, StageError::Target(_)));
    }
}
