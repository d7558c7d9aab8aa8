//! `extlib resolve` — show computed paths and names without staging.

use anyhow::Result;
use serde::Serialize;

use extlib_stage::{
    resolve, resolve_include_only, IncludeResolution, InstallRoots, LibraryKind, LogObserver,
    Resolution, ResolveObserver,
};
use extlib_targets::TargetDescriptor;

use crate::commands::OutputFormat;
use crate::manifest::ExtlibManifest;

/// Either shape of resolution, for printing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Artifact(Resolution),
    IncludeOnly(IncludeResolution),
}

/// Resolve one library from the manifest against a snapshot of the environment.
pub fn execute(
    manifest: &ExtlibManifest,
    roots: &InstallRoots,
    library: &str,
    target: TargetDescriptor,
) -> Result<Resolved> {
    let spec = manifest.spec(library)?;
    let root = roots
        .lookup(&spec)
        .map_err(|e| e.in_library(&spec.identifier, target))?;
    let mut observer = LogObserver;
    observer.on_install_root(&spec.identifier, root.path());

    Ok(match spec.kind {
        LibraryKind::Artifact => {
            let r = resolve(&spec.identifier, root, target);
            observer.on_resolved(&r);
            Resolved::Artifact(r)
        }
        LibraryKind::IncludeOnly => {
            let r = resolve_include_only(&spec.identifier, root);
            observer.on_include_only(&r);
            Resolved::IncludeOnly(r)
        }
    })
}

/// Resolve and print.
pub fn run(
    manifest: &ExtlibManifest,
    library: &str,
    target: TargetDescriptor,
    format: OutputFormat,
) -> Result<()> {
    let roots = InstallRoots::for_specs(&[manifest.spec(library)?]);
    let resolved = execute(manifest, &roots, library, target)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
        OutputFormat::Text => match &resolved {
            Resolved::Artifact(r) => {
                println!("Library:       {} ({})", r.library, r.target);
                println!("Include path:  {}", r.include_path.display());
                println!("Library path:  {}", r.library_path.display());
                println!("Base name:     {}", r.names.base_name);
                println!("Link-time:     {}", r.names.link_time);
                println!("Runtime:       {}", r.names.runtime);
                if let Some(pdb) = &r.names.debug_symbol {
                    println!("Debug symbols: {pdb}");
                }
            }
            Resolved::IncludeOnly(r) => {
                println!("Library:       {} (include only)", r.library);
                println!("Include path:  {}", r.include_path.display());
            }
        },
    }
    Ok(())
}
