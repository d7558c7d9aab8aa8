//! End-to-end resolution and staging for one library.
//!
//! [`Stager`] ties the pieces together in a fixed order: look up the
//! installation root, resolve names, check the source artifact, make sure the
//! destination directory exists, copy. The returned [`LinkPlan`] is what the
//! host build consumes.

use std::path::PathBuf;

use serde::Serialize;

use extlib_targets::TargetDescriptor;

use crate::error::{Result, StageError};
use crate::observe::{NoopObserver, ResolveObserver};
use crate::resolve::{resolve, resolve_include_only};
use crate::roots::{InstallRoot, InstallRoots, LibraryKind, LibrarySpec};
use crate::stage::{ensure_directory, stage, DestinationLayout, StagePolicy};

/// A file the packaged application must carry, and where it was staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDependency {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// What the host build needs to compile and link against one library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkPlan {
    pub library: String,
    pub include_paths: Vec<PathBuf>,
    pub library_paths: Vec<PathBuf>,
    /// Link-time file names, e.g. `PlanetLibrary64Release.lib`.
    pub link_libraries: Vec<String>,
    pub runtime_dependencies: Vec<RuntimeDependency>,
}

/// Resolves and stages libraries for a module.
#[derive(Debug, Clone)]
pub struct Stager {
    roots: InstallRoots,
    module_dir: PathBuf,
    layout: DestinationLayout,
    policy: StagePolicy,
    stage_debug_symbols: bool,
}

impl Stager {
    /// Stager for the module located at `module_dir`.
    pub fn new(roots: InstallRoots, module_dir: impl Into<PathBuf>) -> Self {
        Self {
            roots,
            module_dir: module_dir.into(),
            layout: DestinationLayout::default(),
            policy: StagePolicy::default(),
            stage_debug_symbols: false,
        }
    }

    pub fn with_layout(mut self, layout: DestinationLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_policy(mut self, policy: StagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Also stage the debug-symbol file when the installation has one.
    pub fn with_debug_symbols(mut self, enabled: bool) -> Self {
        self.stage_debug_symbols = enabled;
        self
    }

    /// Destination directory for `target`.
    pub fn destination_dir(&self, target: &TargetDescriptor) -> PathBuf {
        self.layout.directory(&self.module_dir, target.platform)
    }

    /// Resolve and stage `spec` without diagnostics.
    pub fn run(&self, spec: &LibrarySpec, target: TargetDescriptor) -> Result<LinkPlan> {
        self.run_observed(spec, target, &mut NoopObserver)
    }

    /// Resolve and stage `spec`, reporting intermediate values to `observer`.
    pub fn run_observed(
        &self,
        spec: &LibrarySpec,
        target: TargetDescriptor,
        observer: &mut dyn ResolveObserver,
    ) -> Result<LinkPlan> {
        let root = self
            .roots
            .lookup(spec)
            .map_err(|e| e.in_library(&spec.identifier, target))?;
        observer.on_install_root(&spec.identifier, root.path());

        match spec.kind {
            LibraryKind::IncludeOnly => {
                let r = resolve_include_only(&spec.identifier, root);
                observer.on_include_only(&r);
                Ok(LinkPlan {
                    library: r.library,
                    include_paths: vec![r.include_path],
                    ..LinkPlan::default()
                })
            }
            LibraryKind::Artifact => self
                .stage_artifact(spec, root, target, observer)
                .map_err(|e| e.in_library(&spec.identifier, target)),
        }
    }

    /// Run every spec in order, stopping at the first failure.
    pub fn run_all(
        &self,
        specs: &[LibrarySpec],
        target: TargetDescriptor,
        observer: &mut dyn ResolveObserver,
    ) -> Result<Vec<LinkPlan>> {
        specs
            .iter()
            .map(|spec| self.run_observed(spec, target, observer))
            .collect()
    }

    fn stage_artifact(
        &self,
        spec: &LibrarySpec,
        root: &InstallRoot,
        target: TargetDescriptor,
        observer: &mut dyn ResolveObserver,
    ) -> Result<LinkPlan> {
        let r = resolve(&spec.identifier, root, target);
        observer.on_resolved(&r);

        let source = r.source_runtime_file();
        if !source.is_file() {
            return Err(StageError::SourceArtifactNotFound { path: source });
        }

        let dest_dir = self.destination_dir(&target);
        if ensure_directory(&dest_dir)? {
            observer.on_directory_created(&dest_dir);
        }

        let mut runtime_dependencies = Vec::new();
        let (destination, outcome) = stage(&source, &dest_dir, self.policy)?;
        let dependency = RuntimeDependency {
            source,
            destination,
        };
        observer.on_staged(&dependency, outcome);
        runtime_dependencies.push(dependency);

        if self.stage_debug_symbols {
            if let Some(symbols) = r.source_debug_symbol_file() {
                if symbols.is_file() {
                    let (destination, outcome) = stage(&symbols, &dest_dir, self.policy)?;
                    let dependency = RuntimeDependency {
                        source: symbols,
                        destination,
                    };
                    observer.on_staged(&dependency, outcome);
                    runtime_dependencies.push(dependency);
                } else {
                    observer.on_optional_missing(&spec.identifier, &symbols);
                }
            }
        }

        Ok(LinkPlan {
            library: r.library,
            include_paths: vec![r.include_path],
            library_paths: vec![r.library_path],
            link_libraries: vec![r.names.link_time],
            runtime_dependencies,
        })
    }
}
