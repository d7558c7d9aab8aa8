//! Diagnostic hook for intermediate values.
//!
//! Resolution never prints. Callers that want to see what was computed pass
//! an observer; [`LogObserver`] forwards everything to the `log` facade.

use std::path::Path;

use crate::plan::RuntimeDependency;
use crate::resolve::{IncludeResolution, Resolution};
use crate::stage::StageOutcome;

/// Receives intermediate values while a library is resolved and staged.
///
/// All methods default to doing nothing.
pub trait ResolveObserver {
    fn on_install_root(&mut self, _library: &str, _root: &Path) {}

    fn on_resolved(&mut self, _resolution: &Resolution) {}

    fn on_include_only(&mut self, _resolution: &IncludeResolution) {}

    fn on_directory_created(&mut self, _path: &Path) {}

    fn on_staged(&mut self, _dependency: &RuntimeDependency, _outcome: StageOutcome) {}

    /// An optional artifact (debug symbols) was not present at the source.
    fn on_optional_missing(&mut self, _library: &str, _path: &Path) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolveObserver for NoopObserver {}

/// Observer that reports through the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ResolveObserver for LogObserver {
    fn on_install_root(&mut self, library: &str, root: &Path) {
        log::debug!("{library}: installation root {}", root.display());
    }

    fn on_resolved(&mut self, r: &Resolution) {
        log::debug!(
            "{}: {} -> link {}, runtime {}, symbols {}",
            r.library,
            r.target,
            r.names.link_time,
            r.names.runtime,
            r.names.debug_symbol.as_deref().unwrap_or("-"),
        );
    }

    fn on_include_only(&mut self, r: &IncludeResolution) {
        log::debug!("{}: include path {}", r.library, r.include_path.display());
    }

    fn on_directory_created(&mut self, path: &Path) {
        log::info!("created {}", path.display());
    }

    fn on_staged(&mut self, dep: &RuntimeDependency, outcome: StageOutcome) {
        match outcome {
            StageOutcome::Copied => log::info!(
                "staged {} -> {}",
                dep.source.display(),
                dep.destination.display()
            ),
            StageOutcome::Unchanged => {
                log::debug!("{} is up to date", dep.destination.display())
            }
        }
    }

    fn on_optional_missing(&mut self, library: &str, path: &Path) {
        log::warn!("{library}: no debug symbols at {}", path.display());
    }
}
