//! Destination directory handling and the runtime artifact copy.
//!
//! Staging is convergent: running it again with the same inputs leaves the
//! same directory and the same file contents behind.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use extlib_targets::TargetPlatform;

use crate::error::{Result, StageError};

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StagePolicy {
    /// Always copy; the last writer wins.
    #[default]
    Overwrite,
    /// Leave the destination alone when its contents already match the source.
    SkipIdentical,
}

/// Result of staging one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageOutcome {
    Copied,
    /// Destination already identical; nothing was written.
    Unchanged,
}

/// Where staged runtime artifacts go, relative to the module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLayout {
    offset: PathBuf,
}

impl Default for DestinationLayout {
    fn default() -> Self {
        Self {
            offset: ["..", "..", "Binaries"].iter().collect(),
        }
    }
}

impl DestinationLayout {
    /// Use a custom offset from the module directory.
    pub fn with_offset(offset: impl Into<PathBuf>) -> Self {
        Self {
            offset: offset.into(),
        }
    }

    /// `<module_dir>/<offset>/<architecture tag>`
    pub fn directory(&self, module_dir: &Path, platform: TargetPlatform) -> PathBuf {
        module_dir
            .join(&self.offset)
            .join(platform.architecture_tag())
    }
}

/// Create `path` (and parents) if it does not exist.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|source| StageError::DestinationDirectoryCreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Copy `source` into `destination_dir`, keeping its file name.
///
/// The destination directory must already exist.
pub fn stage(
    source: &Path,
    destination_dir: &Path,
    policy: StagePolicy,
) -> Result<(PathBuf, StageOutcome)> {
    let file_name = match source.file_name() {
        Some(name) if source.is_file() => name,
        _ => {
            return Err(StageError::SourceArtifactNotFound {
                path: source.to_path_buf(),
            })
        }
    };
    let destination = destination_dir.join(file_name);

    if is_same_file(source, &destination) {
        return Err(StageError::CopyFailed {
            from: source.to_path_buf(),
            to: destination,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ),
        });
    }

    if policy == StagePolicy::SkipIdentical && same_contents(source, &destination) {
        return Ok((destination, StageOutcome::Unchanged));
    }

    fs::copy(source, &destination).map_err(|err| StageError::CopyFailed {
        from: source.to_path_buf(),
        to: destination.clone(),
        source: err,
    })?;
    Ok((destination, StageOutcome::Copied))
}

/// Whether both paths name the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Whether both files exist with equal length and SHA-256.
///
/// Any read error counts as "different" so the caller falls back to copying.
fn same_contents(a: &Path, b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };
    if !meta_b.is_file() || meta_a.len() != meta_b.len() {
        return false;
    }
    match (file_digest(a), file_digest(b)) {
        (Ok(da), Ok(db)) => da == db,
        _ => false,
    }
}

fn file_digest(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}
