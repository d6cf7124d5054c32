//! Base directory resolution
//!
//! The compose file and secrets file live next to the stackctl binary, so
//! every orchestrator call is anchored to that directory instead of the
//! caller's working directory.

use crate::error::{Result, StackctlError};
use std::path::{Path, PathBuf};

/// Resolve the directory orchestrator calls run in.
///
/// An explicit override wins; otherwise the directory containing the running
/// executable is used. The result is canonicalized and must be a directory.
pub fn resolve_base_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let candidate = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => exe_dir()?,
    };

    let canonical = candidate
        .canonicalize()
        .map_err(|e| StackctlError::BaseDir {
            path: candidate.clone(),
            reason: e.to_string(),
        })?;

    if !canonical.is_dir() {
        return Err(StackctlError::BaseDir {
            path: canonical,
            reason: "not a directory".to_string(),
        });
    }

    Ok(canonical)
}

fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| StackctlError::BaseDir {
        path: PathBuf::from("<current executable>"),
        reason: e.to_string(),
    })?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| StackctlError::BaseDir {
            path: exe.clone(),
            reason: "executable has no parent directory".to_string(),
        })
}

/// Resolve `path` against `base_dir` unless it is already absolute
pub fn anchor(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
