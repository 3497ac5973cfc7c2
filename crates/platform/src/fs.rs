#![allow(clippy::module_name_repetitions)]

//! Filesystem helpers for staging and replacing directory trees.
//!
//! These functions return `sitebuild_errors::Error` with the offending path
//! attached so the CLI can report something actionable.

use sitebuild_errors::{Error, StorageError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, sitebuild_errors::Error>;

fn storage_error(err: &std::io::Error, path: &Path) -> Error {
    StorageError::from_io_with_path(err, path).into()
}

/// Check if a path exists
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Check if a path exists and is a directory
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// Recursively copy a directory
///
/// # Errors
///
/// Returns an error if:
/// - Creating the destination directory fails
/// - Reading the source directory fails
/// - Copying any file or subdirectory fails
pub async fn copy_directory(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .map_err(|e| storage_error(&e, dst))?;

    let mut entries = fs::read_dir(src).await.map_err(|e| storage_error(&e, src))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| storage_error(&e, src))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        let metadata = fs::metadata(&src_path)
            .await
            .map_err(|e| storage_error(&e, &src_path))?;
        if metadata.is_dir() {
            Box::pin(copy_directory(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.map_err(|e| {
                Error::from(StorageError::CopyFailed {
                    source_path: src_path.display().to_string(),
                    destination: dst_path.display().to_string(),
                    message: e.to_string(),
                })
            })?;
        }
    }

    Ok(())
}

/// Remove a directory and all its contents
///
/// A missing directory is not an error. Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(storage_error(&e, path)),
    }
}

/// Rename a file or directory
///
/// # Errors
///
/// Returns an error if:
/// - The rename operation fails (permissions, cross-device, etc.)
pub async fn rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).await.map_err(|e| {
        StorageError::RenameFailed {
            message: format!("{} -> {}: {e}", src.display(), dst.display()),
        }
        .into()
    })
}

/// Sibling path formed by appending `suffix` to the final component
///
/// `/site/out` with `.tmp` becomes `/site/out.tmp`.
#[must_use]
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Create the parent of `path` if it is missing
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| storage_error(&e, parent))?;
    }
    Ok(())
}

/// Replace `target` with the directory at `staging`
///
/// The previous `target` is parked at `backup` until `staging` has been
/// renamed into place, and restored if that rename fails. A stale `backup`
/// from an interrupted run is removed first.
///
/// # Errors
///
/// Returns an error if any rename fails. When the final rename fails the
/// previous `target` has already been restored.
pub async fn replace_directory(staging: &Path, target: &Path, backup: &Path) -> Result<()> {
    if remove_dir_all(backup).await? {
        tracing::warn!(path = %backup.display(), "removed stale backup directory");
    }

    let had_previous = exists(target).await;
    if had_previous {
        rename(target, backup).await?;
    }

    if let Err(err) = rename(staging, target).await {
        if had_previous {
            if let Err(restore_err) = rename(backup, target).await {
                tracing::error!(
                    path = %target.display(),
                    error = %restore_err,
                    "failed to restore previous directory"
                );
            }
        }
        return Err(err);
    }

    if had_previous {
        remove_dir_all(backup).await?;
    }
    Ok(())
}
