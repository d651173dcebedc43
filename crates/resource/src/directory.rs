//! Snapshotting a directory into an immutable [`AssetBundle`].

use gofontweb_traits::{AssetBundle, AssetError};
use std::path::Path;
use std::sync::Arc;

use crate::walk::collect_files;

/// Reads every regular file under `dir` into a new [`AssetBundle`], keyed by
/// its path relative to `dir`.
///
/// Symlinks are not followed.
///
/// # Errors
///
/// Returns `AssetError::NotFound` if `dir` does not exist and
/// `AssetError::Io` for any other read failure.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<AssetBundle, AssetError> {
    load_dir_with(dir, |_| true)
}

/// Like [`load_dir`], but only bundles files whose relative name passes
/// `include`.
pub fn load_dir_with<P, F>(dir: P, include: F) -> Result<AssetBundle, AssetError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> bool,
{
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(AssetError::NotFound(dir.display().to_string()));
    }

    let mut builder = AssetBundle::builder();
    for (name, path) in collect_files(dir)? {
        if !include(&name) {
            log::debug!("Not bundling {}", name);
            continue;
        }
        let bytes = std::fs::read(&path)?;
        log::debug!("Bundling {} ({} bytes)", name, bytes.len());
        builder.add(name, Arc::from(bytes))?;
    }

    let bundle = builder.build();
    log::info!("Loaded {} assets from {}", bundle.len(), dir.display());
    Ok(bundle)
}
