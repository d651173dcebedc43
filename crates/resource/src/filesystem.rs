//! Filesystem-based asset provider for native platforms.
//!
//! This provider reads assets straight from a directory, which is handy
//! while iterating on the generator output without rebuilding the embedded
//! bundle.
//!
//! # Security
//!
//! The provider validates that all resolved paths remain within the base path
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use gofontweb_traits::{Asset, AssetError, AssetProvider, normalize_asset_path};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::walk::collect_files;

/// An asset provider that loads assets from the local filesystem.
///
/// Every `open` reads the file again, so changes on disk are visible
/// immediately. Use [`crate::load_dir`] for a frozen snapshot instead.
#[derive(Debug)]
pub struct FilesystemAssetProvider {
    base_path: PathBuf,
    /// Canonicalized base path for security checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemAssetProvider {
    /// Creates a new filesystem asset provider rooted at `base_path`.
    ///
    /// The base path is canonicalized to enable security checks.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Returns the base path for this provider.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves and validates an asset path relative to the base path.
    ///
    /// Returns `None` if the path would escape the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = normalize_asset_path(path)?;
        let full_path = self.base_path.join(&relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            // Symlinks pointing outside the root are rejected too.
            return canonical.starts_with(base).then_some(canonical);
        }

        Some(full_path)
    }
}

impl AssetProvider for FilesystemAssetProvider {
    fn open(&self, path: &str) -> Result<Asset, AssetError> {
        let full_path = self.resolve_path_safe(path).ok_or_else(|| {
            log::debug!("Blocked asset path outside of {}: {}", self.base_path.display(), path);
            AssetError::NotFound(format!("{} (path traversal blocked)", path))
        })?;

        if full_path.is_dir() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        std::fs::read(&full_path)
            .map(|bytes| Asset::new(normalize_asset_path(path).unwrap_or_default(), Arc::from(bytes)))
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AssetError::NotFound(path.to_string())
                } else {
                    AssetError::Io(format!("{}: {}", path, e))
                }
            })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn names(&self) -> Vec<String> {
        match collect_files(&self.base_path) {
            Ok(files) => files.into_iter().map(|(name, _)| name).collect(),
            Err(e) => {
                log::warn!("Cannot list assets in {}: {}", self.base_path.display(), e);
                Vec::new()
            }
        }
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetProvider"
    }
}
