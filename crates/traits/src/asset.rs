//! AssetProvider trait and the immutable in-memory asset bundle.
//!
//! Runtime consumers (for instance an HTTP static file server) look up
//! generated font assets by relative name through [`AssetProvider`] without
//! knowing whether the bytes come from the embedded bundle or from disk.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Component, Path};
use std::sync::Arc;
use thiserror::Error;

/// Error type for asset lookups and bundle assembly.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset path '{0}': must be a relative path inside the bundle root")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::Io(err.to_string())
    }
}

/// Shared asset content (reference-counted bytes).
pub type SharedAssetData = Arc<[u8]>;

/// Metadata reported alongside the content of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMetadata {
    /// Relative name the asset was opened with.
    pub name: String,
    /// Content length in bytes.
    pub len: u64,
    /// MIME type derived from the file extension.
    pub content_type: &'static str,
}

/// One looked-up asset: its bytes and metadata.
#[derive(Debug, Clone)]
pub struct Asset {
    pub data: SharedAssetData,
    pub metadata: AssetMetadata,
}

impl Asset {
    pub fn new(name: impl Into<String>, data: SharedAssetData) -> Self {
        let name = name.into();
        let metadata = AssetMetadata {
            content_type: content_type_for(&name),
            len: data.len() as u64,
            name,
        };
        Self { data, metadata }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Maps an asset name to the MIME type a web server should send for it.
pub fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("css") => "text/css; charset=utf-8",
        Some("woff2") => "font/woff2",
        Some("woff") => "font/woff",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Normalizes a lookup name into the bundle's key form.
///
/// Returns `None` for empty names, absolute paths and anything with a `..`
/// component. `.` components are dropped and separators become `/`.
pub fn normalize_asset_path(path: &str) -> Option<String> {
    if path.is_empty() || path.starts_with('/') || Path::new(path).is_absolute() {
        return None;
    }

    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// A read-only source of named assets.
///
/// # Implementations
///
/// - `AssetBundle`: immutable in-memory bundle (embedded or loaded once)
/// - `FilesystemAssetProvider`: reads straight from a directory (gofontweb-resource)
pub trait AssetProvider: Send + Sync + Debug {
    /// Open an asset by its relative name.
    ///
    /// Absent names are reported as [`AssetError::NotFound`]; this is a
    /// normal result, not a failure of the provider.
    fn open(&self, path: &str) -> Result<Asset, AssetError>;

    /// Check if an asset exists.
    fn exists(&self, path: &str) -> bool;

    /// All asset names, sorted.
    fn names(&self) -> Vec<String>;

    /// Get the base path for resolving relative assets.
    ///
    /// Returns `None` if the provider doesn't use path-based resolution.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// The packaged, read-only collection of generated assets.
///
/// An `AssetBundle` is assembled once through [`AssetBundleBuilder`] and never
/// changes afterwards, so it can be shared across threads behind an `Arc`
/// without any locking.
#[derive(Debug, Default, Clone)]
pub struct AssetBundle {
    assets: BTreeMap<String, SharedAssetData>,
}

impl AssetBundle {
    pub fn builder() -> AssetBundleBuilder {
        AssetBundleBuilder::default()
    }

    /// Build a bundle from `(name, bytes)` pairs, e.g. a table of
    /// `include_bytes!` entries.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::InvalidPath` if any name is not a clean relative path.
    pub fn from_static(entries: &[(&str, &'static [u8])]) -> Result<Self, AssetError> {
        let mut builder = Self::builder();
        for (name, bytes) in entries {
            builder.add(*name, Arc::from(*bytes))?;
        }
        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over `(name, bytes)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedAssetData)> {
        self.assets.iter().map(|(name, data)| (name.as_str(), data))
    }
}

impl AssetProvider for AssetBundle {
    fn open(&self, path: &str) -> Result<Asset, AssetError> {
        let key = normalize_asset_path(path).ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        self.assets
            .get(&key)
            .map(|data| Asset::new(key.clone(), Arc::clone(data)))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        normalize_asset_path(path)
            .map(|key| self.assets.contains_key(&key))
            .unwrap_or(false)
    }

    fn names(&self) -> Vec<String> {
        self.assets.keys().cloned().collect()
    }

    fn name(&self) -> &'static str {
        "AssetBundle"
    }
}

/// Collects assets before freezing them into an [`AssetBundle`].
#[derive(Debug, Default)]
pub struct AssetBundleBuilder {
    assets: BTreeMap<String, SharedAssetData>,
}

impl AssetBundleBuilder {
    /// Add an asset under a relative name. A later add with the same name
    /// replaces the earlier content.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::InvalidPath` for empty, absolute or `..` names.
    pub fn add(
        &mut self,
        path: impl AsRef<str>,
        data: SharedAssetData,
    ) -> Result<&mut Self, AssetError> {
        let path = path.as_ref();
        let key =
            normalize_asset_path(path).ok_or_else(|| AssetError::InvalidPath(path.to_string()))?;
        self.assets.insert(key, data);
        Ok(self)
    }

    pub fn build(self) -> AssetBundle {
        AssetBundle {
            assets: self.assets,
        }
    }
}
