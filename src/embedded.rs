//! The asset bundle compiled into this crate.
//!
//! `build.rs` generates the table below from the `assets/` directory that
//! `gofontweb-gen` writes.

use gofontweb_traits::{AssetBundle, AssetError};

include!(concat!(env!("OUT_DIR"), "/embedded_assets.rs"));

/// Builds the embedded bundle.
///
/// Call this once at startup and share the result (e.g. in an `Arc`); the
/// content never changes for the lifetime of the binary.
///
/// # Errors
///
/// Only fails if the generated table contains an invalid name, which the
/// build script never emits.
pub fn embedded_bundle() -> Result<AssetBundle, AssetError> {
    AssetBundle::from_static(EMBEDDED_ASSETS)
}

/// Names of the embedded files, sorted.
pub fn embedded_names() -> impl Iterator<Item = &'static str> {
    EMBEDDED_ASSETS.iter().map(|(name, _)| *name)
}
