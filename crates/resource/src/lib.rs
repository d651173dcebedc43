//! Asset providers for gofontweb.
//!
//! This crate provides filesystem-backed implementations around the
//! `AssetProvider` trait from gofontweb-traits.
//!
//! ## Available Providers
//!
//! - [`FilesystemAssetProvider`]: Reads assets from a directory on every lookup
//! - [`load_dir`]: Snapshots a directory into an immutable [`AssetBundle`]
//! - [`collect_files`]: The sorted file listing both of the above are built on
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the bundle types from gofontweb-traits.

mod directory;
mod filesystem;
mod walk;

pub use directory::{load_dir, load_dir_with};
pub use filesystem::FilesystemAssetProvider;
pub use walk::collect_files;

pub use gofontweb_traits::{AssetBundle, AssetProvider};
