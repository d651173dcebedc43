//! Go fonts packaged for the web.
//!
//! The crate embeds the Go font family converted to WOFF2, plus a `go.css`
//! stylesheet declaring every face, as a read-only [`AssetBundle`]:
//!
//! ```ignore
//! use gofontweb::{AssetProvider, embedded_bundle};
//!
//! let bundle = std::sync::Arc::new(embedded_bundle()?);
//! let css = bundle.open("go.css")?;
//! ```
//!
//! Mount the bundle under a URL prefix in a static file server and link
//! `go.css` from HTML to get these families:
//!
//! - `Go`
//! - `Go Medium`
//! - `Go Smallcaps`
//! - `Go Mono`
//!
//! The bundle content is produced offline by the `gofontweb-gen` binary
//! (see [`pipeline`]), which needs Google's `woff2_compress` on `PATH`.
//! Until it has run, the bundle only holds `LICENSE.txt`. The build refuses
//! an `assets/go.css` whose fonts are not all present.

pub mod convert;
pub mod embedded;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod stylesheet;
pub mod variant;

pub use convert::{Compressor, FontConverter, Woff2Compress};
pub use embedded::embedded_bundle;
pub use error::PipelineError;
pub use pipeline::{AssetPipeline, PipelineConfig, PipelineOutput, run_pipeline};
pub use stylesheet::{FontFaceRule, StylesheetGenerator, render_stylesheet};
pub use variant::{FaceAttributes, FontStyle, FontVariant, FontWeight, GO_VARIANTS};

pub use gofontweb_traits::{Asset, AssetBundle, AssetError, AssetMetadata, AssetProvider};
