//! The offline asset pipeline: TTF sources in, `assets/` out.
//!
//! A run is strictly sequential. The compressor precondition is checked
//! before anything touches the output directory, every source font is loaded
//! and validated up front, and all outputs are staged in a hidden directory
//! inside `out_dir`. They replace the previous contents only once every
//! variant converted successfully, so a failed run leaves `out_dir` as it
//! was. Bundle files from earlier runs that this run did not produce are
//! removed.

use std::path::{Path, PathBuf};

use gofontweb_traits::AssetBundle;

use crate::convert::{Compressor, FontConverter, WOFF2_COMPRESS};
use crate::error::PipelineError;
use crate::manifest::is_bundle_asset;
use crate::stylesheet::{STYLESHEET_NAME, StylesheetGenerator};
use crate::variant::{FontVariant, GO_VARIANTS};

pub use crate::manifest::LICENSE_NAME;

/// The Go fonts license shipped with every generated bundle.
pub const GO_FONTS_LICENSE: &str = include_str!("../LICENSE.txt");

/// Default output directory, the one embedded by the library build.
pub const DEFAULT_OUT_DIR: &str = "assets";

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding `<variant>.ttf` for every variant.
    pub source_dir: PathBuf,
    /// Directory receiving `go.css`, `LICENSE.txt` and the `.woff2` files.
    pub out_dir: PathBuf,
    /// Compressor executable, a bare name searched on `PATH` or a path.
    pub tool: PathBuf,
    /// Variant names in stylesheet order.
    pub variants: Vec<String>,
    /// License text written as `LICENSE.txt`.
    pub license: String,
}

impl PipelineConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            tool: PathBuf::from(WOFF2_COMPRESS),
            variants: GO_VARIANTS.iter().map(|name| name.to_string()).collect(),
            license: GO_FONTS_LICENSE.to_string(),
        }
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Paths of the written `.woff2` files, in variant order.
    pub fonts: Vec<PathBuf>,
    pub stylesheet: PathBuf,
    pub license: PathBuf,
    /// Snapshot of the bundle files in the output directory.
    pub bundle: AssetBundle,
}

/// Runs the conversion and stylesheet generation with a given compressor.
pub struct AssetPipeline<'a, C: Compressor + ?Sized> {
    config: &'a PipelineConfig,
    compressor: &'a C,
}

impl<'a, C: Compressor + ?Sized> AssetPipeline<'a, C> {
    pub fn new(config: &'a PipelineConfig, compressor: &'a C) -> Self {
        Self { config, compressor }
    }

    pub fn run(&self) -> Result<PipelineOutput, PipelineError> {
        self.compressor.ensure_available()?;
        log::info!(
            "Converting {} fonts from {} with {}",
            self.config.variants.len(),
            self.config.source_dir.display(),
            self.compressor.name()
        );

        let variants = self
            .config
            .variants
            .iter()
            .map(|name| FontVariant::load(&self.config.source_dir, name))
            .collect::<Result<Vec<_>, _>>()?;

        let workdir = tempfile::Builder::new()
            .prefix("gofontweb-convert-")
            .tempdir()
            .map_err(PipelineError::write(std::env::temp_dir()))?;
        let out_dir = self.config.out_dir.as_path();
        std::fs::create_dir_all(out_dir).map_err(PipelineError::write(out_dir))?;
        let staging = tempfile::Builder::new()
            .prefix(".gofontweb-staging-")
            .tempdir_in(out_dir)
            .map_err(PipelineError::write(out_dir))?;

        let converter = FontConverter::new(self.compressor, workdir.path(), staging.path());
        let mut stylesheet = StylesheetGenerator::new()?;
        let mut produced = Vec::with_capacity(variants.len() + 2);
        for variant in &variants {
            converter.convert(variant)?;
            stylesheet.push(variant)?;
            produced.push(variant.asset_name());
        }
        write_file(staging.path(), LICENSE_NAME, self.config.license.as_bytes())?;
        write_file(staging.path(), STYLESHEET_NAME, stylesheet.finish().as_bytes())?;
        produced.push(LICENSE_NAME.to_string());
        // Last, so go.css never lands before the fonts it references.
        produced.push(STYLESHEET_NAME.to_string());

        for name in &produced {
            let target = out_dir.join(name);
            std::fs::rename(staging.path().join(name), &target)
                .map_err(PipelineError::write(&target))?;
        }
        staging.close().map_err(PipelineError::write(out_dir))?;
        remove_stale(out_dir, &produced)?;
        log::info!(
            "Wrote {} and {} fonts to {}",
            STYLESHEET_NAME,
            variants.len(),
            out_dir.display()
        );

        let bundle = gofontweb_resource::load_dir_with(out_dir, is_bundle_asset)?;
        Ok(PipelineOutput {
            fonts: variants
                .iter()
                .map(|variant| out_dir.join(variant.asset_name()))
                .collect(),
            stylesheet: out_dir.join(STYLESHEET_NAME),
            license: out_dir.join(LICENSE_NAME),
            bundle,
        })
    }
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<(), PipelineError> {
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(PipelineError::write(&path))
}

/// Deletes bundle files this run did not produce. Anything else found in
/// `out_dir` is left alone but reported, since the embedding build skips it.
fn remove_stale(out_dir: &Path, produced: &[String]) -> Result<(), PipelineError> {
    let files = gofontweb_resource::collect_files(out_dir).map_err(|e| PipelineError::Read {
        path: out_dir.to_path_buf(),
        source: e,
    })?;
    for (name, path) in files {
        if produced.contains(&name) {
            continue;
        }
        if is_bundle_asset(&name) {
            std::fs::remove_file(&path).map_err(PipelineError::write(&path))?;
            log::warn!("Removed stale {} from {}", name, out_dir.display());
        } else {
            log::warn!("Ignoring {} in {}: not a bundle file", name, out_dir.display());
        }
    }
    Ok(())
}

/// Runs the pipeline described by `config` with the given compressor.
pub fn run_pipeline<C: Compressor + ?Sized>(
    config: &PipelineConfig,
    compressor: &C,
) -> Result<PipelineOutput, PipelineError> {
    AssetPipeline::new(config, compressor).run()
}
