// src/error.rs
use gofontweb_traits::AssetError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Where to get the compressor when it is missing from the system.
pub const WOFF2_SOURCE_HINT: &str = "you can find woff2_compress source at https://github.com/google/woff2";

/// Errors of the offline asset pipeline. None of them are retried: the inputs
/// are fixed, so a second attempt would fail the same way.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{tool}: executable file not found\n{hint}")]
    ToolNotFound { tool: String, hint: &'static str },

    #[error("{tool} failed on {font} ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        font: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} reported success but produced no {}", .path.display())]
    MissingOutput { tool: String, path: PathBuf },

    #[error("Invalid font data for '{font}': {reason}")]
    InvalidFont { font: String, reason: String },

    #[error("Invalid variant name '{0}': must be a non-empty file stem")]
    InvalidVariantName(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stylesheet template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Stylesheet rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Font-face rule for '{font}' has an empty '{field}' field")]
    IncompleteRule { font: String, field: &'static str },

    #[error("Asset bundle error: {0}")]
    Asset(#[from] AssetError),
}

impl PipelineError {
    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PipelineError::Write { path, source }
    }
}
