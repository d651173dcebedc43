#![allow(dead_code)]

pub mod fixtures;

use gofontweb::{Compressor, PipelineError};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// "Compresses" by prefixing the WOFF2 signature to the input bytes.
#[derive(Default)]
pub struct FakeCompressor {
    pub calls: RefCell<Vec<String>>,
}

impl Compressor for FakeCompressor {
    fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError> {
        let stem = ttf_path.file_stem().unwrap().to_string_lossy().into_owned();
        self.calls.borrow_mut().push(stem);

        let mut bytes = b"wOF2".to_vec();
        bytes.extend(std::fs::read(ttf_path)?);
        let out = ttf_path.with_extension("woff2");
        std::fs::write(&out, bytes)?;
        Ok(out)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Behaves like [`FakeCompressor`] except for one variant, where it fails the
/// way a crashing subprocess would (after leaving a partial file behind).
pub struct FailingCompressor {
    pub fail_on: &'static str,
    pub inner: FakeCompressor,
}

impl FailingCompressor {
    pub fn new(fail_on: &'static str) -> Self {
        Self {
            fail_on,
            inner: FakeCompressor::default(),
        }
    }
}

impl Compressor for FailingCompressor {
    fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError> {
        if ttf_path.file_stem().and_then(|s| s.to_str()) == Some(self.fail_on) {
            std::fs::write(ttf_path.with_extension("woff2"), b"wOF2partial")?;
            return Err(PipelineError::MissingOutput {
                tool: "failing".to_string(),
                path: ttf_path.with_extension("woff2"),
            });
        }
        self.inner.compress(ttf_path)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Reports itself as unavailable and panics if used anyway.
pub struct MissingCompressor;

impl Compressor for MissingCompressor {
    fn compress(&self, _ttf_path: &Path) -> Result<PathBuf, PipelineError> {
        panic!("compress must not run when the tool is unavailable");
    }

    fn ensure_available(&self) -> Result<(), PipelineError> {
        Err(PipelineError::ToolNotFound {
            tool: "woff2_compress".to_string(),
            hint: gofontweb::error::WOFF2_SOURCE_HINT,
        })
    }

    fn name(&self) -> &str {
        "missing"
    }
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
