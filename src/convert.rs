//! TTF to WOFF2 conversion through an external compressor.
//!
//! The compressor itself is a [`Compressor`] collaborator. Production code
//! uses [`Woff2Compress`], which spawns Google's `woff2_compress`; tests plug
//! in fakes.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempPath;

use crate::error::{PipelineError, WOFF2_SOURCE_HINT};
use crate::variant::{FontVariant, WOFF2_EXTENSION};

/// Default compressor executable, looked up on `PATH`.
pub const WOFF2_COMPRESS: &str = "woff2_compress";

/// Turns an uncompressed font file into a sibling compressed file.
pub trait Compressor {
    /// Compresses `ttf_path` and returns the path of the produced file, which
    /// must sit next to the input with the same stem and the `woff2`
    /// extension.
    fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError>;

    /// Fails fast when the compressor cannot run at all.
    fn ensure_available(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Returns a human-readable name for this compressor (for logging).
    fn name(&self) -> &str;
}

/// Runs `woff2_compress <file>` inside the input's directory.
#[derive(Debug, Clone)]
pub struct Woff2Compress {
    program: PathBuf,
}

impl Woff2Compress {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn display_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for Woff2Compress {
    fn default() -> Self {
        Self::new(WOFF2_COMPRESS)
    }
}

impl Compressor for Woff2Compress {
    fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError> {
        let workdir = ttf_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = ttf_path.file_name().unwrap_or_else(|| OsStr::new(""));
        let font = ttf_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let program = find_executable(&self.program).ok_or_else(|| self.not_found())?;
        log::debug!("Running {} {:?} in {}", program.display(), file_name, workdir.display());
        let output = Command::new(&program)
            .arg(file_name)
            .current_dir(workdir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{}: {}", self.display_name(), stdout.trim());
        }
        if !output.status.success() {
            return Err(PipelineError::ToolFailed {
                tool: self.display_name(),
                font,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let compressed = ttf_path.with_extension(WOFF2_EXTENSION);
        if !compressed.is_file() {
            return Err(PipelineError::MissingOutput {
                tool: self.display_name(),
                path: compressed,
            });
        }
        Ok(compressed)
    }

    fn ensure_available(&self) -> Result<(), PipelineError> {
        find_executable(&self.program)
            .map(|_| ())
            .ok_or_else(|| self.not_found())
    }

    fn name(&self) -> &str {
        self.program.to_str().unwrap_or(WOFF2_COMPRESS)
    }
}

impl Woff2Compress {
    fn not_found(&self) -> PipelineError {
        PipelineError::ToolNotFound {
            tool: self.display_name(),
            hint: WOFF2_SOURCE_HINT,
        }
    }
}

/// Resolves `program` to an executable file.
///
/// Bare names are searched on `PATH`; anything with a directory component is
/// checked as given.
pub fn find_executable(program: &Path) -> Option<PathBuf> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.components().count() > 1 || program.is_absolute() {
        // Relative paths must survive the child's changed working directory.
        return is_executable(program)
            .then(|| std::path::absolute(program).unwrap_or_else(|_| program.to_path_buf()));
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Converts variants one at a time, sharing a work directory.
pub struct FontConverter<'a, C: Compressor + ?Sized> {
    compressor: &'a C,
    workdir: &'a Path,
    destination: &'a Path,
}

impl<'a, C: Compressor + ?Sized> FontConverter<'a, C> {
    pub fn new(compressor: &'a C, workdir: &'a Path, destination: &'a Path) -> Self {
        Self {
            compressor,
            workdir,
            destination,
        }
    }

    /// Converts one variant and stores `<destination>/<name>.woff2`.
    ///
    /// Intermediate files in the work directory are removed on every exit
    /// path. The destination file only appears once it has been written
    /// completely.
    pub fn convert(&self, variant: &FontVariant) -> Result<PathBuf, PipelineError> {
        let ttf_path = self.workdir.join(format!("{}.ttf", variant.name()));
        std::fs::write(&ttf_path, variant.ttf()).map_err(PipelineError::write(&ttf_path))?;
        let _ttf_guard = TempPath::from_path(&ttf_path);
        // Registered before compressing so a failing tool's leftovers go too.
        let _woff2_guard = TempPath::from_path(ttf_path.with_extension(WOFF2_EXTENSION));

        let compressed = self.compressor.compress(&ttf_path)?;
        let _compressed_guard = TempPath::from_path(&compressed);

        let target = self.destination.join(variant.asset_name());
        let written = copy_atomically(&compressed, &target)?;

        log::info!(
            "Converted {} ({} -> {} bytes)",
            variant.name(),
            variant.ttf().len(),
            written
        );
        Ok(target)
    }
}

/// Copies `source` to `target` through a temporary file in the target's
/// directory, so a failed copy never leaves a partial `target` behind.
/// Returns the number of bytes written.
///
/// The result gets the same permissions as any other newly created file
/// (`0o666` less the umask on unix), not the owner-only default of
/// temporary files.
fn copy_atomically(source: &Path, target: &Path) -> Result<u64, PipelineError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut input = std::fs::File::open(source).map_err(|e| PipelineError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut staged = builder
        .tempfile_in(dir)
        .map_err(PipelineError::write(target))?;

    let written = std::io::copy(&mut input, &mut staged).map_err(PipelineError::write(target))?;
    staged.flush().map_err(PipelineError::write(target))?;
    staged
        .persist(target)
        .map_err(|e| PipelineError::write(target)(e.error))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Writes the input bytes reversed as the "compressed" output.
    struct ReversingCompressor {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl Compressor for ReversingCompressor {
        fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError> {
            self.seen.borrow_mut().push(ttf_path.to_path_buf());
            let mut bytes = std::fs::read(ttf_path)?;
            bytes.reverse();
            let out = ttf_path.with_extension("woff2");
            std::fs::write(&out, bytes)?;
            Ok(out)
        }

        fn name(&self) -> &str {
            "reversing"
        }
    }

    /// Leaves a partial output and then fails.
    struct BrokenCompressor;

    impl Compressor for BrokenCompressor {
        fn compress(&self, ttf_path: &Path) -> Result<PathBuf, PipelineError> {
            std::fs::write(ttf_path.with_extension("woff2"), b"partial")?;
            Err(PipelineError::MissingOutput {
                tool: "broken".to_string(),
                path: ttf_path.with_extension("woff2"),
            })
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn variant() -> FontVariant {
        FontVariant::new("Go-Bold", vec![1, 2, 3, 4]).unwrap()
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_convert_writes_asset_and_cleans_workdir() {
        let work = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let compressor = ReversingCompressor {
            seen: RefCell::new(Vec::new()),
        };

        let target = FontConverter::new(&compressor, work.path(), dest.path())
            .convert(&variant())
            .unwrap();

        assert_eq!(target, dest.path().join("Go-Bold.woff2"));
        assert_eq!(std::fs::read(&target).unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(compressor.seen.borrow().as_slice(), [work.path().join("Go-Bold.ttf")]);
        assert!(dir_is_empty(work.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_converted_font_is_readable_like_other_files() {
        use std::os::unix::fs::PermissionsExt;
        let work = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let compressor = ReversingCompressor {
            seen: RefCell::new(Vec::new()),
        };

        let target = FontConverter::new(&compressor, work.path(), dest.path())
            .convert(&variant())
            .unwrap();
        let plain = dest.path().join("go.css");
        std::fs::write(&plain, b"css").unwrap();

        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&target), mode(&plain));
    }

    #[test]
    fn test_failed_conversion_leaves_nothing_behind() {
        let work = tempdir().unwrap();
        let dest = tempdir().unwrap();

        let result = FontConverter::new(&BrokenCompressor, work.path(), dest.path()).convert(&variant());

        assert!(matches!(result, Err(PipelineError::MissingOutput { .. })));
        assert!(dir_is_empty(work.path()));
        assert!(dir_is_empty(dest.path()));
    }

    #[test]
    fn test_convert_fails_for_missing_destination() {
        let work = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let missing = dest.path().join("missing");
        let compressor = ReversingCompressor {
            seen: RefCell::new(Vec::new()),
        };

        let result = FontConverter::new(&compressor, work.path(), &missing).convert(&variant());

        assert!(matches!(result, Err(PipelineError::Write { .. })));
        assert!(dir_is_empty(work.path()));
    }

    #[test]
    fn test_missing_tool_is_reported_with_hint() {
        let tool = Woff2Compress::new("gofontweb-no-such-woff2-compressor");
        let err = tool.ensure_available().unwrap_err();
        assert!(matches!(err, PipelineError::ToolNotFound { .. }));
        assert!(err.to_string().contains("https://github.com/google/woff2"));
    }

    #[test]
    fn test_missing_tool_path_is_reported() {
        let dir = tempdir().unwrap();
        let tool = Woff2Compress::new(dir.path().join("woff2_compress"));
        assert!(matches!(
            tool.ensure_available(),
            Err(PipelineError::ToolNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_not_a_tool() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("woff2_compress");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        assert_eq!(find_executable(&path), None);
    }

    #[test]
    fn test_find_executable_rejects_empty_name() {
        assert_eq!(find_executable(Path::new("")), None);
    }
}
