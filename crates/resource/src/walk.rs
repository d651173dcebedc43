use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively lists regular files under `root` as `(relative name, path)`,
/// sorted by name. Relative names always use `/` separators.
///
/// Symlinks are not followed.
pub fn collect_files(root: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = relative_name(root, entry.path()) else {
            log::warn!("Skipping non UTF-8 asset path {}", entry.path().display());
            continue;
        };
        files.push((name, entry.into_path()));
    }

    // Per-directory ordering differs from full-name ordering once names nest.
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_files_nested_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fonts/mono")).unwrap();
        fs::write(dir.path().join("go.css"), b"css").unwrap();
        fs::write(dir.path().join("fonts/mono/Go-Mono.woff2"), b"m").unwrap();
        fs::write(dir.path().join("fonts/Go-Bold.woff2"), b"b").unwrap();

        let names: Vec<String> = collect_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            ["fonts/Go-Bold.woff2", "fonts/mono/Go-Mono.woff2", "go.css"]
        );
    }

    #[test]
    fn test_collect_files_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let err = collect_files(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_symlinks() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), b"s").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        fs::write(dir.path().join("go.css"), b"css").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "go.css");
    }
}
