//! Which files make up the bundle.
//!
//! Shared by the library and `build.rs`, so the bundle a pipeline run returns
//! and the bundle compiled into the crate are picked from a directory the
//! same way. Only `std` and `gofontweb_resource` may be used here.

use std::io;
use std::path::{Path, PathBuf};

/// Name of the generated stylesheet.
pub const STYLESHEET_NAME: &str = "go.css";

/// Name of the license file inside the bundle.
pub const LICENSE_NAME: &str = "LICENSE.txt";

/// Extension of compressed font assets.
pub const WOFF2_EXTENSION: &str = "woff2";

/// True for top-level `go.css`, `LICENSE.txt` and `*.woff2` names.
pub fn is_bundle_asset(name: &str) -> bool {
    if name.contains('/') {
        return false;
    }
    name == STYLESHEET_NAME
        || name == LICENSE_NAME
        || Path::new(name).extension().and_then(|ext| ext.to_str()) == Some(WOFF2_EXTENSION)
}

/// Bundle files in `dir` as sorted `(name, path)` pairs.
///
/// # Errors
///
/// Fails if `dir` cannot be listed, including when it does not exist.
pub fn bundle_files(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut files = gofontweb_resource::collect_files(dir)?;
    files.retain(|(name, _)| is_bundle_asset(name));
    Ok(files)
}

/// Targets of every `url(...)` in a stylesheet, in order.
pub fn stylesheet_references(css: &str) -> Vec<&str> {
    css.split("url(")
        .skip(1)
        .filter_map(|rest| rest.split_once(')'))
        .map(|(target, _)| target.trim().trim_matches(|c: char| c == '"' || c == '\''))
        .collect()
}

/// Stylesheet references with no matching entry in `names`.
pub fn missing_references<S: AsRef<str>>(css: &str, names: &[S]) -> Vec<String> {
    stylesheet_references(css)
        .into_iter()
        .filter(|target| !names.iter().any(|name| name.as_ref() == *target))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::render_stylesheet;
    use crate::variant::GO_VARIANTS;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_bundle_asset() {
        assert!(is_bundle_asset("go.css"));
        assert!(is_bundle_asset("LICENSE.txt"));
        assert!(is_bundle_asset("Go-Mono-Bold-Italic.woff2"));
        assert!(!is_bundle_asset("notes.md"));
        assert!(!is_bundle_asset("Go-Regular.ttf"));
        assert!(!is_bundle_asset("old/Go-Regular.woff2"));
        assert!(!is_bundle_asset("old/go.css"));
    }

    #[test]
    fn test_bundle_files_skips_strays() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("go.css"), b"css").unwrap();
        fs::write(dir.path().join("Go-Bold.woff2"), b"wOF2").unwrap();
        fs::write(dir.path().join("notes.md"), b"notes").unwrap();
        fs::write(dir.path().join("old/Go-Bold.woff2"), b"stale").unwrap();

        let names: Vec<String> = bundle_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["Go-Bold.woff2", "go.css"]);
    }

    #[test]
    fn test_stylesheet_references_in_order() {
        let css = render_stylesheet(["Go-Regular", "Go-Mono-Bold-Italic"]).unwrap();
        assert_eq!(
            stylesheet_references(&css),
            ["Go-Regular.woff2", "Go-Mono-Bold-Italic.woff2"]
        );
        assert_eq!(
            stylesheet_references(r#"a{src:url( "x.woff2" )} b{src:url('y.woff2')}"#),
            ["x.woff2", "y.woff2"]
        );
        assert!(stylesheet_references("/* no fonts */").is_empty());
    }

    #[test]
    fn test_stylesheet_without_fonts_is_incomplete() {
        let css = render_stylesheet(GO_VARIANTS).unwrap();
        let missing = missing_references(&css, &["LICENSE.txt", "go.css"]);
        assert_eq!(missing.len(), GO_VARIANTS.len());
        assert_eq!(missing[0], "Go-Regular.woff2");

        let mut names: Vec<String> = GO_VARIANTS.iter().map(|v| format!("{v}.woff2")).collect();
        assert!(missing_references(&css, &names).is_empty());

        names.retain(|name| name != "Go-Smallcaps.woff2");
        assert_eq!(missing_references(&css, &names), ["Go-Smallcaps.woff2"]);
    }
}
