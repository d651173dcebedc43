//! Embeds the generated `assets/` directory into the library.
//!
//! Writes `$OUT_DIR/embedded_assets.rs`, a sorted table of
//! `(name, include_bytes!(..))` entries for the bundle files in `assets/`
//! (`go.css`, `LICENSE.txt` and every `*.woff2`). The build fails if the
//! embedded `go.css` references a font that is not there.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "src/manifest.rs"]
mod manifest;

const ASSET_DIR: &str = "assets";

fn main() -> io::Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?);
    let asset_dir = manifest_dir.join(ASSET_DIR);
    println!("cargo:rerun-if-changed={}", asset_dir.display());
    println!("cargo:rerun-if-changed=src/manifest.rs");

    let entries = embeddable_files(&asset_dir)?;
    check_stylesheet(&entries)?;

    let mut table = String::from("pub(crate) static EMBEDDED_ASSETS: &[(&str, &[u8])] = &[\n");
    for (name, path) in &entries {
        println!("cargo:rerun-if-changed={}", path.display());
        table.push_str(&format!(
            "    ({:?}, include_bytes!({:?})),\n",
            name,
            path.display().to_string()
        ));
    }
    table.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(io::Error::other)?);
    fs::write(out_dir.join("embedded_assets.rs"), table)
}

fn embeddable_files(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    manifest::bundle_files(dir)
}

fn check_stylesheet(entries: &[(String, PathBuf)]) -> io::Result<()> {
    let Some((_, path)) = entries
        .iter()
        .find(|(name, _)| name == manifest::STYLESHEET_NAME)
    else {
        return Ok(());
    };

    let css = fs::read_to_string(path)?;
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    let missing = manifest::missing_references(&css, &names);
    if missing.is_empty() {
        return Ok(());
    }
    Err(io::Error::other(format!(
        "{} references fonts missing from {}: {}; run gofontweb-gen to regenerate the bundle",
        path.display(),
        ASSET_DIR,
        missing.join(", ")
    )))
}
