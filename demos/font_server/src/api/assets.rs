use crate::error::Result;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

/// Bundle content never changes for the life of the process.
const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Static file endpoint for the font bundle.
///
/// Answers 404 for absent names and anything outside the bundle root.
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse> {
    let asset = state.assets.open(&path)?;

    tracing::debug!(
        "Serving asset '{}' ({} bytes, {})",
        asset.metadata.name,
        asset.metadata.len,
        asset.metadata.content_type
    );

    Ok((
        [
            (header::CONTENT_TYPE, asset.metadata.content_type),
            (header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL),
        ],
        asset.bytes().to_vec(),
    ))
}
