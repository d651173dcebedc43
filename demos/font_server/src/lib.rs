//! Example HTTP server consuming the embedded Go fonts bundle.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{routing::get, Router};
use state::AppState;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let asset_route = format!(
        "{}/*path",
        state.config.assets.mount.trim_end_matches('/')
    );

    Router::new()
        .route("/", get(api::index_page))
        .route("/health", get(api::health_check))
        .route(&asset_route, get(api::serve_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
