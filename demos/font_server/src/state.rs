use crate::config::Config;
use gofontweb::AssetProvider;
use std::sync::Arc;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only font assets (embedded bundle or a directory on disk)
    pub assets: Arc<dyn AssetProvider>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(assets: Arc<dyn AssetProvider>, config: Config) -> Self {
        Self {
            assets,
            config: Arc::new(config),
        }
    }
}
