use font_server::{build_router, config::Config, state::AppState};
use gofontweb::AssetProvider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    // Built once and shared read-only by every request
    let assets: Arc<dyn AssetProvider> = match &config.assets.dir {
        Some(dir) => {
            tracing::info!("Serving assets from {}", dir.display());
            Arc::new(gofontweb_resource::FilesystemAssetProvider::new(dir))
        }
        None => Arc::new(gofontweb::embedded_bundle()?),
    };
    let asset_count = assets.names().len();
    if !assets.exists("go.css") {
        tracing::warn!("go.css is missing; run gofontweb-gen and rebuild");
    }

    let addr = config.bind_address();
    let mount = config.assets.mount.clone();
    let app = build_router(AppState::new(assets, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("{} assets mounted at {}/", asset_count, mount.trim_end_matches('/'));
    tracing::info!("navigate to http://{}/", local_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,font_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
