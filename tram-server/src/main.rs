use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tram_server::assistant::Assistant;
use tram_server::cache::{CacheConfig, CachedTransit};
use tram_server::config::AppConfig;
use tram_server::tan::{MockTanClient, TanClient, TransitClient};
use tram_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tram_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let transit: Arc<dyn TransitClient> = match &config.mock_dir {
        Some(dir) => {
            let mock = MockTanClient::new(dir)?;
            info!(dir = %dir.display(), stations = mock.station_count(), "using mock TAN data");
            Arc::new(mock)
        }
        None => {
            info!(base_url = %config.tan.base_url, "using live TAN API");
            let live = TanClient::new(config.tan.clone())?;
            Arc::new(CachedTransit::new(Arc::new(live), &CacheConfig::default()))
        }
    };

    let assistant = Assistant::new(transit)
        .with_paging(config.paging)
        .with_nearby_origin(config.nearby_origin);
    let app = create_router(AppState::new(assistant));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        addr = %config.bind,
        paging = %config.paging,
        "Tram assistant webhook listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
