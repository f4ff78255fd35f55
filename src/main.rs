use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use pathsearch::config;
use pathsearch::search::{ConcatenatedIndex, PathSearchService, SearchSettings};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathsearch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config()?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Index is built once, before serving / 启动前一次性建立索引
    let paths = app_config.load_index_paths()?;
    let service = PathSearchService::new(paths, SearchSettings::from(&app_config.search))?;
    tracing::info!(
        "Path index ready: {} documents, {} terms",
        service.stats().document_count,
        service.stats().term_count
    );

    let concatenated = ConcatenatedIndex::sample()?;

    let state = Arc::new(AppState {
        service,
        concatenated,
    });

    let app = api::router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
