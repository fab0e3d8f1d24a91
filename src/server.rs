use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::database::store::Store;
use crate::database::PgStore;
use crate::handlers::{self, unknown_route, AppState};
use crate::middleware::handle_panic;

/// Build the full router. Unknown paths, and unknown verbs on known paths,
/// fall through to the same 404.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health).fallback(unknown_route))
        .route("/api", get(handlers::list_tables).fallback(unknown_route))
        .route("/api/topics", get(handlers::list_topics).fallback(unknown_route))
        .route("/api/users", get(handlers::list_users).fallback(unknown_route))
        .route("/api/articles", get(handlers::list_articles).fallback(unknown_route))
        .route(
            "/api/articles/:article_id",
            get(handlers::get_article)
                .patch(handlers::patch_article)
                .fallback(unknown_route),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(handlers::list_comments)
                .post(handlers::post_comment)
                .fallback(unknown_route),
        )
        .fallback(unknown_route)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_api=info,tower_http=info"));
    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Entry point for the `news-api` binary
pub async fn run() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = crate::config::config();
    info!("Starting News API in {:?} mode", config.environment);

    let store = Arc::new(PgStore::connect_lazy(&config.database).context("failed to configure database pool")?);
    let state = AppState::new(store.clone() as Arc<dyn Store>);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("News API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    info!("News API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
