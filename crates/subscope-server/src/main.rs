mod api;
mod middleware;

use std::sync::Arc;

use subscope_analysis::{FeedClient, ModelClient};
use subscope_core::SubjectProfiles;
use subscope_store::JsonStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = subscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let feeds = FeedClient::new(&config.user_agent, config.feed_timeout_secs)?;
    let model = config
        .model
        .as_ref()
        .map(ModelClient::new)
        .transpose()?
        .map(Arc::new);
    if model.is_none() {
        tracing::info!("OPENAI_API_KEY not set; reports use heuristic extractors only");
    }

    let state = AppState {
        store: Arc::new(JsonStore::new(&config.data_dir)),
        profiles: Arc::new(SubjectProfiles::builtin()?),
        feeds: Arc::new(feeds),
        model,
        max_posts: config.max_posts,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        data_dir = %config.data_dir.display(),
        "subscope-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where available. A signal listener that
/// cannot be installed is logged and never resolves.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c listener unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("interrupt received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
