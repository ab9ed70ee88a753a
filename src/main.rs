use signal_analysis::analysis::gateway::WebhookAnalysisGateway;
use signal_analysis::config::AppConfig;
use signal_analysis::http::router::build_router;
use signal_analysis::source::synthetic::SyntheticSignalSource;
use signal_analysis::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let source = Arc::new(SyntheticSignalSource::new(cfg.base_delay()));
    let gateway = Arc::new(WebhookAnalysisGateway::new(
        cfg.webhook_url.clone(),
        cfg.webhook_timeout(),
    ));
    tracing::info!(webhook_url = %cfg.webhook_url, "analysis webhook configured");

    let state = AppState::new(cfg.clone(), source, gateway);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
