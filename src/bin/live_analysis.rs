use anyhow::Result;
use futures::StreamExt;
use signal_analysis::analysis::gateway::WebhookAnalysisGateway;
use signal_analysis::config::AppConfig;
use signal_analysis::domain::signal::SignalStatus;
use signal_analysis::service::stream_service::StreamEvent;
use signal_analysis::source::synthetic::SyntheticSignalSource;
use signal_analysis::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(200);

    let state = AppState::new(
        cfg.clone(),
        Arc::new(SyntheticSignalSource::new(cfg.base_delay())),
        Arc::new(WebhookAnalysisGateway::new(cfg.webhook_url.clone(), cfg.webhook_timeout())),
    );

    tracing::info!(count, "collecting payment signals");
    let mut events = state.stream_service.start(cfg.stream_count(Some(count)));
    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(StreamEvent::Signal(s)) => {
                    let icon = if s.status == SignalStatus::Success { "[OK]" } else { "[X] " };
                    tracing::info!("{} {} {:>7.2} | {}ms", icon, s.currency, s.amount, s.latency_ms);
                }
                Some(StreamEvent::Done) | None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("collection stopped");
                break;
            }
        }
    }
    drop(events);

    let Some(digest) = state.analysis_service.digest() else {
        tracing::info!("no signals collected");
        return Ok(());
    };
    tracing::info!("generated digest:\n{}", digest);

    match state.analysis_service.analyze().await {
        Ok(text) => tracing::info!("analysis:\n{}", text),
        Err(e) => match e.details() {
            Some(details) => tracing::error!("{}: {}", e, details),
            None => tracing::error!("{}", e),
        },
    }
    Ok(())
}
