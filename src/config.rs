use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub webhook_url: String,
    pub webhook_timeout_ms: u64,
    pub default_stream_count: usize,
    pub max_stream_count: usize,
    pub base_delay_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            webhook_url: std::env::var("ANALYSIS_WEBHOOK_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/payment-analysis".to_string()),
            webhook_timeout_ms: env_or("WEBHOOK_TIMEOUT_MS", 60_000),
            default_stream_count: env_or("STREAM_DEFAULT_COUNT", 100),
            max_stream_count: env_or("STREAM_MAX_COUNT", 10_000),
            base_delay_ms: env_or("STREAM_BASE_DELAY_MS", 100),
        }
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_millis(self.webhook_timeout_ms)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn stream_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_stream_count)
            .clamp(1, self.max_stream_count.max(1))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}
