pub mod config;
pub mod domain {
    pub mod analysis;
    pub mod signal;
}
pub mod analysis {
    pub mod digest;
    pub mod gateway;
}
pub mod http {
    pub mod handlers {
        pub mod analysis;
        pub mod ops;
        pub mod session;
        pub mod stream;
    }
    pub mod router;
}
pub mod session {
    pub mod buffer;
}
pub mod service {
    pub mod analysis_service;
    pub mod stream_service;
}
pub mod source;

#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub stream_service: service::stream_service::StreamService,
    pub analysis_service: service::analysis_service::AnalysisService,
}

impl AppState {
    pub fn new(
        config: config::AppConfig,
        source: std::sync::Arc<dyn source::SignalSource>,
        gateway: std::sync::Arc<dyn analysis::gateway::AnalysisGateway>,
    ) -> Self {
        let buffer = session::buffer::SessionBuffer::new();
        Self {
            config,
            stream_service: service::stream_service::StreamService {
                source,
                buffer: buffer.clone(),
            },
            analysis_service: service::analysis_service::AnalysisService { buffer, gateway },
        }
    }
}
