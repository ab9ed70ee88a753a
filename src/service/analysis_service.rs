use crate::analysis::digest::build_digest;
use crate::analysis::gateway::AnalysisGateway;
use crate::domain::analysis::{AnalysisError, AnalysisResult};
use crate::session::buffer::SessionBuffer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AnalysisService {
    pub buffer: SessionBuffer,
    pub gateway: Arc<dyn AnalysisGateway>,
}

impl AnalysisService {
    pub fn digest(&self) -> Option<String> {
        let signals = self.buffer.snapshot();
        if signals.is_empty() {
            return None;
        }
        Some(build_digest(&signals))
    }

    pub async fn analyze(&self) -> AnalysisResult {
        let Some(digest) = self.digest() else {
            tracing::info!("analysis requested with no buffered signals");
            return Err(AnalysisError::EmptySession);
        };
        self.gateway.submit(&digest).await
    }
}
