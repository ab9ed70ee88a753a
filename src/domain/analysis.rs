use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("No signals collected. Run the stream first.")]
    EmptySession,

    #[error("Webhook error {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),
}

impl AnalysisError {
    pub fn details(&self) -> Option<&str> {
        match self {
            AnalysisError::UpstreamStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type AnalysisResult = Result<String, AnalysisError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Result {
        result: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(outcome: AnalysisResult) -> Self {
        match outcome {
            Ok(result) => AnalysisResponse::Result { result },
            Err(e) => AnalysisResponse::Error {
                error: e.to_string(),
                details: e.details().map(ToString::to_string),
            },
        }
    }
}
