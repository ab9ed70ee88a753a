use crate::domain::analysis::{AnalysisError, AnalysisResult};
use serde_json::{json, Value};
use std::time::Duration;

pub const EMPTY_REPLY: &str = "(empty response)";

pub const TEXT_FIELDS: [&str; 3] = ["text", "output", "message"];

#[async_trait::async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn submit(&self, digest: &str) -> AnalysisResult;
}

#[derive(Clone)]
pub struct WebhookAnalysisGateway {
    pub url: String,
    pub timeout: Duration,
    pub client: reqwest::Client,
}

impl WebhookAnalysisGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisGateway for WebhookAnalysisGateway {
    async fn submit(&self, digest: &str) -> AnalysisResult {
        tracing::info!(url = %self.url, digest_len = digest.len(), "submitting digest");

        let resp = self
            .client
            .post(&self.url)
            .json(&json!({ "prompt": digest }))
            .timeout(self.timeout)
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "webhook request failed");
                return Err(AnalysisError::Transport(e.to_string()));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "webhook returned error status");
            return Err(AnalysisError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(|e| {
            tracing::warn!(error = %e, "failed reading webhook body");
            AnalysisError::Transport(e.to_string())
        })?;

        Ok(normalize_reply(&body))
    }
}

struct Reply<'a> {
    raw: &'a str,
    json: Option<Value>,
}

type Extractor = fn(&Reply<'_>) -> Option<String>;

const EXTRACTORS: [Extractor; 4] = [text_field, whole_json, raw_text, empty_placeholder];

pub fn normalize_reply(body: &str) -> String {
    let reply = Reply {
        raw: body,
        json: serde_json::from_str(body).ok(),
    };
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(&reply))
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

fn text_field(reply: &Reply<'_>) -> Option<String> {
    let obj = reply.json.as_ref()?.as_object()?;
    TEXT_FIELDS.iter().find_map(|field| match obj.get(*field)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

fn whole_json(reply: &Reply<'_>) -> Option<String> {
    match reply.json.as_ref()? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn raw_text(reply: &Reply<'_>) -> Option<String> {
    if reply.raw.trim().is_empty() {
        None
    } else {
        Some(reply.raw.to_string())
    }
}

fn empty_placeholder(_reply: &Reply<'_>) -> Option<String> {
    Some(EMPTY_REPLY.to_string())
}
