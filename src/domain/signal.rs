use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignalStatus {
    Success,
    Failed,
    Declined,
    Other(String),
}

impl SignalStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, SignalStatus::Failed | SignalStatus::Declined)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SignalStatus::Success => "SUCCESS",
            SignalStatus::Failed => "FAILED",
            SignalStatus::Declined => "DECLINED",
            SignalStatus::Other(s) => s,
        }
    }
}

impl From<String> for SignalStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => SignalStatus::Success,
            "FAILED" => SignalStatus::Failed,
            "DECLINED" => SignalStatus::Declined,
            _ => SignalStatus::Other(value),
        }
    }
}

impl From<SignalStatus> for String {
    fn from(value: SignalStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSignal {
    pub timestamp: DateTime<Utc>,
    pub merchant_id: String,
    pub currency: String,
    pub amount: f64,
    pub status: SignalStatus,
    pub latency_ms: u64,
}

impl PaymentSignal {
    pub fn is_anomalous(&self, latency_threshold_ms: u64) -> bool {
        self.status.is_failure() || self.latency_ms > latency_threshold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unknown_status_round_trips_as_plain_text() {
        let status = SignalStatus::from("PENDING".to_string());
        assert_eq!(status, SignalStatus::Other("PENDING".to_string()));
        assert!(!status.is_failure());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn serializes_timestamp_as_iso8601() {
        let signal = PaymentSignal {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).single().unwrap(),
            merchant_id: "M001".to_string(),
            currency: "USD".to_string(),
            amount: 42.5,
            status: SignalStatus::Declined,
            latency_ms: 120,
        };

        let v = serde_json::to_value(&signal).unwrap();
        assert_eq!(v["timestamp"], "2024-03-01T12:30:00Z");
        assert_eq!(v["status"], "DECLINED");
        assert_eq!(v["latency_ms"], 120);
        assert!(signal.is_anomalous(200));
    }
}
