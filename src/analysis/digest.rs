use crate::domain::signal::PaymentSignal;
use std::collections::HashMap;

pub const EMPTY_DIGEST: &str = "No payment signals to analyze.";
pub const SLOW_LATENCY_MS: u64 = 200;
pub const TOP_K: usize = 3;
pub const MAX_SAMPLES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DigestStats<'a> {
    pub total: usize,
    pub failure_count: usize,
    pub failure_rate: f64,
    pub avg_latency_ms: f64,
    pub max_latency_ms: u64,
    pub top_merchants: Vec<(&'a str, usize)>,
    pub top_currencies: Vec<(&'a str, usize)>,
    pub samples: Vec<&'a PaymentSignal>,
}

pub fn compute_stats(signals: &[PaymentSignal]) -> Option<DigestStats<'_>> {
    if signals.is_empty() {
        return None;
    }

    let total = signals.len();
    let failed: Vec<&PaymentSignal> = signals.iter().filter(|s| s.status.is_failure()).collect();
    let failure_count = failed.len();

    let latency_sum: u64 = signals.iter().map(|s| s.latency_ms).sum();
    let max_latency_ms = signals.iter().map(|s| s.latency_ms).max().unwrap_or(0);

    Some(DigestStats {
        total,
        failure_count,
        failure_rate: failure_count as f64 / total as f64,
        avg_latency_ms: latency_sum as f64 / total as f64,
        max_latency_ms,
        top_merchants: most_common(failed.iter().map(|s| s.merchant_id.as_str()), TOP_K),
        top_currencies: most_common(failed.iter().map(|s| s.currency.as_str()), TOP_K),
        samples: signals
            .iter()
            .filter(|s| s.is_anomalous(SLOW_LATENCY_MS))
            .take(MAX_SAMPLES)
            .collect(),
    })
}

/// Frequency ranking, descending by count. Equal counts keep the order of
/// first appearance.
pub fn most_common<'a>(values: impl Iterator<Item = &'a str>, k: usize) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for v in values {
        match index.get(v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(v, counts.len());
                counts.push((v, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

pub fn build_digest(signals: &[PaymentSignal]) -> String {
    match compute_stats(signals) {
        Some(stats) => render(&stats),
        None => EMPTY_DIGEST.to_string(),
    }
}

fn render(stats: &DigestStats<'_>) -> String {
    let mut lines = vec![
        format!("- Total Transactions: {}", stats.total),
        format!(
            "- Failure Rate: {:.1}% ({} failures)",
            stats.failure_rate * 100.0,
            stats.failure_count
        ),
        format!("- Average Latency: {:.0}ms", stats.avg_latency_ms),
        format!("- Max Latency: {}ms", stats.max_latency_ms),
        String::new(),
        "FAILURE CONCENTRATION:".to_string(),
        format!("- Failed Merchants (count): {}", join_counts(&stats.top_merchants)),
        format!("- Failed Currencies (count): {}", join_counts(&stats.top_currencies)),
        String::new(),
        format!(
            "SAMPLE ANOMALOUS TRANSACTIONS (failures or latency > {}ms):",
            SLOW_LATENCY_MS
        ),
    ];
    lines.extend(stats.samples.iter().map(|s| sample_line(s)));

    lines.join("\n").trim().to_string()
}

fn join_counts(counts: &[(&str, usize)]) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn sample_line(s: &PaymentSignal) -> String {
    format!(
        "- [{}] merchant={} currency={} amount={:.2} status={} latency={}ms",
        s.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
        s.merchant_id,
        s.currency,
        s.amount,
        s.status,
        s.latency_ms
    )
}
