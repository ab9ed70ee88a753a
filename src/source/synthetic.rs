use crate::domain::signal::{PaymentSignal, SignalStatus};
use crate::source::SignalSource;
use futures::stream::{self, BoxStream, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const MERCHANTS: [&str; 8] = ["M001", "M002", "M003", "M004", "M005", "M006", "M007", "M008"];
const CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "INR"];

#[derive(Debug, Clone)]
pub struct SyntheticSignalSource {
    pub base_delay: Duration,
    pub failure_rate: f64,
    pub slow_rate: f64,
}

impl SyntheticSignalSource {
    pub fn new(base_delay: Duration) -> Self {
        Self {
            base_delay,
            failure_rate: 0.12,
            slow_rate: 0.08,
        }
    }
}

struct RunState {
    remaining: usize,
    rng: StdRng,
}

impl SignalSource for SyntheticSignalSource {
    fn stream(&self, count: usize) -> BoxStream<'static, PaymentSignal> {
        let cfg = self.clone();
        let init = RunState {
            remaining: count,
            rng: StdRng::from_entropy(),
        };

        stream::unfold(init, move |mut run| {
            let cfg = cfg.clone();
            async move {
                if run.remaining == 0 {
                    return None;
                }
                run.remaining -= 1;

                let delay = jittered(cfg.base_delay, &mut run.rng);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let signal = cfg.next_signal(&mut run.rng);
                Some((signal, run))
            }
        })
        .boxed()
    }
}

impl SyntheticSignalSource {
    fn next_signal(&self, rng: &mut StdRng) -> PaymentSignal {
        let status = if rng.gen_bool(self.failure_rate.clamp(0.0, 1.0)) {
            if rng.gen_bool(0.5) {
                SignalStatus::Failed
            } else {
                SignalStatus::Declined
            }
        } else {
            SignalStatus::Success
        };

        let latency_ms = if rng.gen_bool(self.slow_rate.clamp(0.0, 1.0)) {
            rng.gen_range(200..=800)
        } else {
            rng.gen_range(20..=180)
        };

        let cents: u64 = rng.gen_range(100..50_000);

        PaymentSignal {
            timestamp: chrono::Utc::now(),
            merchant_id: MERCHANTS[rng.gen_range(0..MERCHANTS.len())].to_string(),
            currency: CURRENCIES[rng.gen_range(0..CURRENCIES.len())].to_string(),
            amount: cents as f64 / 100.0,
            status,
            latency_ms,
        }
    }
}

fn jittered(base: Duration, rng: &mut StdRng) -> Duration {
    if base.is_zero() {
        return base;
    }
    base.mul_f64(rng.gen_range(0.5..1.5))
}
