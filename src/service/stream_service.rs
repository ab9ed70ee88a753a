use crate::domain::signal::PaymentSignal;
use crate::session::buffer::{SessionBuffer, SessionId};
use crate::source::SignalSource;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Signal(PaymentSignal),
    Done,
}

#[derive(Clone)]
pub struct StreamService {
    pub source: Arc<dyn SignalSource>,
    pub buffer: SessionBuffer,
}

impl StreamService {
    /// Each signal is buffered before it is yielded. A superseded stream ends
    /// early; dropping it stops the source and keeps what was buffered.
    pub fn start(&self, count: usize) -> BoxStream<'static, StreamEvent> {
        let session = self.buffer.reset();
        tracing::info!(%session, count, "stream started");

        let guard = SessionGuard {
            buffer: self.buffer.clone(),
            session,
            completed: false,
        };
        let buffer = self.buffer.clone();

        self.source
            .stream(count)
            .take_while(move |signal| {
                let accepted = buffer.append(session, signal.clone());
                if !accepted {
                    tracing::warn!(%session, "stream superseded by a newer session");
                }
                future::ready(accepted)
            })
            .map(StreamEvent::Signal)
            .chain(stream::once(async move {
                let mut guard = guard;
                guard.complete();
                StreamEvent::Done
            }))
            .boxed()
    }
}

struct SessionGuard {
    buffer: SessionBuffer,
    session: SessionId,
    completed: bool,
}

impl SessionGuard {
    fn complete(&mut self) {
        self.completed = true;
        if self.buffer.finish(self.session) {
            tracing::info!(
                session = %self.session,
                signals = self.buffer.status().signal_count,
                "stream complete"
            );
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.completed && self.buffer.finish(self.session) {
            tracing::info!(session = %self.session, "stream cancelled by subscriber");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::SignalStatus;
    use crate::session::buffer::StreamPhase;
    use crate::source::synthetic::SyntheticSignalSource;
    use std::time::Duration;

    struct FixedSource {
        signals: Vec<PaymentSignal>,
    }

    impl SignalSource for FixedSource {
        fn stream(&self, count: usize) -> BoxStream<'static, PaymentSignal> {
            stream::iter(self.signals.clone().into_iter().take(count)).boxed()
        }
    }

    fn signals(n: usize) -> Vec<PaymentSignal> {
        (0..n)
            .map(|i| PaymentSignal {
                timestamp: chrono::Utc::now(),
                merchant_id: format!("M{}", i),
                currency: "USD".to_string(),
                amount: 1.0,
                status: SignalStatus::Success,
                latency_ms: 10,
            })
            .collect()
    }

    fn service(n: usize) -> StreamService {
        StreamService {
            source: Arc::new(FixedSource { signals: signals(n) }),
            buffer: SessionBuffer::new(),
        }
    }

    #[tokio::test]
    async fn emits_every_signal_then_done() {
        let svc = service(4);
        let events: Vec<StreamEvent> = svc.start(4).collect().await;

        assert_eq!(events.len(), 5);
        assert_eq!(events.last(), Some(&StreamEvent::Done));
        assert_eq!(svc.buffer.snapshot().len(), 4);
        assert_eq!(svc.buffer.status().phase, StreamPhase::Complete);
    }

    #[tokio::test]
    async fn signal_is_buffered_before_it_is_forwarded() {
        let svc = service(3);
        let mut events = svc.start(3);

        let mut seen = 0;
        while let Some(StreamEvent::Signal(signal)) = events.next().await {
            seen += 1;
            let snap = svc.buffer.snapshot();
            assert_eq!(snap.len(), seen);
            assert_eq!(snap[seen - 1], signal);
        }
        assert_eq!(seen, 3);
    }

    #[tokio::test]
    async fn dropping_stream_keeps_partial_session() {
        let svc = service(10);
        let mut events = svc.start(10);
        events.next().await;
        events.next().await;
        drop(events);

        let status = svc.buffer.status();
        assert_eq!(status.signal_count, 2);
        assert_eq!(status.phase, StreamPhase::Complete);
    }

    #[tokio::test]
    async fn dropping_while_source_is_pacing_completes_session() {
        let svc = StreamService {
            source: Arc::new(SyntheticSignalSource::new(Duration::from_millis(200))),
            buffer: SessionBuffer::new(),
        };
        let mut events = svc.start(50);
        assert!(matches!(events.next().await, Some(StreamEvent::Signal(_))));

        let pending = tokio::time::timeout(Duration::from_millis(20), events.next()).await;
        assert!(pending.is_err());
        assert_eq!(svc.buffer.status().phase, StreamPhase::Streaming);
        drop(events);

        let status = svc.buffer.status();
        assert_eq!(status.phase, StreamPhase::Complete);
        assert_eq!(status.signal_count, 1);
    }

    #[tokio::test]
    async fn newer_session_ends_older_stream() {
        let svc = service(5);
        let mut old = svc.start(5);
        old.next().await;

        let new = svc.start(5);
        assert_eq!(old.next().await, Some(StreamEvent::Done));
        assert!(svc.buffer.snapshot().is_empty());

        let events: Vec<StreamEvent> = new.collect().await;
        assert_eq!(events.len(), 6);
        assert_eq!(svc.buffer.snapshot().len(), 5);
    }
}
