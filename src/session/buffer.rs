use crate::domain::signal::PaymentSignal;
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamPhase {
    Idle,
    Streaming,
    Complete,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: Option<SessionId>,
    pub phase: StreamPhase,
    pub signal_count: usize,
}

#[derive(Debug)]
struct SessionState {
    id: Option<SessionId>,
    phase: StreamPhase,
    signals: Vec<PaymentSignal>,
}

/// Ordered signals of the one live streaming session.
///
/// Writes are keyed by the id handed out by `reset`, so a stream that has been
/// superseded cannot append into its successor's buffer.
#[derive(Clone)]
pub struct SessionBuffer {
    inner: Arc<RwLock<SessionState>>,
}

impl Default for SessionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuffer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                id: None,
                phase: StreamPhase::Idle,
                signals: Vec::new(),
            })),
        }
    }

    pub fn reset(&self) -> SessionId {
        let id = Uuid::new_v4();
        let mut state = self.write();
        state.id = Some(id);
        state.phase = StreamPhase::Streaming;
        state.signals = Vec::new();
        id
    }

    pub fn append(&self, session: SessionId, signal: PaymentSignal) -> bool {
        let mut state = self.write();
        if state.id != Some(session) || state.phase != StreamPhase::Streaming {
            return false;
        }
        state.signals.push(signal);
        true
    }

    pub fn finish(&self, session: SessionId) -> bool {
        let mut state = self.write();
        if state.id != Some(session) || state.phase != StreamPhase::Streaming {
            return false;
        }
        state.phase = StreamPhase::Complete;
        true
    }

    pub fn snapshot(&self) -> Vec<PaymentSignal> {
        self.read().signals.clone()
    }

    pub fn is_current(&self, session: SessionId) -> bool {
        self.read().id == Some(session)
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.read();
        SessionStatus {
            session_id: state.id,
            phase: state.phase,
            signal_count: state.signals.len(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
