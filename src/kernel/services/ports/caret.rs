use super::search::Position;
use std::sync::{Arc, Mutex};

/// Read access to the viewport caret, owned by the host.
pub trait CaretSource: Send + Sync {
    fn caret(&self) -> Position;
}

/// Caret shared between a host and the engine.
#[derive(Debug, Clone, Default)]
pub struct SharedCaret {
    inner: Arc<Mutex<Position>>,
}

impl SharedCaret {
    pub fn new(pos: Position) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pos)),
        }
    }

    pub fn move_to(&self, pos: Position) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = pos;
        }
    }
}

impl CaretSource for SharedCaret {
    fn caret(&self) -> Position {
        self.inner.lock().map(|pos| *pos).unwrap_or_default()
    }
}
