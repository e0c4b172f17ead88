use std::time::{Duration, Instant};

/// One-line status with a time-to-live, re-armed on every `set`.
#[derive(Debug, Clone)]
pub struct StatusText {
    text: Option<String>,
    set_at: Option<Instant>,
    ttl: Duration,
}

impl StatusText {
    pub fn new(ttl: Duration) -> Self {
        Self {
            text: None,
            set_at: None,
            ttl,
        }
    }

    pub fn set(&mut self, text: impl Into<String>) -> bool {
        self.set_at_instant(text, Instant::now())
    }

    pub fn set_at_instant(&mut self, text: impl Into<String>, now: Instant) -> bool {
        let text = text.into();
        let changed = self.text.as_deref() != Some(text.as_str());
        self.text = Some(text);
        self.set_at = Some(now);
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.set_at = None;
        self.text.take().is_some()
    }

    /// Last text set, ignoring the TTL.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn visible_text(&self, now: Instant) -> Option<&str> {
        let set_at = self.set_at?;
        if now.saturating_duration_since(set_at) >= self.ttl {
            return None;
        }
        self.text.as_deref()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
