use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::options::{DEFAULT_CONTEXT_RADIUS, DEFAULT_CRITICAL_RESULT_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub progress_period_ms: u64,
    pub status_ttl_ms: u64,
    pub context_radius: usize,
    pub critical_result_count: usize,
    pub page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            progress_period_ms: 150,
            status_ttl_ms: 5000,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            critical_result_count: DEFAULT_CRITICAL_RESULT_COUNT,
            page_size: 64 * 1024,
        }
    }
}

impl SearchSettings {
    pub fn progress_period(&self) -> Duration {
        Duration::from_millis(self.progress_period_ms)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}
