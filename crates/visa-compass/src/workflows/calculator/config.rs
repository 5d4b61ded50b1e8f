use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::progress::DEFAULT_PROGRESS_TTL_DAYS;
use super::scoring::ScoringPolicy;

/// Runtime knobs for the calculator service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub policy: ScoringPolicy,
    pub progress_ttl_days: i64,
    /// Pause applied by the HTTP layer before returning an assessment.
    pub processing_delay_ms: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            progress_ttl_days: DEFAULT_PROGRESS_TTL_DAYS,
            processing_delay_ms: 0,
        }
    }
}

impl CalculatorConfig {
    /// Windows too large for `chrono` saturate instead of panicking.
    pub fn progress_ttl(&self) -> Duration {
        Duration::try_days(self.progress_ttl_days).unwrap_or(Duration::MAX)
    }

    pub fn processing_delay(&self) -> StdDuration {
        StdDuration::from_millis(self.processing_delay_ms)
    }
}
