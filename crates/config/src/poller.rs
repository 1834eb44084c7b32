use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("Poll period must be greater than 0 ms")]
    ZeroPeriod,
}

/// What the poller does when a fetch of the pending block fails.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// End the whole pipeline with the error.
    #[default]
    Terminate,
    /// Log the error and wait for the next tick.
    Skip,
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between two polls of the pending block, in milliseconds
    ///
    /// Env: EW_POLLER_PERIOD_MS
    /// Default: 1000
    pub period_ms: u64,

    /// Behaviour on a failed fetch
    ///
    /// Env: EW_POLLER_ON_FETCH_ERROR
    /// Valid values: terminate, skip
    /// Default: terminate
    pub on_fetch_error: FetchErrorPolicy,
}

pub(crate) fn default_period_ms() -> u64 {
    1000
}

impl PollerConfig {
    pub(crate) fn validate(&self) -> Result<(), PollerError> {
        if self.period_ms == 0 {
            return Err(PollerError::ZeroPeriod);
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            on_fetch_error: FetchErrorPolicy::default(),
        }
    }
}
