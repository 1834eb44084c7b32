// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod dedup;
mod error;
mod gateway;
mod log;
mod poller;

pub use args::Args;
pub use dedup::DedupConfig;
pub use error::ConfigError;
pub use gateway::{GatewayConfig, GatewayError, Network};
pub use log::{LogConfig, LogError};
pub use poller::{FetchErrorPolicy, PollerConfig, PollerError};

use serde::Deserialize;

/// Prefix shared by every environment variable the watcher reads.
pub const ENV_PREFIX: &str = "EW_";

#[derive(Debug, Clone, Default)]
pub struct WatcherConfig {
    pub gateway: GatewayConfig,
    pub poller: PollerConfig,
    pub dedup: DedupConfig,
    pub log: LogConfig,
}

/// Flat view of the environment as envy sees it. Each field maps to one
/// `EW_*` variable and is folded into the matching section afterwards.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default)]
    gateway_network: Network,
    gateway_server: Option<String>,
    gateway_base_url: Option<String>,
    #[serde(default)]
    gateway_request_timeout_secs: u64,

    #[serde(default = "poller::default_period_ms")]
    poller_period_ms: u64,
    #[serde(default)]
    poller_on_fetch_error: FetchErrorPolicy,

    #[serde(default)]
    dedup_capacity: usize,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,
}

impl From<EnvConfig> for WatcherConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            gateway: GatewayConfig {
                network: env.gateway_network,
                server: env.gateway_server,
                base_url: env.gateway_base_url,
                request_timeout_secs: env.gateway_request_timeout_secs,
            },
            poller: PollerConfig {
                period_ms: env.poller_period_ms,
                on_fetch_error: env.poller_on_fetch_error,
            },
            dedup: DedupConfig {
                capacity: env.dedup_capacity,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
        }
    }
}

impl WatcherConfig {
    /// Load configuration from `EW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?;
        Self::from_parsed(env)
    }

    /// Load configuration from explicit `(key, value)` pairs, using the same
    /// keys as the environment (including the `EW_` prefix).
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        Self::from_parsed(env)
    }

    fn from_parsed(env: EnvConfig) -> Result<Self, ConfigError> {
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.poller.validate()?;
        self.log.validate()?;
        Ok(())
    }
}
