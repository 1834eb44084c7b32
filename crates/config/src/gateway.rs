// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Validates that a string is a valid host (IP address or hostname)
fn is_valid_host(host: &str) -> bool {
    if IpAddr::from_str(host).is_ok() {
        return true;
    }

    // RFC 1123 hostname
    if host.is_empty() || host.len() > 253 {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid gateway server host: {0}")]
    InvalidServer(String),

    #[error("Invalid gateway base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Known StarkNet networks exposing a feeder gateway.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    AlphaGoerli,
    AlphaMainnet,
}

impl Network {
    /// Feeder gateway host for this network.
    pub fn host(&self) -> &'static str {
        match self {
            Network::AlphaGoerli => "alpha4.starknet.io",
            Network::AlphaMainnet => "alpha-mainnet.starknet.io",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::AlphaGoerli => write!(f, "alpha-goerli"),
            Network::AlphaMainnet => write!(f, "alpha-mainnet"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Network whose feeder gateway is polled
    ///
    /// Env: EW_GATEWAY_NETWORK
    /// Valid values: alpha-goerli, alpha-mainnet
    /// Default: alpha-goerli
    pub network: Network,

    /// Host overriding the network's default server, queried over https
    ///
    /// Env: EW_GATEWAY_SERVER
    /// Default: unset
    pub server: Option<String>,

    /// Full base URL overriding both network and server (e.g. a local node)
    ///
    /// Env: EW_GATEWAY_BASE_URL
    /// Valid schemes: http://, https://
    /// Default: unset
    pub base_url: Option<String>,

    /// Per-request timeout in seconds, 0 disables it
    ///
    /// Env: EW_GATEWAY_REQUEST_TIMEOUT_SECS
    /// Default: 0
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    pub(crate) fn validate(&self) -> Result<(), GatewayError> {
        if let Some(server) = &self.server {
            if !is_valid_host(server) {
                return Err(GatewayError::InvalidServer(server.clone()));
            }
        }

        if let Some(base_url) = &self.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| GatewayError::InvalidBaseUrl {
                url: base_url.clone(),
                reason: e.to_string(),
            })?;

            match parsed.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(GatewayError::InvalidBaseUrl {
                        url: base_url.clone(),
                        reason: format!("unsupported scheme '{}'", scheme),
                    });
                }
            }
        }

        Ok(())
    }

    /// Resolve the URL the feeder gateway paths are appended to.
    ///
    /// `base_url` wins over `server`, which wins over the network default.
    pub fn base_url(&self) -> String {
        match (&self.base_url, &self.server) {
            (Some(base_url), _) => base_url.trim_end_matches('/').to_string(),
            (None, Some(server)) => format!("https://{}", server),
            (None, None) => format!("https://{}", self.network.host()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
