// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Block retrieval from a StarkNet feeder gateway.

use crate::types::{Block, BlockSelector};
use async_trait::async_trait;
use config::GatewayConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to send GET request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Gateway returned status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode block from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything able to produce a [`Block`] for a selector.
///
/// Each call is a single unit of work yielding one block or one error.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn block(&self, selector: BlockSelector) -> Result<Block, FetchError>;
}

/// HTTP client for `feeder_gateway/get_block`.
#[derive(Debug, Clone)]
pub struct FeederGatewayClient {
    base_url: String,
    client: Client,
}

impl FeederGatewayClient {
    /// Create a client for the gateway at `base_url` (e.g.
    /// `https://alpha4.starknet.io`), without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build().map_err(FetchError::ClientBuild)?,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, FetchError> {
        Self::with_timeout(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The selector is interpolated as-is, without escaping.
    pub fn block_url(&self, selector: BlockSelector) -> String {
        format!(
            "{}/feeder_gateway/get_block?blockNumber={}",
            self.base_url, selector
        )
    }
}

#[async_trait]
impl BlockSource for FeederGatewayClient {
    async fn block(&self, selector: BlockSelector) -> Result<Block, FetchError> {
        let url = self.block_url(selector);
        tracing::debug!(target: "fetcher", %url, "Fetching block");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}
