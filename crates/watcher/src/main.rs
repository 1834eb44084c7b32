// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::{Args, WatcherConfig};
use event_watcher::logging::{self, LoggingConfig};
use event_watcher::{DedupRetention, EventWatcher, FeederGatewayClient, LogSink, Pipeline, Poller};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let env_file_loaded = args.load_env_file()?;
    let config = WatcherConfig::from_env()?;
    // Held until exit so the file writer flushes its tail.
    let _log_guard = logging::init_with_config(LoggingConfig::from(&config.log))?;

    let client = FeederGatewayClient::from_config(&config.gateway)?;
    tracing::info!("Network: {}", config.gateway.network);
    tracing::info!("Feeder gateway: {}", client.base_url());
    tracing::info!("Poll period: {} ms", config.poller.period_ms);
    tracing::info!("Log level: {}", config.log.level);
    if env_file_loaded {
        tracing::info!("Loaded environment from {}", args.env_file);
    }

    let poller = Poller::from_config(client, &config.poller);
    let pipeline = Pipeline::new(DedupRetention::from(&config.dedup));
    let watcher = EventWatcher::new(poller, pipeline, LogSink);

    let cancellation = CancellationToken::new();
    let shutdown = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    if let Err(err) = watcher.run(cancellation).await {
        tracing::error!(%err, "Event watcher failed");
        return Err(err.into());
    }

    Ok(())
}
