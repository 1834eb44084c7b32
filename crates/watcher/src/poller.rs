// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Periodic fetching of the pending block with switch-to-latest semantics.

use crate::fetcher::{BlockSource, FetchError};
use crate::types::{Block, BlockSelector};
use config::{FetchErrorPolicy, PollerConfig};
use futures::future::{BoxFuture, OptionFuture};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Interval used when none is configured.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("Failed to fetch pending block")]
    Fetch(#[from] FetchError),

    #[error("Block receiver dropped")]
    ChannelClosed,
}

/// Fetches the pending block on every tick and forwards each result.
///
/// At most one fetch is in flight. A tick arriving while the previous fetch
/// is still running drops that fetch (cancelling its request), so only the
/// newest fetch can ever forward a block.
#[derive(Debug)]
pub struct Poller<S> {
    source: S,
    period: Duration,
    on_fetch_error: FetchErrorPolicy,
}

impl<S: BlockSource> Poller<S> {
    pub fn new(source: S, period: Duration) -> Self {
        Self {
            source,
            period,
            on_fetch_error: FetchErrorPolicy::Terminate,
        }
    }

    /// Poller ticking every [`DEFAULT_PERIOD`].
    pub fn with_default_period(source: S) -> Self {
        Self::new(source, DEFAULT_PERIOD)
    }

    pub fn from_config(source: S, config: &PollerConfig) -> Self {
        Self::new(source, config.period()).with_fetch_error_policy(config.on_fetch_error)
    }

    pub fn with_fetch_error_policy(mut self, policy: FetchErrorPolicy) -> Self {
        self.on_fetch_error = policy;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Polls until `cancellation` fires, the receiver goes away, or a fetch
    /// fails under [`FetchErrorPolicy::Terminate`].
    ///
    /// The first tick fires immediately.
    pub async fn run(
        &self,
        blocks: mpsc::Sender<Block>,
        cancellation: CancellationToken,
    ) -> Result<(), PollerError> {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut in_flight: Option<BoxFuture<'_, Result<Block, FetchError>>> = None;

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(target: "poller", "Poller cancellation requested, stopping...");
                    return Ok(());
                }
                Some(result) = OptionFuture::from(in_flight.as_mut()) => {
                    in_flight = None;
                    match result {
                        Ok(block) => {
                            debug!(
                                target: "poller",
                                transactions = block.transactions.len(),
                                status = %block.status,
                                "Fetched pending block"
                            );
                            if blocks.send(block).await.is_err() {
                                return Err(PollerError::ChannelClosed);
                            }
                        }
                        Err(err) => match self.on_fetch_error {
                            FetchErrorPolicy::Terminate => {
                                error!(target: "poller", %err, "Failed to fetch pending block");
                                return Err(err.into());
                            }
                            FetchErrorPolicy::Skip => {
                                warn!(
                                    target: "poller",
                                    %err,
                                    "Failed to fetch pending block, waiting for next tick"
                                );
                            }
                        },
                    }
                }
                _ = ticker.tick() => {
                    if in_flight.is_some() {
                        debug!(target: "poller", "Previous fetch still running, superseding it");
                    }
                    in_flight = Some(self.source.block(BlockSelector::Pending));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn block(tag: &str) -> Block {
        serde_json::from_value(json!({
            "parent_block_hash": tag,
            "status": "PENDING",
            "timestamp": 1,
            "transactions": [],
            "transaction_receipts": []
        }))
        .unwrap()
    }

    /// Answers each call with the next scripted reply after its delay.
    struct ScriptedSource {
        replies: Mutex<VecDeque<(Duration, Result<Block, ()>)>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(replies: Vec<(Duration, Result<Block, ()>)>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlockSource for ScriptedSource {
        async fn block(&self, selector: BlockSelector) -> Result<Block, FetchError> {
            assert_eq!(selector, BlockSelector::Pending);
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some((delay, reply)) => {
                    tokio::time::sleep(delay).await;
                    reply.map_err(|()| FetchError::Status {
                        url: "http://gateway/feeder_gateway/get_block".to_string(),
                        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    })
                }
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_immediately() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(block("a")))]);
        let poller = Poller::new(source, Duration::from_secs(60));
        let (tx, mut rx) = mpsc::channel::<Block>(4);
        let cancellation = CancellationToken::new();
        let start = tokio::time::Instant::now();

        let run = poller.run(tx, cancellation.clone());
        tokio::pin!(run);

        let received = tokio::select! {
            _ = &mut run => panic!("poller stopped early"),
            block = rx.recv() => block.unwrap(),
        };
        assert_eq!(received.parent_block_hash, "a");
        assert_eq!(start.elapsed(), Duration::ZERO);

        cancellation.cancel();
        run.await.unwrap();
    }

    #[test]
    fn default_period_is_ten_seconds() {
        let poller = Poller::with_default_period(ScriptedSource::new(Vec::new()));
        assert_eq!(poller.period(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn polls_every_period() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(block("a"))),
            (Duration::ZERO, Ok(block("b"))),
            (Duration::ZERO, Ok(block("c"))),
        ]);
        let poller = Poller::new(source, Duration::from_secs(1));
        let (tx, mut rx) = mpsc::channel::<Block>(4);
        let cancellation = CancellationToken::new();

        let consume = async {
            let mut tags = Vec::new();
            while tags.len() < 3 {
                tags.push(rx.recv().await.unwrap().parent_block_hash);
            }
            cancellation.cancel();
            tags
        };
        let (result, tags) = tokio::join!(poller.run(tx, cancellation.clone()), consume);

        result.unwrap();
        assert_eq!(tags, vec!["a", "b", "c"]);
        assert_eq!(poller.source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_is_superseded_by_next_tick() {
        let source = ScriptedSource::new(vec![
            // Still running when the second tick fires one second later.
            (Duration::from_millis(1500), Ok(block("stale"))),
            (Duration::from_millis(100), Ok(block("fresh"))),
        ]);
        let poller = Poller::new(source, Duration::from_secs(1));
        let (tx, mut rx) = mpsc::channel::<Block>(4);
        let cancellation = CancellationToken::new();

        let consume = async {
            let first = rx.recv().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            cancellation.cancel();
            let mut rest = Vec::new();
            while let Some(block) = rx.recv().await {
                rest.push(block);
            }
            (first, rest)
        };
        let (result, (first, rest)) = tokio::join!(poller.run(tx, cancellation.clone()), consume);

        result.unwrap();
        assert_eq!(first.parent_block_hash, "fresh");
        assert!(rest.iter().all(|b| b.parent_block_hash != "stale"));
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_error_terminates_by_default() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, Err(()))]);
        let poller = Poller::new(source, Duration::from_secs(1));
        let (tx, _rx) = mpsc::channel::<Block>(4);

        let result = poller.run(tx, CancellationToken::new()).await;

        assert!(matches!(result, Err(PollerError::Fetch(FetchError::Status { .. }))));
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_error_is_skipped_when_configured() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Err(())),
            (Duration::ZERO, Ok(block("after-error"))),
        ]);
        let poller = Poller::new(source, Duration::from_secs(1))
            .with_fetch_error_policy(FetchErrorPolicy::Skip);
        let (tx, mut rx) = mpsc::channel::<Block>(4);
        let cancellation = CancellationToken::new();

        let consume = async {
            let block = rx.recv().await.unwrap();
            cancellation.cancel();
            block
        };
        let (result, block) = tokio::join!(poller.run(tx, cancellation.clone()), consume);

        result.unwrap();
        assert_eq!(block.parent_block_hash, "after-error");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_receiver_stops_the_poller() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(block("a")))]);
        let poller = Poller::new(source, Duration::from_secs(1));
        let (tx, rx) = mpsc::channel::<Block>(4);
        drop(rx);

        let result = poller.run(tx, CancellationToken::new()).await;

        assert!(matches!(result, Err(PollerError::ChannelClosed)));
    }
}
