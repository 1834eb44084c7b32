// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::fetcher::BlockSource;
use crate::pipeline::{Pipeline, PipelineError};
use crate::poller::{Poller, PollerError};
use crate::sink::EventSink;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Blocks buffered between the poller and the pipeline.
pub const BLOCK_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error(transparent)]
    Poller(#[from] PollerError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Poller, pipeline and sink wired together.
#[derive(Debug)]
pub struct EventWatcher<S, K> {
    poller: Poller<S>,
    pipeline: Pipeline,
    sink: K,
}

impl<S, K> EventWatcher<S, K>
where
    S: BlockSource,
    K: EventSink,
{
    pub fn new(poller: Poller<S>, pipeline: Pipeline, sink: K) -> Self {
        Self {
            poller,
            pipeline,
            sink,
        }
    }

    /// Runs until `cancellation` fires or a stage fails.
    ///
    /// The poller and the pipeline run concurrently on the current task; the
    /// first error from either ends both.
    pub async fn run(self, cancellation: CancellationToken) -> Result<(), WatcherError> {
        let Self {
            poller,
            mut pipeline,
            mut sink,
        } = self;
        let (blocks_tx, mut blocks_rx) = mpsc::channel(BLOCK_CHANNEL_CAPACITY);

        info!(target: "pipeline", period = ?poller.period(), "Starting event watcher");

        let produce = async move {
            poller
                .run(blocks_tx, cancellation)
                .await
                .map_err(WatcherError::from)
        };

        let consume = async {
            while let Some(block) = blocks_rx.recv().await {
                if let Err(err) = pipeline.process_block(block, &mut sink) {
                    error!(target: "pipeline", %err, "Failed to process block");
                    return Err(WatcherError::from(err));
                }
            }
            Ok(())
        };

        tokio::try_join!(produce, consume)?;
        info!(target: "pipeline", "Event watcher stopped");
        Ok(())
    }
}
