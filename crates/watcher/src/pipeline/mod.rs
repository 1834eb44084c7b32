// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns successive snapshots of the pending block into a flat,
//! deduplicated stream of events.
//!
//! Stages, in order: [`ChangeFilter`], [`transaction_summaries`],
//! [`SeenSet`], [`events_from_summary`].

mod change_filter;
mod dedup;
mod digest;
mod extract;

pub use change_filter::ChangeFilter;
pub use dedup::{DedupRetention, SeenSet};
pub use digest::{ContentDigest, DigestError, content_digest};
pub use extract::{ExtractError, events_from_summary, transaction_summaries};

use crate::sink::EventSink;
use crate::types::{Block, TransactionSummary};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Digest(#[from] DigestError),
}

/// State carried between blocks: the change filter's reference and the set
/// of summaries already expanded.
#[derive(Debug, Default)]
pub struct Pipeline {
    change_filter: ChangeFilter,
    seen: SeenSet,
}

impl Pipeline {
    pub fn new(retention: DedupRetention) -> Self {
        Self {
            change_filter: ChangeFilter::new(),
            seen: SeenSet::new(retention),
        }
    }

    /// Number of transaction summaries currently remembered.
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Runs one fetched block through every stage, emitting events as they
    /// are produced. Returns how many events were emitted.
    ///
    /// Events emitted before an error stay emitted.
    pub fn process_block<K: EventSink>(
        &mut self,
        block: Block,
        sink: &mut K,
    ) -> Result<usize, PipelineError> {
        if !self.change_filter.admit(&block)? {
            trace!(target: "pipeline", "Block transactions unchanged, skipping");
            return Ok(0);
        }

        let summaries = transaction_summaries(block);
        debug!(
            target: "pipeline",
            transactions = summaries.len(),
            "Processing block with changed transactions"
        );

        let mut emitted = 0;
        for summary in summaries {
            emitted += self.process_summary(summary, sink)?;
        }
        Ok(emitted)
    }

    /// Emits the events of `summary` unless an identical summary was
    /// already processed.
    pub fn process_summary<K: EventSink>(
        &mut self,
        summary: TransactionSummary,
        sink: &mut K,
    ) -> Result<usize, PipelineError> {
        if !self.seen.first_sighting(&summary)? {
            trace!(
                target: "pipeline",
                transaction_hash = summary.transaction_hash(),
                "Transaction already seen"
            );
            return Ok(0);
        }

        let events = events_from_summary(&summary)?;
        let emitted = events.len();
        for event in events {
            sink.emit(event);
        }
        Ok(emitted)
    }
}
