// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destinations for the events the pipeline produces.

use crate::types::Event;
use tokio::sync::mpsc;

/// Receives events one at a time, in pipeline order.
///
/// Sinks are assumed to always be ready; `emit` must not block.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Writes every event to the `events` log target as JSON, with its stamps
/// as structured fields. Hash stamps that are `null` are left out of the
/// fields but kept in the JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: Event) {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(
                target: "events",
                block_hash = event.block_hash.as_deref(),
                transaction_hash = event.transaction_hash.as_deref(),
                transaction_index = event.transaction_index,
                log_index = event.log_index,
                "{}",
                json
            ),
            Err(err) => tracing::warn!(
                target: "events",
                transaction_hash = event.transaction_hash.as_deref(),
                log_index = event.log_index,
                %err,
                "Failed to encode event"
            ),
        }
    }
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<Event> {
    fn emit(&mut self, event: Event) {
        if self.send(event).is_err() {
            tracing::debug!(target: "events", "Event receiver dropped, discarding event");
        }
    }
}
