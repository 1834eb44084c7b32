// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Extra;
use serde::{Deserialize, Serialize};

/// Event entry as it appears in a receipt's `events` list.
///
/// The gateway's `from_address`, `keys` and `data` are kept as sent, so a
/// fragment never fails to decode on their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFragment {
    #[serde(flatten)]
    pub extra: Extra,
}

impl EventFragment {
    pub fn from_address(&self) -> Option<&str> {
        self.extra.get("from_address").and_then(|value| value.as_str())
    }
}

/// A single emitted event, located by its transaction and position.
///
/// Hash stamps are `null` when neither the block nor the event provides
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub block_hash: Option<String>,
    pub parent_block_hash: Option<String>,
    pub transaction_hash: Option<String>,
    pub transaction_index: u64,
    /// Zero-based position within the transaction's event list.
    pub log_index: u64,
    #[serde(flatten)]
    pub fragment: EventFragment,
}
