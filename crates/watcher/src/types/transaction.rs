// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EventFragment, Extra};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Absent on some transaction kinds of older blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Execution receipt of the transaction at the same position in the block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// `None` when the gateway omitted the field or sent `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventFragment>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A transaction paired with its receipt and stamped with the hashes of the
/// block it was observed in.
///
/// Serialises flat: the transaction's own fields sit at the top level next
/// to `receipt`, `parent_block_hash` and `block_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub receipt: TransactionReceipt,
    pub parent_block_hash: String,
    pub block_hash: Option<String>,
}

impl TransactionSummary {
    /// Keys set on the summary itself, which take precedence over
    /// same-named fields of the transaction.
    pub const STAMPED_KEYS: [&'static str; 3] = ["receipt", "parent_block_hash", "block_hash"];

    pub fn new(
        mut transaction: Transaction,
        receipt: TransactionReceipt,
        parent_block_hash: String,
        block_hash: Option<String>,
    ) -> Self {
        for key in Self::STAMPED_KEYS {
            transaction.extra.remove(key);
        }

        Self {
            transaction,
            receipt,
            parent_block_hash,
            block_hash,
        }
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        self.transaction.transaction_hash.as_deref()
    }
}
