// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Extra, Transaction, TransactionReceipt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Block as returned by `feeder_gateway/get_block`.
///
/// `transactions` and `transaction_receipts` are aligned by position. A
/// pending block carries neither `block_hash`, `block_number` nor
/// `state_root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    pub parent_block_hash: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_root: Option<String>,
    pub timestamp: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub transaction_receipts: Vec<TransactionReceipt>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Error)]
#[error("Invalid block selector '{0}': expected a block number or 'pending'")]
pub struct BlockSelectorParseError(String);

/// Which block to ask the gateway for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSelector {
    Number(u64),
    Pending,
}

impl fmt::Display for BlockSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSelector::Number(number) => write!(f, "{}", number),
            BlockSelector::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for BlockSelector {
    type Err = BlockSelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "pending" {
            return Ok(BlockSelector::Pending);
        }

        s.parse::<u64>()
            .map(BlockSelector::Number)
            .map_err(|_| BlockSelectorParseError(s.to_string()))
    }
}
