// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Records exchanged with the feeder gateway and produced by the pipeline.
//!
//! Every record names the fields the watcher relies on and keeps whatever
//! else the gateway sent in a flattened `extra` map, so re-serialising a
//! record yields all of the original payload.

mod block;
mod event;
mod transaction;

pub use block::{Block, BlockSelector, BlockSelectorParseError};
pub use event::{Event, EventFragment};
pub use transaction::{Transaction, TransactionReceipt, TransactionSummary};

/// Fields of a payload that are not modelled explicitly.
pub type Extra = serde_json::Map<String, serde_json::Value>;
