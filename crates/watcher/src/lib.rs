// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod fetcher;
pub mod logging;
pub mod pipeline;
pub mod poller;
pub mod sink;
pub mod types;
pub mod watcher;

pub use fetcher::{BlockSource, FeederGatewayClient, FetchError};
pub use pipeline::{DedupRetention, Pipeline, PipelineError};
pub use poller::{Poller, PollerError};
pub use sink::{EventSink, LogSink};
pub use watcher::{EventWatcher, WatcherError};
