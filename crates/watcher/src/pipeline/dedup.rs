use super::digest::{ContentDigest, DigestError, content_digest};
use crate::types::TransactionSummary;
use config::DedupConfig;
use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;

/// How many digests the [`SeenSet`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupRetention {
    /// Remember every summary for the lifetime of the process.
    #[default]
    Unbounded,
    /// Remember at most this many summaries, forgetting the oldest first.
    Bounded(NonZeroUsize),
}

impl From<&DedupConfig> for DedupRetention {
    fn from(config: &DedupConfig) -> Self {
        match NonZeroUsize::new(config.capacity) {
            Some(capacity) => DedupRetention::Bounded(capacity),
            None => DedupRetention::Unbounded,
        }
    }
}

/// Digests of the transaction summaries already emitted.
#[derive(Debug, Default)]
pub struct SeenSet {
    retention: DedupRetention,
    seen: HashSet<ContentDigest>,
    // Insertion order, only tracked when bounded.
    order: VecDeque<ContentDigest>,
}

impl SeenSet {
    pub fn new(retention: DedupRetention) -> Self {
        Self {
            retention,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Records `digest`, returning `true` if it was not already present.
    pub fn insert(&mut self, digest: ContentDigest) -> bool {
        if !self.seen.insert(digest) {
            return false;
        }

        if let DedupRetention::Bounded(capacity) = self.retention {
            self.order.push_back(digest);
            while self.order.len() > capacity.get() {
                if let Some(oldest) = self.order.pop_front() {
                    self.seen.remove(&oldest);
                }
            }
        }

        true
    }

    /// Returns `true` the first time a summary with this content is seen.
    pub fn first_sighting(&mut self, summary: &TransactionSummary) -> Result<bool, DigestError> {
        Ok(self.insert(content_digest(summary)?))
    }
}
