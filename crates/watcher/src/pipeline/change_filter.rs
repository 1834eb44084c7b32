use super::digest::{ContentDigest, DigestError, content_digest};
use crate::types::Block;

/// Lets a block through only when its transactions differ from those of the
/// last block let through.
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last: Option<ContentDigest>,
}

impl ChangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `block` should be processed. A rejected block leaves
    /// the filter untouched.
    pub fn admit(&mut self, block: &Block) -> Result<bool, DigestError> {
        let digest = content_digest(&block.transactions)?;
        if self.last == Some(digest) {
            return Ok(false);
        }

        self.last = Some(digest);
        Ok(true)
    }
}
