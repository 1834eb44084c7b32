#[derive(Debug, Clone, Default)]
pub struct DedupConfig {
    /// Number of transaction digests remembered by the dedup stage.
    /// Once full, the oldest digest is forgotten first. 0 keeps every digest
    /// for the lifetime of the process.
    ///
    /// Env: EW_DEDUP_CAPACITY
    /// Default: 0
    pub capacity: usize,
}
