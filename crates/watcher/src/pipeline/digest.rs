use serde::Serialize;
use thiserror::Error;

/// blake2-256 of a value's JSON encoding.
///
/// Extension maps are `BTreeMap`-backed, so the encoding is independent of
/// the key order the gateway used and equal records give equal digests.
pub type ContentDigest = [u8; 32];

#[derive(Debug, Error)]
#[error("Failed to encode value for its content digest")]
pub struct DigestError(#[from] serde_json::Error);

pub fn content_digest<T: Serialize + ?Sized>(value: &T) -> Result<ContentDigest, DigestError> {
    let encoded = serde_json::to_vec(value)?;
    Ok(sp_crypto_hashing::blake2_256(&encoded))
}
