//! `.brun` file framing.
//!
//! ```text
//! b"BRUN" | version (1 byte) | bincode body
//! ```
//!
//! The body records the pass layers needed to unwind the payload and a
//! truncated SHA-256 of the original bytes, checked after unwinding.

use bincode::Options;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::passes::{unwind_layers, Layer, PassChain};
use crate::BitrunError;

pub const MAGIC: &[u8; 4] = b"BRUN";
pub const VERSION: u8 = 1;
const PREAMBLE_LEN: usize = MAGIC.len() + 1;

/// First eight bytes of the SHA-256 of `data`.
pub fn truncated_digest(data: &[u8]) -> [u8; 8] {
    let digest: [u8; 32] = Sha256::digest(data).into();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub original_len: u64,
    pub digest: [u8; 8],
    pub layers: Vec<Layer>,
    pub payload: Vec<u8>,
}

impl Archive {
    pub fn from_chain(original: &[u8], chain: PassChain) -> Self {
        Self {
            original_len: original.len() as u64,
            digest: truncated_digest(original),
            layers: chain.layers,
            payload: chain.payload,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BitrunError> {
        let mut out = Vec::with_capacity(PREAMBLE_LEN + self.payload.len() + 64);
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend(bincode::serialize(self)?);
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, BitrunError> {
        if data.len() < PREAMBLE_LEN || &data[..MAGIC.len()] != MAGIC {
            return Err(BitrunError::Archive("missing BRUN magic".into()));
        }
        let version = data[MAGIC.len()];
        if version != VERSION {
            return Err(BitrunError::Archive(format!("unsupported version {version}")));
        }
        let body = &data[PREAMBLE_LEN..];
        let archive = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(body.len() as u64)
            .deserialize(body)?;
        Ok(archive)
    }

    /// Unwind all layers and check the result against the stored digest.
    pub fn unpack(&self) -> Result<Vec<u8>, BitrunError> {
        let original = unwind_layers(&self.layers, &self.payload)?;
        if original.len() as u64 != self.original_len || truncated_digest(&original) != self.digest {
            return Err(BitrunError::Archive("digest mismatch".into()));
        }
        Ok(original)
    }
}
