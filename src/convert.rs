//! Byte/integer conversion helpers.
//!
//! The engine's `encrypt`/`decrypt` operate on byte strings; `encrypt_int`/
//! `decrypt_int` accept and return a big-endian integer magnitude instead
//! (a `Vec<u8>` with no separate bit-width type), as two distinct entry
//! points rather than a single call that dispatches on the argument's
//! runtime type.

use crate::aes::AES_BLOCK_SIZE;
use crate::error::{Error, Result};

/// An empty magnitude or one longer than 32 bytes (two AES blocks) has no
/// well-defined block packing; this crate rejects both explicitly.
const MAX_INT_MAGNITUDE_BYTES: usize = 32;

/// Pack a big-endian integer magnitude into a sequence of 16-byte blocks,
/// left zero-padding to the next block boundary.
pub fn int_to_blocks(magnitude: &[u8]) -> Result<Vec<u8>> {
    if magnitude.is_empty() {
        return Err(Error::LengthMismatch(0));
    }
    if magnitude.len() > MAX_INT_MAGNITUDE_BYTES {
        return Err(Error::LengthMismatch(magnitude.len()));
    }

    let padded_len = magnitude.len().div_ceil(AES_BLOCK_SIZE) * AES_BLOCK_SIZE;
    let mut blocks = vec![0u8; padded_len];
    let offset = padded_len - magnitude.len();
    blocks[offset..].copy_from_slice(magnitude);
    Ok(blocks)
}

/// Unpack a sequence of 16-byte blocks back into a big-endian integer
/// magnitude, stripping leading zero bytes (but keeping at least one byte).
pub fn blocks_to_int(blocks: &[u8]) -> Vec<u8> {
    let first_nonzero = blocks.iter().position(|&b| b != 0).unwrap_or(blocks.len() - 1);
    blocks[first_nonzero..].to_vec()
}
