//! AES in ECB (Electronic Codebook) mode.
//!
//! Each block is encrypted independently under the same key. Stateless:
//! callers needing to chain blocks across separate calls want
//! [`crate::aes::cbc`] or [`crate::aes::engine::AesEngine`] instead.

use crate::aes::core::{aes_decrypt_block, aes_encrypt_block, AES_BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::padding::{pkcs5_pad, pkcs5_unpad, Padding};

/// Encrypt `plaintext` under `key` in ECB mode.
pub fn aes_encrypt_ecb(plaintext: &[u8], key: &[u8], padding: Padding) -> Result<Vec<u8>> {
    let mut data = plaintext.to_vec();

    match padding {
        Padding::Pkcs5Padding => pkcs5_pad(&mut data, AES_BLOCK_SIZE)?,
        Padding::NoPadding => {
            if data.len() % AES_BLOCK_SIZE != 0 {
                return Err(Error::LengthMismatch(data.len()));
            }
        }
    }

    let mut ciphertext = Vec::with_capacity(data.len());
    for chunk in data.chunks(AES_BLOCK_SIZE) {
        let block: [u8; AES_BLOCK_SIZE] = chunk.try_into().expect("chunk is block-sized");
        ciphertext.extend_from_slice(&aes_encrypt_block(&block, key)?);
    }

    Ok(ciphertext)
}

/// Decrypt `ciphertext` under `key` in ECB mode.
pub fn aes_decrypt_ecb(ciphertext: &[u8], key: &[u8], padding: Padding) -> Result<Vec<u8>> {
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(Error::LengthMismatch(ciphertext.len()));
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks(AES_BLOCK_SIZE) {
        let block: [u8; AES_BLOCK_SIZE] = chunk.try_into().expect("chunk is block-sized");
        plaintext.extend_from_slice(&aes_decrypt_block(&block, key)?);
    }

    if padding == Padding::Pkcs5Padding {
        pkcs5_unpad(&mut plaintext)?;
    }

    Ok(plaintext)
}
