//! AES in CBC (Cipher Block Chaining) mode.
//!
//! The chaining step is factored out as [`cbc_encrypt_step`] /
//! [`cbc_decrypt_step`], each advancing a caller-owned 16-byte IV register
//! in place. [`aes_encrypt_cbc`] / [`aes_decrypt_cbc`] below are stateless
//! whole-buffer wrappers over that step; [`crate::aes::engine::AesEngine`]
//! reuses the same step functions to chain across separate calls.

use crate::aes::core::{aes_decrypt_block, aes_encrypt_block, AES_BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::padding::{pkcs5_pad, pkcs5_unpad, Padding};

/// Encrypt one block under CBC, XORing with `iv` first and then updating
/// `iv` in place to the resulting ciphertext block (the register CBC
/// chains forward with).
pub fn cbc_encrypt_step(
    block: &[u8; AES_BLOCK_SIZE],
    key: &[u8],
    iv: &mut [u8; AES_BLOCK_SIZE],
) -> Result<[u8; AES_BLOCK_SIZE]> {
    let mut xored = [0u8; AES_BLOCK_SIZE];
    for i in 0..AES_BLOCK_SIZE {
        xored[i] = block[i] ^ iv[i];
    }
    let ciphertext = aes_encrypt_block(&xored, key)?;
    *iv = ciphertext;
    Ok(ciphertext)
}

/// Decrypt one block under CBC, updating `iv` in place to the ciphertext
/// block just consumed (so the next call XORs against it).
pub fn cbc_decrypt_step(
    block: &[u8; AES_BLOCK_SIZE],
    key: &[u8],
    iv: &mut [u8; AES_BLOCK_SIZE],
) -> Result<[u8; AES_BLOCK_SIZE]> {
    let decrypted = aes_decrypt_block(block, key)?;
    let mut plaintext = [0u8; AES_BLOCK_SIZE];
    for i in 0..AES_BLOCK_SIZE {
        plaintext[i] = decrypted[i] ^ iv[i];
    }
    *iv = *block;
    Ok(plaintext)
}

/// Encrypt `plaintext` under `key` in CBC mode, starting from `iv`.
pub fn aes_encrypt_cbc(
    plaintext: &[u8],
    key: &[u8],
    iv: &[u8; AES_BLOCK_SIZE],
    padding: Padding,
) -> Result<Vec<u8>> {
    let mut data = plaintext.to_vec();

    match padding {
        Padding::Pkcs5Padding => pkcs5_pad(&mut data, AES_BLOCK_SIZE)?,
        Padding::NoPadding => {
            if data.len() % AES_BLOCK_SIZE != 0 {
                return Err(Error::LengthMismatch(data.len()));
            }
        }
    }

    let mut register = *iv;
    let mut ciphertext = Vec::with_capacity(data.len());
    for chunk in data.chunks(AES_BLOCK_SIZE) {
        let block: [u8; AES_BLOCK_SIZE] = chunk.try_into().expect("chunk is block-sized");
        ciphertext.extend_from_slice(&cbc_encrypt_step(&block, key, &mut register)?);
    }

    Ok(ciphertext)
}

/// Decrypt `ciphertext` under `key` in CBC mode, starting from `iv`.
pub fn aes_decrypt_cbc(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8; AES_BLOCK_SIZE],
    padding: Padding,
) -> Result<Vec<u8>> {
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(Error::LengthMismatch(ciphertext.len()));
    }

    let mut register = *iv;
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks(AES_BLOCK_SIZE) {
        let block: [u8; AES_BLOCK_SIZE] = chunk.try_into().expect("chunk is block-sized");
        plaintext.extend_from_slice(&cbc_decrypt_step(&block, key, &mut register)?);
    }

    if padding == Padding::Pkcs5Padding {
        pkcs5_unpad(&mut plaintext)?;
    }

    Ok(plaintext)
}
