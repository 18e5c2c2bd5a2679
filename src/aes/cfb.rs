//! AES in CFB-8 and CFB-128 (Cipher Feedback) modes.
//!
//! Both are stateless, keystream-style constructions: a 16-byte shift
//! register seeded with the IV is repeatedly encrypted under the block
//! cipher to derive keystream, and then updated from the ciphertext
//! actually produced/consumed rather than from the plaintext.
//!
//! CFB-8's register must be updated with the single consumed/produced
//! ciphertext byte on each step, matching the NIST CFB-8 test vectors.

use crate::aes::core::{aes_encrypt_block, AES_BLOCK_SIZE};
use crate::error::Result;

/// Encrypt `plaintext` under CFB-8 feedback.
pub fn encrypt_cfb8(key: &[u8], iv: &[u8; AES_BLOCK_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut register = *iv;
    let mut ciphertext = Vec::with_capacity(plaintext.len());

    for &p in plaintext {
        let keystream = aes_encrypt_block(&register, key)?;
        let c = p ^ keystream[0];
        ciphertext.push(c);
        register.copy_within(1.., 0);
        register[AES_BLOCK_SIZE - 1] = c;
    }

    Ok(ciphertext)
}

/// Decrypt `ciphertext` under CFB-8 feedback.
pub fn decrypt_cfb8(key: &[u8], iv: &[u8; AES_BLOCK_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut register = *iv;
    let mut plaintext = Vec::with_capacity(ciphertext.len());

    for &c in ciphertext {
        let keystream = aes_encrypt_block(&register, key)?;
        let p = c ^ keystream[0];
        plaintext.push(p);
        register.copy_within(1.., 0);
        register[AES_BLOCK_SIZE - 1] = c;
    }

    Ok(plaintext)
}

/// Encrypt `plaintext` under CFB-128 feedback. Unlike CFB-8, the final
/// partial block (if any) is XOR-ed against only its matching leading
/// keystream bytes.
pub fn encrypt_cfb128(key: &[u8], iv: &[u8; AES_BLOCK_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut register = *iv;
    let mut ciphertext = Vec::with_capacity(plaintext.len());

    for chunk in plaintext.chunks(AES_BLOCK_SIZE) {
        let keystream = aes_encrypt_block(&register, key)?;
        let mut block = [0u8; AES_BLOCK_SIZE];
        for (i, &p) in chunk.iter().enumerate() {
            block[i] = p ^ keystream[i];
        }
        ciphertext.extend_from_slice(&block[..chunk.len()]);
        register = block;
    }

    Ok(ciphertext)
}

/// Decrypt `ciphertext` under CFB-128 feedback.
pub fn decrypt_cfb128(key: &[u8], iv: &[u8; AES_BLOCK_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut register = *iv;
    let mut plaintext = Vec::with_capacity(ciphertext.len());

    for chunk in ciphertext.chunks(AES_BLOCK_SIZE) {
        let keystream = aes_encrypt_block(&register, key)?;
        let mut next_register = [0u8; AES_BLOCK_SIZE];
        next_register[..chunk.len()].copy_from_slice(chunk);

        for (i, &c) in chunk.iter().enumerate() {
            plaintext.push(c ^ keystream[i]);
        }
        register = next_register;
    }

    Ok(plaintext)
}
