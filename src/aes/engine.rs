//! Stateful AES engine: the `new`/`setKey`/`encrypt`/`decrypt` object
//! surface over ECB and CBC.
//!
//! CBC tracks two independent IV registers, one per direction, because a
//! caller may alternate `encrypt`/`decrypt` calls on the same engine and
//! each direction's register advances from its own last-seen block (see
//! [`crate::aes::cbc`]). ECB holds no IV state at all; each call is
//! processed independently.

use crate::aes::cbc::{cbc_decrypt_step, cbc_encrypt_step};
use crate::aes::core::{aes_decrypt_block, aes_encrypt_block, AES_BLOCK_SIZE};
use crate::convert::{blocks_to_int, int_to_blocks};
use crate::error::{Error, Result};
use crate::padding::{pkcs5_pad, pkcs5_unpad, Padding};

/// Chaining mode an [`AesEngine`] is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc,
}

/// A key-set, stateful AES encryptor/decryptor.
///
/// Constructed with [`AesEngine::new`], then made usable by
/// [`AesEngine::set_key`]. Every subsequent `encrypt`/`decrypt` call
/// advances this engine's state (for CBC, the relevant direction's IV
/// register); calls on the same engine act as a continuation of one
/// long stream, not independent operations.
pub struct AesEngine {
    mode: Mode,
    padding: Padding,
    key: Option<Vec<u8>>,
    iv_enc: Option<[u8; AES_BLOCK_SIZE]>,
    iv_dec: Option<[u8; AES_BLOCK_SIZE]>,
}

impl AesEngine {
    /// Construct an engine for `mode`/`padding`. The engine cannot
    /// encrypt or decrypt until [`AesEngine::set_key`] is called.
    pub fn new(mode: Mode, padding: Padding) -> Self {
        AesEngine {
            mode,
            padding,
            key: None,
            iv_enc: None,
            iv_dec: None,
        }
    }

    /// Install the key (16/24/32 bytes, selecting AES-128/192/256) and,
    /// for CBC, the starting IV shared by both direction registers.
    pub fn set_key(&mut self, key: &[u8], iv: Option<[u8; AES_BLOCK_SIZE]>) -> Result<()> {
        match key.len() {
            16 | 24 | 32 => {}
            other => return Err(Error::InvalidKeySize(other)),
        }

        match self.mode {
            Mode::Cbc => {
                let iv = iv.ok_or(Error::MissingIV)?;
                self.iv_enc = Some(iv);
                self.iv_dec = Some(iv);
            }
            Mode::Ecb => {
                if iv.is_some() {
                    return Err(Error::InvalidMode("ECB does not take an IV"));
                }
            }
        }

        self.key = Some(key.to_vec());
        Ok(())
    }

    fn key(&self) -> Result<&[u8]> {
        self.key.as_deref().ok_or(Error::KeyNotSet)
    }

    /// Encrypt a byte string, advancing CBC's encrypt-direction IV.
    pub fn encrypt(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?.to_vec();
        let mut data = input.to_vec();

        match self.padding {
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
            let out = match self.mode {
                Mode::Ecb => aes_encrypt_block(&block, &key)?,
                Mode::Cbc => {
                    let iv = self.iv_enc.as_mut().ok_or(Error::MissingIV)?;
                    cbc_encrypt_step(&block, &key, iv)?
                }
            };
            ciphertext.extend_from_slice(&out);
        }

        Ok(ciphertext)
    }

    /// Decrypt a byte string, advancing CBC's decrypt-direction IV.
    pub fn decrypt(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let key = self.key()?.to_vec();

        if input.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::LengthMismatch(input.len()));
        }

        let mut plaintext = Vec::with_capacity(input.len());
        for chunk in input.chunks(AES_BLOCK_SIZE) {
            let block: [u8; AES_BLOCK_SIZE] = chunk.try_into().expect("chunk is block-sized");
            let out = match self.mode {
                Mode::Ecb => aes_decrypt_block(&block, &key)?,
                Mode::Cbc => {
                    let iv = self.iv_dec.as_mut().ok_or(Error::MissingIV)?;
                    cbc_decrypt_step(&block, &key, iv)?
                }
            };
            plaintext.extend_from_slice(&out);
        }

        if self.padding == Padding::Pkcs5Padding {
            pkcs5_unpad(&mut plaintext)?;
        }

        Ok(plaintext)
    }

    /// Encrypt a big-endian integer magnitude, returning the result as a
    /// big-endian integer magnitude (see [`crate::convert`]).
    pub fn encrypt_int(&mut self, magnitude: &[u8]) -> Result<Vec<u8>> {
        let blocks = int_to_blocks(magnitude)?;
        let ciphertext = self.encrypt(&blocks)?;
        Ok(blocks_to_int(&ciphertext))
    }

    /// Decrypt a big-endian integer magnitude produced by
    /// [`AesEngine::encrypt_int`].
    pub fn decrypt_int(&mut self, magnitude: &[u8]) -> Result<Vec<u8>> {
        let blocks = int_to_blocks(magnitude)?;
        let plaintext = self.decrypt(&blocks)?;
        Ok(blocks_to_int(&plaintext))
    }
}
