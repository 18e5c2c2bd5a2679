//! AES-GCM: CTR encryption authenticated with GHASH.
//!
//! GHASH operates over GF(2^128) in its bit-reflected representation
//! (reduction polynomial `x^128 + x^7 + x^2 + x + 1`), validated against
//! the McGrew/Viega test vectors.

use crate::aes::core::{aes_encrypt_block, AES_BLOCK_SIZE};
use crate::error::{Error, Result};

/// 128-bit authentication tag.
pub type Tag = [u8; AES_BLOCK_SIZE];

fn xor_block(a: &mut [u8; AES_BLOCK_SIZE], b: &[u8; AES_BLOCK_SIZE]) {
    for i in 0..AES_BLOCK_SIZE {
        a[i] ^= b[i];
    }
}

/// Multiply two GF(2^128) elements in GCM's bit-reflected representation.
/// `x` is consumed by repeated right-shift-with-reduction; `y` is consumed
/// bit by bit from the most-significant end.
fn gf_mul_128(x_in: &[u8; 16], y_in: &[u8; 16]) -> [u8; 16] {
    let mut z = [0u8; 16];
    let mut x = *x_in;
    let mut y = *y_in;

    for _ in 0..128 {
        if y[0] & 0x80 != 0 {
            xor_block(&mut z, &x);
        }

        let lsb_set = x[15] & 1 != 0;
        for b in (1..16).rev() {
            x[b] = (x[b] >> 1) | (x[b - 1] << 7);
        }
        x[0] >>= 1;
        if lsb_set {
            x[0] ^= 0xE1;
        }

        for b in 0..15 {
            y[b] = (y[b] << 1) | (y[b + 1] >> 7);
        }
        y[15] <<= 1;
    }

    z
}

fn pad_to_blocks(data: &[u8]) -> Vec<u8> {
    let padded_len = data.len().div_ceil(AES_BLOCK_SIZE) * AES_BLOCK_SIZE;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    padded
}

/// GHASH(H, A, C): the GCM polynomial hash over associated data and
/// ciphertext, each zero-padded to a block boundary, with a trailing
/// length block.
pub fn ghash(h: &[u8; AES_BLOCK_SIZE], aad: &[u8], data: &[u8]) -> [u8; AES_BLOCK_SIZE] {
    let mut x = [0u8; AES_BLOCK_SIZE];

    let padded_aad = pad_to_blocks(aad);
    for block in padded_aad.chunks(AES_BLOCK_SIZE) {
        let b: [u8; AES_BLOCK_SIZE] = block.try_into().expect("block-sized chunk");
        xor_block(&mut x, &b);
        x = gf_mul_128(&x, h);
    }

    let padded_data = pad_to_blocks(data);
    for block in padded_data.chunks(AES_BLOCK_SIZE) {
        let b: [u8; AES_BLOCK_SIZE] = block.try_into().expect("block-sized chunk");
        xor_block(&mut x, &b);
        x = gf_mul_128(&x, h);
    }

    let mut trailer = [0u8; AES_BLOCK_SIZE];
    trailer[0..8].copy_from_slice(&((aad.len() as u64) * 8).to_be_bytes());
    trailer[8..16].copy_from_slice(&((data.len() as u64) * 8).to_be_bytes());
    xor_block(&mut x, &trailer);
    gf_mul_128(&x, h)
}

/// Increment the low 32 bits of a 128-bit counter block, modulo 2^32,
/// leaving the upper 96 bits untouched.
pub fn incr32(block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
    let mut out = *block;
    let counter = u32::from_be_bytes(out[12..16].try_into().unwrap());
    let next = counter.wrapping_add(1);
    out[12..16].copy_from_slice(&next.to_be_bytes());
    out
}

fn compute_y0(h: &[u8; AES_BLOCK_SIZE], iv: &[u8]) -> [u8; AES_BLOCK_SIZE] {
    if iv.len() == 12 {
        let mut y0 = [0u8; AES_BLOCK_SIZE];
        y0[..12].copy_from_slice(iv);
        y0[15] = 1;
        y0
    } else {
        ghash(h, &[], iv)
    }
}

fn gctr(key: &[u8], icb: &[u8; AES_BLOCK_SIZE], input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut counter = *icb;

    for chunk in input.chunks(AES_BLOCK_SIZE) {
        counter = incr32(&counter);
        let keystream = aes_encrypt_block(&counter, key)?;
        for (i, &b) in chunk.iter().enumerate() {
            output.push(b ^ keystream[i]);
        }
    }

    Ok(output)
}

/// Fixed-time byte-wise comparison: XOR-folds every byte difference and
/// tests the fold against zero, never short-circuiting on a mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for i in 0..a.len() {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}

/// Encrypt `plaintext` under AES-GCM, authenticating `aad` alongside it.
/// Returns the ciphertext and the 128-bit tag.
pub fn gcm_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<(Vec<u8>, Tag)> {
    let h = aes_encrypt_block(&[0u8; AES_BLOCK_SIZE], key)?;
    let y0 = compute_y0(&h, iv);

    let ciphertext = gctr(key, &y0, plaintext)?;

    let s = ghash(&h, aad, &ciphertext);
    let e_y0 = aes_encrypt_block(&y0, key)?;
    let mut tag = [0u8; AES_BLOCK_SIZE];
    for i in 0..AES_BLOCK_SIZE {
        tag[i] = s[i] ^ e_y0[i];
    }

    Ok((ciphertext, tag))
}

/// Decrypt `ciphertext` under AES-GCM and verify `tag`. On a tag
/// mismatch, returns [`Error::TagMismatch`] and releases no plaintext.
pub fn gcm_decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &Tag,
) -> Result<Vec<u8>> {
    let h = aes_encrypt_block(&[0u8; AES_BLOCK_SIZE], key)?;
    let y0 = compute_y0(&h, iv);

    let s = ghash(&h, aad, ciphertext);
    let e_y0 = aes_encrypt_block(&y0, key)?;
    let mut expected_tag = [0u8; AES_BLOCK_SIZE];
    for i in 0..AES_BLOCK_SIZE {
        expected_tag[i] = s[i] ^ e_y0[i];
    }

    if !constant_time_eq(&expected_tag, tag) {
        return Err(Error::TagMismatch);
    }

    gctr(key, &y0, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_1_empty_inputs() {
        let key = [0u8; 16];
        let iv = [0u8; 12];
        let (ciphertext, tag) = gcm_encrypt(&key, &iv, &[], &[]).unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(hex::encode(tag), "58e2fccefa7e3061367f1d57a4e7455a");
    }

    #[test]
    fn test_case_3_full_vector() {
        let key = hex::decode("feffe9928665731c6d6a8f9467308308").unwrap();
        let iv = hex::decode("cafebabefacedbaddecaf888").unwrap();
        let plaintext = hex::decode(
            "d9313225f88406e5a55909c5aff5269a\
             86a7a9531534f7da2e4c303d8a318a72\
             1c3c0c95956809532fcf0e2449a6b525\
             b16aedf5aa0de657ba637b39",
        )
        .unwrap();

        let (_, tag) = gcm_encrypt(&key, &iv, &plaintext, &[]).unwrap();
        assert_eq!(hex::encode(tag), "4d5c2af327cd64a62cf35abd2ba6fab4");
    }

    #[test]
    fn round_trips_with_aad() {
        let key = [0x42u8; 16];
        let iv = [0x01u8; 12];
        let plaintext = b"attack at dawn".to_vec();
        let aad = b"header".to_vec();

        let (ciphertext, tag) = gcm_encrypt(&key, &iv, &plaintext, &aad).unwrap();
        let decrypted = gcm_decrypt(&key, &iv, &ciphertext, &aad, &tag).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn tag_mismatch_on_flipped_ciphertext_bit() {
        let key = [0x42u8; 16];
        let iv = [0x01u8; 12];
        let plaintext = b"attack at dawn".to_vec();

        let (mut ciphertext, tag) = gcm_encrypt(&key, &iv, &plaintext, &[]).unwrap();
        ciphertext[0] ^= 0x01;

        assert_eq!(
            gcm_decrypt(&key, &iv, &ciphertext, &[], &tag),
            Err(Error::TagMismatch)
        );
    }

    #[test]
    fn iv_length_branching_changes_tag_and_ciphertext() {
        let key = [0x07u8; 16];
        let plaintext = b"same plaintext".to_vec();

        let iv12 = [0xAAu8; 12];
        let mut iv_embedded = vec![0u8; 16];
        iv_embedded[..12].copy_from_slice(&iv12);

        let (c1, t1) = gcm_encrypt(&key, &iv12, &plaintext, &[]).unwrap();
        let (c2, t2) = gcm_encrypt(&key, &iv_embedded, &plaintext, &[]).unwrap();

        assert_ne!(c1, c2);
        assert_ne!(t1, t2);
    }

    #[test]
    fn flipping_aad_bit_breaks_verification() {
        let key = [0x09u8; 16];
        let iv = [0x02u8; 12];
        let plaintext = b"payload".to_vec();
        let aad = b"associated".to_vec();

        let (ciphertext, tag) = gcm_encrypt(&key, &iv, &plaintext, &aad).unwrap();
        let mut bad_aad = aad.clone();
        bad_aad[0] ^= 0x01;

        assert_eq!(
            gcm_decrypt(&key, &iv, &ciphertext, &bad_aad, &tag),
            Err(Error::TagMismatch)
        );
    }

    #[test]
    fn flipping_key_bit_breaks_verification() {
        let key = [0x09u8; 16];
        let iv = [0x02u8; 12];
        let plaintext = b"payload".to_vec();

        let (ciphertext, tag) = gcm_encrypt(&key, &iv, &plaintext, &[]).unwrap();
        let mut bad_key = key;
        bad_key[0] ^= 0x01;

        assert_eq!(
            gcm_decrypt(&bad_key, &iv, &ciphertext, &[], &tag),
            Err(Error::TagMismatch)
        );
    }

    #[test]
    fn flipping_iv_bit_breaks_verification() {
        let key = [0x09u8; 16];
        let iv = [0x02u8; 12];
        let plaintext = b"payload".to_vec();

        let (ciphertext, tag) = gcm_encrypt(&key, &iv, &plaintext, &[]).unwrap();
        let mut bad_iv = iv;
        bad_iv[0] ^= 0x01;

        assert_eq!(
            gcm_decrypt(&key, &bad_iv, &ciphertext, &[], &tag),
            Err(Error::TagMismatch)
        );
    }

    #[test]
    fn flipping_tag_bit_breaks_verification() {
        let key = [0x09u8; 16];
        let iv = [0x02u8; 12];
        let plaintext = b"payload".to_vec();

        let (ciphertext, mut tag) = gcm_encrypt(&key, &iv, &plaintext, &[]).unwrap();
        tag[0] ^= 0x01;

        assert_eq!(
            gcm_decrypt(&key, &iv, &ciphertext, &[], &tag),
            Err(Error::TagMismatch)
        );
    }

    #[test]
    fn incr32_wraps_at_boundary() {
        let mut block = [0u8; 16];
        block[12..16].copy_from_slice(&0xFFFFFFFFu32.to_be_bytes());
        let next = incr32(&block);
        assert_eq!(&next[12..16], &0u32.to_be_bytes());
    }
}
