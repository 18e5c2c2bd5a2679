//! PKCS#5 Padding and Unpadding
//!
//! PKCS#5 padding (as used by `PKCS5Padding` throughout this crate) appends
//! `N` bytes of value `N`, where `N = block_size - (len % block_size)`, so a
//! full block of padding is appended when the input is already aligned.
//! Algorithmically this is identical to PKCS#7 padding keyed to a 16-byte
//! block size.

use crate::error::{Error, Result};

/// Apply PKCS#5 padding to `data`, in place, to the next multiple of
/// `block_size`.
pub fn pkcs5_pad(data: &mut Vec<u8>, block_size: usize) -> Result<()> {
    if block_size == 0 || block_size >= 256 {
        return Err(Error::InvalidPadding("block size must be in 1..256"));
    }

    let padding_size = block_size - (data.len() % block_size);
    data.resize(data.len() + padding_size, padding_size as u8);
    Ok(())
}

/// Remove PKCS#5 padding from `data`, in place, validating the trailer.
pub fn pkcs5_unpad(data: &mut Vec<u8>) -> Result<()> {
    let padding_byte = *data.last().ok_or(Error::InvalidPaddingData)? as usize;

    if padding_byte == 0 || padding_byte > data.len() {
        return Err(Error::InvalidPaddingData);
    }

    if data.iter().rev().take(padding_byte).any(|&b| b as usize != padding_byte) {
        return Err(Error::InvalidPaddingData);
    }

    data.truncate(data.len() - padding_byte);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_block_boundary() {
        let mut data = vec![0x01, 0x02, 0x03];
        pkcs5_pad(&mut data, 8).unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0x03, 0x05, 0x05, 0x05, 0x05, 0x05]);
    }

    #[test]
    fn pads_a_full_block_when_already_aligned() {
        let mut data = vec![0x01, 0x02, 0x03, 0x04];
        pkcs5_pad(&mut data, 4).unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0x03, 0x04, 0x04, 0x04, 0x04, 0x04]);
    }

    #[test]
    fn pads_empty_input() {
        let mut data = vec![];
        pkcs5_pad(&mut data, 4).unwrap();
        assert_eq!(data, vec![0x04, 0x04, 0x04, 0x04]);
    }

    #[test]
    fn rejects_invalid_block_sizes() {
        assert!(pkcs5_pad(&mut vec![1], 0).is_err());
        assert!(pkcs5_pad(&mut vec![1], 256).is_err());
    }

    #[test]
    fn unpads_valid_trailer() {
        let mut data = vec![0x01, 0x02, 0x03, 0x04, 0x04, 0x04, 0x04, 0x04];
        pkcs5_unpad(&mut data).unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn rejects_empty_data() {
        let mut data = Vec::new();
        assert_eq!(pkcs5_unpad(&mut data), Err(Error::InvalidPaddingData));
    }

    #[test]
    fn rejects_inconsistent_padding_bytes() {
        let mut data = vec![0x01, 0x02, 0x03, 0x04, 0x04, 0x03, 0x04, 0x04];
        assert_eq!(pkcs5_unpad(&mut data), Err(Error::InvalidPaddingData));
    }

    #[test]
    fn rejects_oversized_padding_length_byte() {
        let mut data = vec![0x01, 0x02, 0x03, 0x09];
        assert_eq!(pkcs5_unpad(&mut data), Err(Error::InvalidPaddingData));
    }

    #[test]
    fn round_trips_across_block_boundary() {
        let original = vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17];
        let mut data = original.clone();
        pkcs5_pad(&mut data, 16).unwrap();
        assert_eq!(data.len() % 16, 0);
        pkcs5_unpad(&mut data).unwrap();
        assert_eq!(data, original);
    }
}
