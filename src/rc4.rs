//! RC4 stream cipher.
//!
//! The permutation and index registers live on the [`Rc4`] instance rather
//! than as process-wide globals, so that multiple independent streams can
//! coexist and be used from different threads (each serialized on its own
//! instance).

use crate::error::{Error, Result};

/// An RC4 keystream generator, holding the 256-byte permutation and the
/// two PRGA index registers. Unusable until [`Rc4::set_key`] is called.
#[derive(Clone)]
pub struct Rc4 {
    state: Option<KeyedState>,
}

#[derive(Clone)]
struct KeyedState {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Construct an unkeyed generator.
    pub fn new() -> Self {
        Rc4 { state: None }
    }

    /// Run the key-scheduling algorithm over `key` and install the
    /// resulting permutation. Keys of 1 to 256 bytes are accepted.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.is_empty() || key.len() > 256 {
            return Err(Error::InvalidKeySize(key.len()));
        }

        let mut s: [u8; 256] = [0; 256];
        for (idx, b) in s.iter_mut().enumerate() {
            *b = idx as u8;
        }

        let mut j: u8 = 0;
        for i in 0..256usize {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        self.state = Some(KeyedState { s, i: 0, j: 0 });
        Ok(())
    }

    /// Produce the next keystream byte via PRGA.
    fn next_byte(state: &mut KeyedState) -> u8 {
        state.i = state.i.wrapping_add(1);
        state.j = state.j.wrapping_add(state.s[state.i as usize]);
        state.s.swap(state.i as usize, state.j as usize);
        let t = state.s[state.i as usize].wrapping_add(state.s[state.j as usize]);
        state.s[t as usize]
    }

    /// XOR `data` with the keystream, advancing the generator's state.
    /// Encryption and decryption are the same operation.
    pub fn apply(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let state = self.state.as_mut().ok_or(Error::KeyNotSet)?;
        Ok(data.iter().map(|&b| b ^ Self::next_byte(state)).collect())
    }

    /// Alias for [`Rc4::apply`], read at the call site as encryption.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.apply(plaintext)
    }

    /// Alias for [`Rc4::apply`], read at the call site as decryption.
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.apply(ciphertext)
    }
}

impl Default for Rc4 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(key: &[u8]) -> Rc4 {
        let mut rc4 = Rc4::new();
        rc4.set_key(key).unwrap();
        rc4
    }

    #[test]
    fn wikipedia_vector_key_plaintext() {
        let mut rc4 = keyed(b"Key");
        let ciphertext = rc4.encrypt(b"Plaintext").unwrap();
        assert_eq!(hex::encode_upper(ciphertext), "BBF316E8D940AF0AD3");
    }

    #[test]
    fn wikipedia_vector_wiki_pedia() {
        let mut rc4 = keyed(b"Wiki");
        let ciphertext = rc4.encrypt(b"pedia").unwrap();
        assert_eq!(hex::encode_upper(ciphertext), "1021BF0420");
    }

    #[test]
    fn round_trips() {
        let key = b"some secret key";
        let plaintext = b"the quick brown fox jumps over the lazy dog".to_vec();

        let mut enc = keyed(key);
        let ciphertext = enc.encrypt(&plaintext).unwrap();

        let mut dec = keyed(key);
        let decrypted = dec.decrypt(&ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn two_instances_with_different_keys_are_independent() {
        let mut a = keyed(b"keyA");
        let mut b = keyed(b"keyB");
        let data = [0u8; 8];
        assert_ne!(a.apply(&data).unwrap(), b.apply(&data).unwrap());
    }

    #[test]
    fn rejects_empty_key() {
        let mut rc4 = Rc4::new();
        assert!(matches!(rc4.set_key(&[]), Err(Error::InvalidKeySize(0))));
    }

    #[test]
    fn rejects_use_before_set_key() {
        let mut rc4 = Rc4::new();
        assert_eq!(rc4.apply(&[0u8; 4]), Err(Error::KeyNotSet));
    }
}
