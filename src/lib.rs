//! A software implementation of AES (ECB/CBC/CFB-8/CFB-128/GCM) and RC4.
//!
//! The [`aes`] module holds the block cipher and its modes, built
//! bottom-up from [`gf`] (GF(2^8) arithmetic used by MixColumns) through
//! [`aes::core`] (the single-block primitive) to the mode layer
//! ([`aes::ecb`], [`aes::cbc`], [`aes::cfb`], [`aes::gcm`]) and the
//! stateful [`aes::engine::AesEngine`]. [`rc4`] is an independent stream
//! cipher. [`padding`] holds the block-padding schemes the mode layer
//! uses, and [`convert`] bridges big-endian integers to 16-byte blocks.
//!
//! Every fallible operation returns [`error::Result`].

pub mod aes;
pub mod convert;
pub mod error;
pub mod gf;
pub mod padding;
pub mod rc4;

pub use error::{Error, Result};
