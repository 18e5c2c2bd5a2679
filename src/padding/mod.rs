//! Padding schemes used by the block-cipher mode layer.
//!
//! Two schemes are supported: `NoPadding`, handled at each mode's call site
//! by rejecting misaligned input, and `PKCS5Padding`, implemented in
//! [`pkcs5`].

mod pkcs5;

pub use pkcs5::*;

/// Padding scheme selected on an [`crate::aes::AesEngine`] or passed to a
/// stateless mode function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Input must already be a multiple of the AES block size.
    NoPadding,
    /// PKCS#5 padding is applied on encrypt and stripped on decrypt.
    Pkcs5Padding,
}
