//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns a [`Result`] over a single
//! closed [`Error`] enum rather than `Box<dyn Error>` strings, so callers can
//! match on the failure kind instead of inspecting a message.

use thiserror::Error as ThisError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors this crate can produce.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum Error {
    /// A key's length doesn't correspond to a supported AES/RC4 key size.
    #[error("invalid key size: {0} bytes")]
    InvalidKeySize(usize),

    /// An unrecognized cipher mode tag was requested.
    #[error("invalid mode: {0}")]
    InvalidMode(&'static str),

    /// An unrecognized padding tag was requested.
    #[error("invalid padding: {0}")]
    InvalidPadding(&'static str),

    /// CBC mode was configured without an initialization vector.
    #[error("CBC mode requires a 16-byte initialization vector")]
    MissingIV,

    /// `encrypt`/`decrypt` was called before `set_key`.
    #[error("key has not been set on this engine")]
    KeyNotSet,

    /// PKCS#5 unpadding found a malformed trailer (bad length byte or
    /// inconsistent padding bytes).
    #[error("invalid PKCS5 padding")]
    InvalidPaddingData,

    /// `NoPadding` was selected but the input isn't a multiple of the block
    /// size.
    #[error("input length {0} is not a multiple of the AES block size")]
    LengthMismatch(usize),

    /// GCM tag verification failed; no plaintext is released on this error.
    #[error("GCM authentication tag mismatch")]
    TagMismatch,
}
