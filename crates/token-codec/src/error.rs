//! Error types for encode and decode.
//!
//! The outward contract is coarse: a caller sees [`CodecError::Encode`] or
//! [`CodecError::Decode`]. The specific cause stays attached as the error
//! source and through [`CodecError::cause`].

use thiserror::Error;

use crate::crypto::CipherError;

/// Failure on the encode path.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The cipher failed to seal the serialized text.
    #[error("encryption error: {0}")]
    Encryption(#[source] CipherError),
}

/// Failure on the decode path.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token is malformed, sealed under another key, tampered with, or
    /// does not decrypt to text.
    #[error("decryption error: {0}")]
    Decryption(#[source] CipherError),

    /// The decrypted text is not valid JSON for the requested type.
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),
}

/// Top-level codec error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Encoding a value failed.
    #[error("failed to encode value")]
    Encode(#[source] EncodeError),

    /// Decoding a token failed.
    #[error("failed to decode token")]
    Decode(#[source] DecodeError),

    /// The process-wide codec was used before [`crate::install`].
    #[error("codec not yet initialised")]
    NotInitialised,
}

/// Specific failure class behind a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Serialization,
    Encryption,
    Decryption,
    Deserialization,
    NotInitialised,
}

impl CodecError {
    /// Returns the specific failure class for diagnostics.
    pub fn cause(&self) -> FailureCause {
        match self {
            CodecError::Encode(EncodeError::Serialization(_)) => FailureCause::Serialization,
            CodecError::Encode(EncodeError::Encryption(_)) => FailureCause::Encryption,
            CodecError::Decode(DecodeError::Decryption(_)) => FailureCause::Decryption,
            CodecError::Decode(DecodeError::Deserialization(_)) => FailureCause::Deserialization,
            CodecError::NotInitialised => FailureCause::NotInitialised,
        }
    }

    /// Short machine-readable code (e.g. `"decode_failed"`).
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Encode(_) => "encode_failed",
            CodecError::Decode(_) => "decode_failed",
            CodecError::NotInitialised => "not_initialised",
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
