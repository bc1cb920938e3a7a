//! Error envelope written to stderr and the exit codes that accompany it.

use serde::{Deserialize, Serialize};
use token_codec::CodecError;

use crate::commands::InputError;

/// Exit code for an invalid or missing configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for unreadable or malformed input.
pub const EXIT_INPUT: u8 = 3;
/// Exit code for a failed encode.
pub const EXIT_ENCODE: u8 = 4;
/// Exit code for a failed decode.
pub const EXIT_DECODE: u8 = 5;
/// Exit code for any other failure.
pub const EXIT_INTERNAL: u8 = 1;

/// Standard error body written to stderr on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"decode_failed"`).
    pub code: String,
    /// Human-readable description. Never contains plaintext or key material.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Map a command failure to its exit code and error body.
///
/// Codec failures keep their coarse outward message; the specific cause has
/// already been logged by the codec.
pub fn classify(err: &anyhow::Error) -> (u8, ErrorResponse) {
    if let Some(codec_err) = err.downcast_ref::<CodecError>() {
        let exit = match codec_err {
            CodecError::Encode(_) => EXIT_ENCODE,
            CodecError::Decode(_) => EXIT_DECODE,
            CodecError::NotInitialised => EXIT_INTERNAL,
        };
        return (exit, ErrorResponse::new(codec_err.code(), codec_err.to_string()));
    }
    if let Some(input_err) = err.downcast_ref::<InputError>() {
        return (EXIT_INPUT, ErrorResponse::new("invalid_input", input_err.to_string()));
    }
    (EXIT_INTERNAL, ErrorResponse::new("internal_error", format!("{err:#}")))
}
