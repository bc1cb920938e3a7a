//! Seal JSON-serializable values into opaque text tokens and open them again.
//!
//! A [`SymmetricCodec`] serializes a value with `serde_json`, encrypts the text
//! with AES-256-GCM-SIV under a passphrase-derived key, and packs nonce and
//! ciphertext into one base64url string. [`SymmetricCodec::decode`] reverses
//! the steps.
//!
//! ```rust,no_run
//! use serde_json::{json, Value};
//! use token_codec::{CodecConfig, SymmetricCodec};
//!
//! let cfg = CodecConfig::from_env()?;
//! let codec = SymmetricCodec::from_config(&cfg);
//!
//! let token = codec.encode(&json!({"role": "user", "text": "hello"}))?;
//! let value: Value = codec.decode(&token)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Telemetry invariants
//!
//! No plaintext, token, or key material appears in any log field; only sizes
//! and error causes are logged.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod global;

pub use codec::SymmetricCodec;
pub use config::{CodecConfig, ConfigError};
pub use error::{CodecError, DecodeError, EncodeError, FailureCause, Result};
pub use global::{decode, encode, install, is_installed};
