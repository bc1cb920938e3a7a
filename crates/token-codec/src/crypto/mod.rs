//! AES-256-GCM-SIV primitives and passphrase key derivation.
//!
//! This module knows nothing about JSON. It seals and opens byte payloads and
//! owns the textual token layout.
//!
//! # Token format
//!
//! ```text
//! <base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! No version prefix is carried; tokens are only meant to round-trip through
//! this crate.

pub mod cipher;
pub mod key;

pub use cipher::{CipherError, SealedToken, KEY_LEN};
pub use key::CodecKey;
