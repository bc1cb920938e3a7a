//! AES-256-GCM-SIV sealing and opening of serialized payloads.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is authenticated and
//! nonce-misuse-resistant. A single long-lived passphrase key encrypts an
//! unbounded number of tokens, so an accidental nonce collision must not
//! destroy confidentiality the way it would with plain AES-GCM.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Separator between the nonce and ciphertext segments of a token.
const SEPARATOR: char = '.';

/// A parsed, sealed payload.
///
/// The string representation is `<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedToken {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedToken {
    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}{SEPARATOR}{}",
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Parse a token string back into a [`SealedToken`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string is not two base64url
    /// segments, if the nonce has the wrong length, or if the ciphertext is too
    /// short to contain an authentication tag.
    pub fn from_str(s: &str) -> Result<Self, CipherError> {
        let (nonce_part, ciphertext_part) = s
            .split_once(SEPARATOR)
            .ok_or(CipherError::InvalidFormat)?;

        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(nonce_part)
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(ciphertext_part)
            .map_err(|_| CipherError::InvalidFormat)?;
        if ciphertext.len() < TAG_LEN {
            return Err(CipherError::InvalidFormat);
        }

        Ok(Self { nonce, ciphertext })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM-SIV encryption or decryption failed.
    ///
    /// On decryption this covers a wrong key and a tampered token alike.
    #[error("aead operation failed")]
    AeadFailure,

    /// The token string does not match the expected format.
    #[error("invalid token format")]
    InvalidFormat,

    /// The decrypted bytes are not valid UTF-8 text.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Seal `plaintext` under `key` with a fresh random nonce.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<SealedToken, CipherError> {
    let cipher = build_cipher(key)?;

    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(SealedToken {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Open a [`SealedToken`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] if authentication fails.
pub fn open(token: &SealedToken, key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(&token.nonce);
    cipher
        .decrypt(nonce, token.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)
}

/// Parse, open and UTF-8 check a token string in one step.
///
/// # Errors
///
/// Any [`CipherError`]; [`CipherError::InvalidUtf8`] when the authenticated
/// plaintext is not text.
pub fn open_text(token: &str, key: &[u8]) -> Result<String, CipherError> {
    let sealed = SealedToken::from_str(token)?;
    let bytes = open(&sealed, key)?;
    String::from_utf8(bytes).map_err(|_| CipherError::InvalidUtf8)
}

fn build_cipher(key: &[u8]) -> Result<Aes256GcmSiv, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256GcmSiv::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}
