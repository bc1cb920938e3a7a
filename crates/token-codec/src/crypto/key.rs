//! [`CodecKey`]: the passphrase-derived AES-256 key.

use sha2::{Digest, Sha256};

use super::cipher::KEY_LEN;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Derived once when a codec is built and shared read-only afterwards.
/// When this type is dropped, the memory is overwritten with zeroes.
#[derive(Clone)]
pub struct CodecKey(Box<[u8; KEY_LEN]>);

impl CodecKey {
    /// Derive a key from a human-readable passphrase.
    ///
    /// The key is the SHA-256 digest of the passphrase's UTF-8 bytes. This is a
    /// plain hash, not a password-hardening KDF, so the passphrase must carry
    /// enough entropy on its own.
    pub fn derive(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&digest);
        Self(buf)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for CodecKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for CodecKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("CodecKey([REDACTED])")
    }
}
