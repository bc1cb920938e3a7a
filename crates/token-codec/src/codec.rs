//! [`SymmetricCodec`]: value ⇄ sealed token.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::crypto::{cipher, CodecKey};
use crate::error::{CodecError, DecodeError, EncodeError, Result};

/// Reversible transformation between a JSON-serializable value and an opaque
/// encrypted token, keyed by one fixed passphrase.
///
/// Cheap to clone; clones share the same key. Every call is independent, so a
/// single codec may be used from many threads at once.
#[derive(Clone, Debug)]
pub struct SymmetricCodec {
    key: Arc<CodecKey>,
}

impl SymmetricCodec {
    /// Create a codec whose key is derived from `passphrase`.
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: Arc::new(CodecKey::derive(passphrase)),
        }
    }

    /// Create a codec from validated configuration.
    pub fn from_config(cfg: &CodecConfig) -> Self {
        Self::new(&cfg.passphrase)
    }

    /// Serialize `value` to JSON and seal it into a token.
    ///
    /// Two calls with the same value return different tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] wrapping [`EncodeError::Serialization`]
    /// if `value` cannot be represented as JSON, or
    /// [`EncodeError::Encryption`] if the cipher fails.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        self.try_encode(value).map_err(|e| {
            warn!(error = %e, "encode failed");
            CodecError::Encode(e)
        })
    }

    /// Open a token produced by [`encode`](Self::encode) and parse it as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] wrapping [`DecodeError::Decryption`] if
    /// the token is malformed, was sealed under another passphrase, was
    /// tampered with, or does not decrypt to text; or
    /// [`DecodeError::Deserialization`] if the text is not valid JSON for `T`.
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        self.try_decode(token).map_err(|e| {
            warn!(error = %e, token_len = token.len(), "decode failed");
            CodecError::Decode(e)
        })
    }

    fn try_encode<T: Serialize + ?Sized>(&self, value: &T) -> std::result::Result<String, EncodeError> {
        let text = serde_json::to_string(value).map_err(EncodeError::Serialization)?;
        let sealed =
            cipher::seal(text.as_bytes(), self.key.as_bytes()).map_err(EncodeError::Encryption)?;
        let token = sealed.to_string_repr();
        debug!(plaintext_len = text.len(), token_len = token.len(), "value encoded");
        Ok(token)
    }

    fn try_decode<T: DeserializeOwned>(&self, token: &str) -> std::result::Result<T, DecodeError> {
        let text = cipher::open_text(token, self.key.as_bytes()).map_err(DecodeError::Decryption)?;
        let value = serde_json::from_str(&text).map_err(DecodeError::Deserialization)?;
        debug!(plaintext_len = text.len(), "token decoded");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CipherError;
    use crate::error::FailureCause;
    use serde::{Deserialize, Serializer};
    use serde_json::{json, Value};

    const PASSPHRASE: &str = "unit-test-passphrase";

    fn codec() -> SymmetricCodec {
        SymmetricCodec::new(PASSPHRASE)
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn message_object_round_trip() {
        let c = codec();
        let value = json!({"role": "user", "text": "hello"});
        let token = c.encode(&value).unwrap();
        assert!(!token.contains("hello"));
        assert_eq!(c.decode::<Value>(&token).unwrap(), value);
    }

    #[test]
    fn array_round_trip() {
        let c = codec();
        let token = c.encode(&[1, 2, 3]).unwrap();
        assert_eq!(c.decode::<Vec<i32>>(&token).unwrap(), vec![1, 2, 3]);
        assert_eq!(c.decode::<Value>(&token).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn typed_struct_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Entry {
            title: String,
            sentiment_score: f64,
            tags: Vec<String>,
        }

        let c = codec();
        let entry = Entry {
            title: "Morning pages".into(),
            sentiment_score: 0.25,
            tags: vec!["calm".into()],
        };
        let token = c.encode(&entry).unwrap();
        assert_eq!(c.decode::<Entry>(&token).unwrap(), entry);
    }

    #[test]
    fn encodings_differ_but_decode_equal() {
        let c = codec();
        let value = json!({"a": 1});
        let t1 = c.encode(&value).unwrap();
        let t2 = c.encode(&value).unwrap();
        assert_ne!(t1, t2);
        assert_eq!(c.decode::<Value>(&t1).unwrap(), c.decode::<Value>(&t2).unwrap());
    }

    #[test]
    fn nan_decodes_as_null() {
        let c = codec();
        let token = c.encode(&f64::NAN).unwrap();
        assert_eq!(c.decode::<Value>(&token).unwrap(), Value::Null);
    }

    #[test]
    fn unserializable_value_fails_with_serialization() {
        let err = codec().encode(&Unserializable).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
        assert_eq!(err.cause(), FailureCause::Serialization);
    }

    #[test]
    fn garbage_token_fails_with_decryption() {
        let err = codec().decode::<Value>("not-a-valid-token").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
        assert_eq!(err.cause(), FailureCause::Decryption);
    }

    #[test]
    fn other_passphrase_fails_with_decryption() {
        let token = codec().encode(&json!({"k": "v"})).unwrap();
        let err = SymmetricCodec::new("another-passphrase")
            .decode::<Value>(&token)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::Decryption(CipherError::AeadFailure))
        ));
    }

    #[test]
    fn non_json_plaintext_fails_with_deserialization() {
        let c = codec();
        let sealed = cipher::seal(b"{not json", c.key.as_bytes()).unwrap();
        let err = c.decode::<Value>(&sealed.to_string_repr()).unwrap_err();
        assert_eq!(err.cause(), FailureCause::Deserialization);
    }

    #[test]
    fn wrong_target_type_fails_with_deserialization() {
        let c = codec();
        let token = c.encode(&json!({"role": "user"})).unwrap();
        let err = c.decode::<Vec<u8>>(&token).unwrap_err();
        assert_eq!(err.cause(), FailureCause::Deserialization);
    }

    #[test]
    fn clones_share_the_key() {
        let c = codec();
        let token = c.encode("shared").unwrap();
        assert_eq!(c.clone().decode::<String>(&token).unwrap(), "shared");
    }

    #[test]
    fn from_config_matches_new() {
        let cfg = CodecConfig::new(PASSPHRASE).unwrap();
        let token = SymmetricCodec::from_config(&cfg).encode(&true).unwrap();
        assert!(codec().decode::<bool>(&token).unwrap());
    }
}
