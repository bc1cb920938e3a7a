//! Process-wide codec behind the free [`encode`] and [`decode`] functions.
//!
//! # Lifecycle
//!
//! 1. At startup the host builds a [`SymmetricCodec`] from configuration and
//!    calls [`install`] once.
//! 2. Any thread may then call [`encode`] / [`decode`] without coordination;
//!    the installed key is immutable.
//! 3. Calls made before [`install`] fail with [`CodecError::NotInitialised`].

use std::sync::OnceLock;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::codec::SymmetricCodec;
use crate::error::{CodecError, Result};

static CODEC: OnceLock<SymmetricCodec> = OnceLock::new();

/// Install the process-wide codec.
///
/// # Errors
///
/// Returns the rejected codec if one has already been installed.
pub fn install(codec: SymmetricCodec) -> std::result::Result<(), SymmetricCodec> {
    CODEC.set(codec)?;
    info!("process-wide codec installed");
    Ok(())
}

/// Returns `true` once [`install`] has succeeded.
pub fn is_installed() -> bool {
    CODEC.get().is_some()
}

fn current() -> Result<&'static SymmetricCodec> {
    CODEC.get().ok_or(CodecError::NotInitialised)
}

/// Encode `value` with the process-wide codec.
///
/// # Errors
///
/// [`CodecError::NotInitialised`] before [`install`]; otherwise as
/// [`SymmetricCodec::encode`].
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    current()?.encode(value)
}

/// Decode `token` with the process-wide codec.
///
/// # Errors
///
/// [`CodecError::NotInitialised`] before [`install`]; otherwise as
/// [`SymmetricCodec::decode`].
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T> {
    current()?.decode(token)
}
