//! Optional signing of outgoing messages
//!
//! A [`MessageSigner`] is chosen once, when the application starts, with
//! [`from_config`]: a [`NoopSigner`] when DKIM is not configured or the crate was
//! built without the `dkim` feature, a [`DkimSigner`](crate::dkim::DkimSigner)
//! otherwise. Call sites then sign every message the same way.
//!
//! [`sign`] does the same in one shot for callers that do not keep a signer.

use std::fmt::Debug;

use crate::dkim::{DkimConfig, Error};

/// Whether the crate was built with DKIM signing
pub const DKIM_AVAILABLE: bool = cfg!(feature = "dkim");

/// Turns a raw message into the raw message to send
pub trait MessageSigner: Debug {
    /// Returns `message`, possibly with headers prepended. Existing bytes are
    /// never changed.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error>;
}

/// Sends messages as they are
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSigner;

impl MessageSigner for NoopSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(message.to_vec())
    }
}

#[cfg(feature = "dkim")]
impl MessageSigner for crate::dkim::DkimSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        crate::dkim::DkimSigner::sign(self, message)
    }
}

impl<S: MessageSigner + ?Sized> MessageSigner for Box<S> {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        (**self).sign(message)
    }
}

/// Picks the signer for `config`
///
/// Fails only when signing is configured with a malformed private key, or
/// with headers that do not include `From`.
pub fn from_config(config: &DkimConfig) -> Result<Box<dyn MessageSigner + Send + Sync>, Error> {
    if !DKIM_AVAILABLE || !config.is_enabled() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            dkim_available = DKIM_AVAILABLE,
            "dkim signing not configured, messages will be sent unsigned"
        );
        return Ok(Box::new(NoopSigner));
    }

    dkim_signer(config)
}

#[cfg(feature = "dkim")]
fn dkim_signer(config: &DkimConfig) -> Result<Box<dyn MessageSigner + Send + Sync>, Error> {
    Ok(Box::new(crate::dkim::DkimSigner::new(config.clone())?))
}

#[cfg(not(feature = "dkim"))]
fn dkim_signer(_config: &DkimConfig) -> Result<Box<dyn MessageSigner + Send + Sync>, Error> {
    Ok(Box::new(NoopSigner))
}

/// Signs `message` with `config` if signing is both available and configured,
/// returns it unchanged otherwise
///
/// A configured but malformed key is an error, never a silent pass-through.
pub fn sign(message: &[u8], config: &DkimConfig) -> Result<Vec<u8>, Error> {
    from_config(config)?.sign(message)
}
