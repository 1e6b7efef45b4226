//! Error type for DKIM signing

use std::{error::Error as StdError, fmt};

use crate::BoxError;

/// The errors that may occur while signing a message
///
/// Signing that is simply not configured is never an error: the message is
/// passed through unsigned instead.
pub struct Error {
    inner: Box<Inner>,
}

#[cfg_attr(not(feature = "dkim"), allow(dead_code))]
struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    #[cfg(feature = "dkim")]
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    /// Returns true if the private key could not be read
    pub fn is_key(&self) -> bool {
        matches!(self.inner.kind, Kind::Key)
    }

    /// Returns true if the configuration cannot produce a valid signature,
    /// for instance when `From` is not among the headers to sign
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, Kind::Config)
    }

    /// Returns true if the header block of the message is malformed or has no
    /// `From` header
    pub fn is_message(&self) -> bool {
        matches!(self.inner.kind, Kind::Message)
    }

    /// Returns true if the signature primitive itself failed
    pub fn is_signature(&self) -> bool {
        matches!(self.inner.kind, Kind::Signature)
    }
}

#[derive(Debug)]
#[cfg_attr(not(feature = "dkim"), allow(dead_code))]
pub(crate) enum Kind {
    /// Malformed private key
    Key,
    /// Unusable signing configuration
    Config,
    /// Malformed header block
    Message,
    /// Signature computation failure
    Signature,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("seacucumber::dkim::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Key => f.write_str("invalid dkim private key")?,
            Kind::Config => f.write_str("invalid dkim configuration")?,
            Kind::Message => f.write_str("malformed message headers")?,
            Kind::Signature => f.write_str("dkim signature failed")?,
        };

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn StdError + 'static) = &**e;
            r
        })
    }
}

#[cfg(feature = "dkim")]
pub(crate) fn key<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Key, Some(e))
}

#[cfg(feature = "dkim")]
pub(crate) fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config, Some(e))
}

#[cfg(feature = "dkim")]
pub(crate) fn message<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Message, Some(e))
}

#[cfg(feature = "dkim")]
pub(crate) fn signature<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Signature, Some(e))
}
