//! ### Sending Messages
//!
//! This crate does not talk to SES itself. The network side is an
//! [`SesClient`], implemented by the application over the SDK it already uses;
//! [`SesTransport`] sits in front of it and signs every message before handing
//! it over.
//!
//! * [`SesTransport`] signs then calls the client's send-raw-email operation
//! * [`stub::StubClient`] records what it is given, useful for testing
//!
//! Retries, throttling and credentials refresh are the client's business.

use std::{error::Error as StdError, fmt};

#[cfg(feature = "async")]
use async_trait::async_trait;

pub use self::{
    envelope::{Envelope, Error as EnvelopeError},
    ses::SesTransport,
};

pub mod envelope;
pub mod ses;
pub mod stub;

/// A raw send request, as expected by the SES `SendRawEmail` operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmail {
    /// `Source` and `Destinations`
    pub envelope: Envelope,
    /// Full message, signature included
    pub data: Vec<u8>,
}

/// Blocking client for the SES raw send operation
pub trait SesClient {
    /// Response produced by the client, usually the SES message id
    type Ok: fmt::Debug;
    /// Error produced by the client
    type Error: StdError + Send + Sync + 'static;

    /// Sends the raw email
    fn send_raw_email(&self, email: &RawEmail) -> Result<Self::Ok, Self::Error>;
}

/// Async client for the SES raw send operation
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
#[async_trait]
pub trait AsyncSesClient {
    /// Response produced by the client, usually the SES message id
    type Ok: fmt::Debug + Send;
    /// Error produced by the client
    type Error: StdError + Send + Sync + 'static;

    /// Sends the raw email
    async fn send_raw_email(&self, email: &RawEmail) -> Result<Self::Ok, Self::Error>;
}

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends an already formatted message
    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error>;
}

/// Async Transport method for emails
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
#[async_trait]
pub trait AsyncTransport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends an already formatted message
    async fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error>;
}
