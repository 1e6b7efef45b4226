//! The SES transport signs each message and passes it to an [`SesClient`].
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use seacucumber::transport::{stub::StubClient, Envelope, SesTransport, Transport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // DKIM_DOMAIN and DKIM_PRIVATE_KEY are not set: messages go out unsigned
//! let settings: HashMap<String, String> = HashMap::new();
//! let transport = SesTransport::from_settings(StubClient::new_ok(), &settings)?;
//!
//! let envelope = Envelope::new(None, vec!["b@example.com".to_owned()])?;
//! let message_id = transport.send_raw(&envelope, b"From: a@example.com\r\n\r\nhi")?;
//! assert_eq!(message_id, "stub-1");
//!
//! let sent = transport.client().messages();
//! assert_eq!(sent[0].data, b"From: a@example.com\r\n\r\nhi");
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "async")]
use async_trait::async_trait;

pub use self::error::Error;
#[cfg(feature = "async")]
use super::{AsyncSesClient, AsyncTransport};
use super::{Envelope, RawEmail, SesClient, Transport};
use crate::{
    config::{self, Settings},
    dkim::{self, DkimConfig},
    signer::{self, MessageSigner, NoopSigner},
};

mod error;

/// Signs messages, then sends them with an SES client
#[derive(Debug)]
pub struct SesTransport<C> {
    client: C,
    signer: Box<dyn MessageSigner + Send + Sync>,
}

impl<C> SesTransport<C> {
    /// Creates a transport sending every message unsigned
    pub fn new(client: C) -> Self {
        Self::with_signer(client, NoopSigner)
    }

    /// Creates a transport using `signer`
    pub fn with_signer<S>(client: C, signer: S) -> Self
    where
        S: MessageSigner + Send + Sync + 'static,
    {
        Self {
            client,
            signer: Box::new(signer),
        }
    }

    /// Creates a transport signing with `config` when it is enabled
    ///
    /// Fails if signing is configured with a malformed key, or with headers
    /// that do not include `From`.
    pub fn from_dkim_config(client: C, config: &DkimConfig) -> Result<Self, dkim::Error> {
        Ok(Self {
            client,
            signer: signer::from_config(config)?,
        })
    }

    /// Creates a transport signing with the DKIM options found in `settings`
    ///
    /// Fails if signing is configured with a malformed key, or with headers
    /// that do not include `From`.
    pub fn from_settings<S: Settings + ?Sized>(
        client: C,
        settings: &S,
    ) -> Result<Self, dkim::Error> {
        Self::from_dkim_config(client, &config::resolve_dkim_config(settings))
    }

    /// The underlying SES client
    pub fn client(&self) -> &C {
        &self.client
    }

    fn prepare(&self, envelope: &Envelope, email: &[u8]) -> Result<RawEmail, Error> {
        let data = self.signer.sign(email).map_err(error::signing)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            destinations = envelope.to().len(),
            bytes = data.len(),
            signed = data.len() != email.len(),
            "handing raw email to ses client"
        );

        Ok(RawEmail {
            envelope: envelope.clone(),
            data,
        })
    }
}

impl<C: SesClient> Transport for SesTransport<C> {
    type Ok = C::Ok;
    type Error = Error;

    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        let raw = self.prepare(envelope, email)?;
        self.client.send_raw_email(&raw).map_err(error::client)
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl<C> AsyncTransport for SesTransport<C>
where
    C: AsyncSesClient + Send + Sync,
{
    type Ok = C::Ok;
    type Error = Error;

    async fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        let raw = self.prepare(envelope, email)?;
        self.client.send_raw_email(&raw).await.map_err(error::client)
    }
}
