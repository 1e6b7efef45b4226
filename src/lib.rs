//! Seacucumber lets an application send email through the Amazon SES
//! "send raw email" API instead of SMTP.
//!
//! The crate does three small things and nothing else:
//!
//! * resolve credentials, region and DKIM settings from configuration ([`config`])
//! * optionally prepend a `DKIM-Signature` header to a raw message ([`signer`], [`dkim`])
//! * hand the message to an SES client you provide ([`transport`])
//!
//! HTTP request signing, the network round-trip and delivery retries belong to the
//! SES client. Any SDK can be plugged in by implementing [`SesClient`].
//!
//! ## Features
//!
//! | feature   | description                                                     | default |
//! |-----------|-----------------------------------------------------------------|---------|
//! | `dkim`    | DKIM signing (`rsa-sha256` and `ed25519-sha256`)                | ✅      |
//! | `serde`   | `Serialize`/`Deserialize` for config types                      | ❌      |
//! | `tracing` | debug events through `tracing`                                  | ❌      |
//! | `async`   | [`AsyncSesClient`] and [`AsyncTransport`] built on `async-trait` | ❌      |
//!
//! Without the `dkim` feature messages are always sent unsigned.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use seacucumber::{
//!     config,
//!     transport::{stub::StubClient, Envelope, SesTransport, Transport},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings: HashMap<String, String> = HashMap::new();
//!
//! let credentials = config::resolve_credentials(&settings);
//! assert_eq!(credentials.region.name, "us-east-1");
//!
//! // A real application builds its SDK client from `credentials` here.
//! let client = StubClient::new_ok();
//! let transport = SesTransport::from_settings(client, &settings)?;
//!
//! let envelope = Envelope::new(
//!     Some("a@example.com".to_owned()),
//!     vec!["b@example.com".to_owned()],
//! )?;
//! transport.send_raw(
//!     &envelope,
//!     b"From: a@example.com\r\nTo: b@example.com\r\nSubject: hi\r\n\r\nbody",
//! )?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/seacucumber/0.4.0")]
#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod dkim;
pub mod signer;
pub mod transport;

#[cfg(feature = "async")]
pub use crate::transport::{AsyncSesClient, AsyncTransport};
pub use crate::{
    config::{EnvSettings, Region, SesCredentials, Settings},
    dkim::DkimConfig,
    signer::{MessageSigner, DKIM_AVAILABLE},
    transport::{Envelope, RawEmail, SesClient, SesTransport, Transport},
};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
