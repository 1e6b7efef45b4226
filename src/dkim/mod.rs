//! DKIM signing of raw messages ([RFC 6376](https://tools.ietf.org/html/rfc6376))
//!
//! [`DkimConfig`] describes what to sign and with which key. It is always
//! available so configuration can be resolved even when the crate is built
//! without the `dkim` feature; the signing machinery ([`DkimSigner`],
//! [`DkimSigningKey`]) only exists with it.
//!
//! The signer works on the raw bytes of a message. It never modifies them: the
//! `DKIM-Signature` header is computed over the configured headers and the body,
//! then prepended.
//!
//! ```rust
//! # #[cfg(feature = "dkim")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use seacucumber::dkim::{DkimConfig, DkimSigner};
//!
//! # let private_key = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/rsa-2048.pem"))?;
//! let config = DkimConfig::default_config(
//!     "ses".to_owned(),
//!     "example.com".to_owned(),
//!     private_key,
//! );
//! let signer = DkimSigner::new(config)?;
//!
//! let message = b"From: a@example.com\r\nTo: b@example.com\r\nSubject: hi\r\n\r\nbody";
//! let signed = signer.sign_at(message, 1_700_000_000)?;
//!
//! assert!(signed.starts_with(b"DKIM-Signature: v=1; a=rsa-sha256; d=example.com; s=ses; "));
//! assert!(signed.ends_with(message));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "dkim"))]
//! # fn main() {}
//! ```

use std::fmt::{self, Display};

pub use self::error::Error;
#[cfg(feature = "dkim")]
pub use self::{key::DkimSigningKey, signature::DkimSigner};
use crate::config::constants::{DEFAULT_DKIM_HEADERS, DEFAULT_DKIM_SELECTOR};

#[cfg(feature = "dkim")]
mod canonicalize;
mod error;
#[cfg(feature = "dkim")]
mod key;
#[cfg(feature = "dkim")]
mod message;
#[cfg(feature = "dkim")]
mod signature;

/// Canonicalization applied to either the headers or the body
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DkimCanonicalizationType {
    /// Bytes are signed as they are
    Simple,
    /// Whitespace and header name case are normalized before signing
    Relaxed,
}

impl Display for DkimCanonicalizationType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            DkimCanonicalizationType::Simple => "simple",
            DkimCanonicalizationType::Relaxed => "relaxed",
        })
    }
}

/// Canonicalization of headers and body, shown as `c=header/body`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DkimCanonicalization {
    /// Applied to signed headers
    pub header: DkimCanonicalizationType,
    /// Applied to the body
    pub body: DkimCanonicalizationType,
}

/// `relaxed/simple`
impl Default for DkimCanonicalization {
    fn default() -> Self {
        Self {
            header: DkimCanonicalizationType::Relaxed,
            body: DkimCanonicalizationType::Simple,
        }
    }
}

impl Display for DkimCanonicalization {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}/{}", self.header, self.body)
    }
}

/// Signing algorithm, shown as `a=`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DkimSigningAlgorithm {
    /// `rsa-sha256`, key in PKCS#1 or PKCS#8 PEM
    #[default]
    Rsa,
    /// `ed25519-sha256` ([RFC 8463](https://tools.ietf.org/html/rfc8463)), key as the base64 encoded 32 byte seed
    Ed25519,
}

impl Display for DkimSigningAlgorithm {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            DkimSigningAlgorithm::Rsa => "rsa-sha256",
            DkimSigningAlgorithm::Ed25519 => "ed25519-sha256",
        })
    }
}

/// What to sign and how
///
/// * `selector`: the name of the key published in DNS
/// * `domain`: the domain for which the message is signed
/// * `private_key`: key material, see [`DkimSigningAlgorithm`] for the accepted formats
/// * `headers`: names of the headers to sign, in order. A name listed twice
///   signs two instances of that header
///
/// Signing is enabled only when both `domain` and `private_key` are non-empty.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DkimConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_selector"))]
    selector: String,
    #[cfg_attr(feature = "serde", serde(default))]
    domain: String,
    #[cfg_attr(feature = "serde", serde(default))]
    private_key: String,
    #[cfg_attr(feature = "serde", serde(default = "default_headers"))]
    headers: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    canonicalization: DkimCanonicalization,
    #[cfg_attr(feature = "serde", serde(default))]
    algorithm: DkimSigningAlgorithm,
}

fn default_selector() -> String {
    DEFAULT_DKIM_SELECTOR.to_owned()
}

fn default_headers() -> Vec<String> {
    DEFAULT_DKIM_HEADERS.iter().map(|h| (*h).to_owned()).collect()
}

impl DkimConfig {
    /// Creates a configuration signing `From`, `To`, `Cc` and `Subject` with
    /// `rsa-sha256` and `relaxed/simple` canonicalization
    pub fn default_config(selector: String, domain: String, private_key: String) -> DkimConfig {
        Self::new(selector, domain, private_key, default_headers())
    }

    /// Creates a configuration signing the given headers with `rsa-sha256`
    /// and `relaxed/simple` canonicalization
    pub fn new(
        selector: String,
        domain: String,
        private_key: String,
        headers: Vec<String>,
    ) -> DkimConfig {
        DkimConfig {
            selector,
            domain,
            private_key,
            headers,
            canonicalization: DkimCanonicalization::default(),
            algorithm: DkimSigningAlgorithm::default(),
        }
    }

    /// A configuration that never signs
    pub fn disabled() -> DkimConfig {
        Self::default_config(default_selector(), String::new(), String::new())
    }

    /// Sets the canonicalization
    pub fn with_canonicalization(mut self, canonicalization: DkimCanonicalization) -> Self {
        self.canonicalization = canonicalization;
        self
    }

    /// Sets the signing algorithm, which decides how `private_key` is read
    pub fn with_algorithm(mut self, algorithm: DkimSigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Returns true if both a domain and a private key are set
    pub fn is_enabled(&self) -> bool {
        !self.domain.is_empty() && !self.private_key.is_empty()
    }

    /// Selector (`s=`)
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Signing domain (`d=`)
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Private key material
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Names of the headers to sign
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Canonicalization (`c=`)
    pub fn canonicalization(&self) -> DkimCanonicalization {
        self.canonicalization
    }

    /// Signing algorithm (`a=`)
    pub fn algorithm(&self) -> DkimSigningAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for DkimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DkimConfig")
            .field("selector", &self.selector)
            .field("domain", &self.domain)
            .field(
                "private_key",
                &if self.private_key.is_empty() { "" } else { "***" },
            )
            .field("headers", &self.headers)
            .field("canonicalization", &self.canonicalization)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
