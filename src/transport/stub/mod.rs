//! The stub client records every raw email it is given and answers with a
//! fixed result. It can be useful for testing purposes.
//!
//! ```rust
//! use seacucumber::transport::{stub::StubClient, Envelope, SesTransport, Transport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = SesTransport::new(StubClient::new_error());
//!
//! let envelope = Envelope::new(None, vec!["b@example.com".to_owned()])?;
//! let err = transport.send_raw(&envelope, b"Subject: hi\r\n\r\n").unwrap_err();
//! assert!(err.is_client());
//!
//! // failed sends are recorded too
//! assert_eq!(transport.client().messages().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::{
    error::Error as StdError,
    fmt,
    sync::{Mutex, PoisonError},
};

#[cfg(feature = "async")]
use async_trait::async_trait;

#[cfg(feature = "async")]
use super::AsyncSesClient;
use super::{RawEmail, SesClient};

/// Error returned by a [`StubClient`] built with [`StubClient::new_error`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stub error")
    }
}

impl StdError for Error {}

/// Records raw emails and returns `stub-<n>` message ids, or always fails
#[derive(Debug)]
pub struct StubClient {
    fail: bool,
    messages: Mutex<Vec<RawEmail>>,
}

impl StubClient {
    /// Creates a client that always succeeds
    pub fn new_ok() -> StubClient {
        StubClient {
            fail: false,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client that always fails with [`Error`]
    pub fn new_error() -> StubClient {
        StubClient {
            fail: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Returns every raw email received so far, oldest first
    pub fn messages(&self) -> Vec<RawEmail> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, email: &RawEmail) -> Result<String, Error> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.push(email.clone());

        #[cfg(feature = "tracing")]
        tracing::debug!(count = messages.len(), "stub client received raw email");

        if self.fail {
            Err(Error)
        } else {
            Ok(format!("stub-{}", messages.len()))
        }
    }
}

impl SesClient for StubClient {
    type Ok = String;
    type Error = Error;

    fn send_raw_email(&self, email: &RawEmail) -> Result<Self::Ok, Self::Error> {
        self.record(email)
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl AsyncSesClient for StubClient {
    type Ok = String;
    type Error = Error;

    async fn send_raw_email(&self, email: &RawEmail) -> Result<Self::Ok, Self::Error> {
        self.record(email)
    }
}
