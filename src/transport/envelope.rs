//! Sender and recipients of a raw send

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

use email_address::EmailAddress;

/// Sender and recipients of a raw send, independent of the message headers
///
/// Maps to the `Source` and `Destinations` of an SES raw send.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// The envelope recipients' addresses
    ///
    /// This can not be empty.
    forward_path: Vec<String>,
    /// The envelope sender address
    reverse_path: Option<String>,
}

impl Envelope {
    /// Creates a new envelope, which may fail if `to` is empty or an address
    /// is not valid
    ///
    /// Without a sender SES takes it from the `From` header of the message.
    pub fn new(from: Option<String>, to: Vec<String>) -> Result<Envelope, Error> {
        if to.is_empty() {
            return Err(Error::MissingTo);
        }
        if let Some(invalid) = from
            .iter()
            .chain(to.iter())
            .find(|address| !EmailAddress::is_valid(address))
        {
            return Err(Error::InvalidAddress(invalid.clone()));
        }

        Ok(Envelope {
            forward_path: to,
            reverse_path: from,
        })
    }

    /// Destination addresses of the envelope
    pub fn to(&self) -> &[String] {
        self.forward_path.as_slice()
    }

    /// Source address of the envelope
    pub fn from(&self) -> Option<&str> {
        self.reverse_path.as_deref()
    }
}

/// Error type for envelopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing destination address
    MissingTo,
    /// Address that does not parse as an email address
    InvalidAddress(String),
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::MissingTo => fmt.write_str("missing destination address, invalid envelope"),
            Error::InvalidAddress(address) => write!(fmt, "invalid email address: {address}"),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_envelope() {
        let envelope = Envelope::new(
            Some("from@example.com".to_owned()),
            vec!["to@example.com".to_owned(), "cc@example.org".to_owned()],
        )
        .unwrap();

        assert_eq!(envelope.from(), Some("from@example.com"));
        assert_eq!(envelope.to(), ["to@example.com", "cc@example.org"]);
    }

    #[test]
    fn sender_is_optional() {
        let envelope = Envelope::new(None, vec!["to@example.com".to_owned()]).unwrap();
        assert_eq!(envelope.from(), None);
    }

    #[test]
    fn missing_to() {
        assert_eq!(
            Envelope::new(Some("from@example.com".to_owned()), vec![]),
            Err(Error::MissingTo)
        );
    }

    #[test]
    fn invalid_address() {
        assert_eq!(
            Envelope::new(None, vec!["to@example.com".to_owned(), "nope".to_owned()]),
            Err(Error::InvalidAddress("nope".to_owned()))
        );
        assert_eq!(
            Error::InvalidAddress("nope".to_owned()).to_string(),
            "invalid email address: nope"
        );
    }
}
