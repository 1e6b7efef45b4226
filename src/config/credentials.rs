use std::fmt;

use super::constants::{DEFAULT_REGION_ENDPOINT, DEFAULT_REGION_NAME};

/// A deployment of the SES API
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Region name, e.g. `eu-west-1`
    pub name: String,
    /// Host of the SES endpoint serving this region, e.g. `email.eu-west-1.amazonaws.com`
    pub endpoint: String,
}

impl Region {
    /// Creates a region from its name and endpoint host
    pub fn new<N: Into<String>, E: Into<String>>(name: N, endpoint: E) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_NAME, DEFAULT_REGION_ENDPOINT)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.endpoint)
    }
}

/// Everything needed to build an SES client
///
/// Nothing is validated here. A missing or wrong key is reported by the
/// client when it tries to send.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SesCredentials {
    /// AWS access key id
    pub access_key_id: Option<String>,
    /// AWS secret access key
    pub secret_access_key: Option<String>,
    /// Region to send through
    pub region: Region,
}

impl SesCredentials {
    /// Returns true if both halves of the key pair are present
    pub fn has_key_pair(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

// Keep the secret out of logs
impl fmt::Debug for SesCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SesCredentials")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_region() {
        let region = Region::default();
        assert_eq!(region.name, "us-east-1");
        assert_eq!(region.endpoint, "email.us-east-1.amazonaws.com");
        assert_eq!(
            region.to_string(),
            "us-east-1 (email.us-east-1.amazonaws.com)"
        );
    }

    #[test]
    fn debug_hides_secret() {
        let credentials = SesCredentials {
            access_key_id: Some("AKIDEXAMPLE".to_owned()),
            secret_access_key: Some("wJalrXUtnFEMI".to_owned()),
            region: Region::default(),
        };

        let debug = format!("{credentials:?}");
        assert!(debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(credentials.has_key_pair());
    }
}
