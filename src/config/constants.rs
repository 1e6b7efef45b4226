//! Names of the configuration options read by the resolvers in [`crate::config`].
//!
//! Options prefixed with `CUCUMBER_SES_` are checked first, then their generic
//! AWS counterpart.

/// Access key id, library-specific
pub const CUCUMBER_SES_ACCESS_KEY_ID: &str = "CUCUMBER_SES_ACCESS_KEY_ID";
/// Secret access key, library-specific
pub const CUCUMBER_SES_SECRET_ACCESS_KEY: &str = "CUCUMBER_SES_SECRET_ACCESS_KEY";
/// Region name, library-specific
pub const CUCUMBER_SES_REGION_NAME: &str = "CUCUMBER_SES_REGION_NAME";
/// Region endpoint host, library-specific
pub const CUCUMBER_SES_REGION_ENDPOINT: &str = "CUCUMBER_SES_REGION_ENDPOINT";

/// Access key id, generic
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key, generic
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// SES region name, generic
pub const AWS_SES_REGION_NAME: &str = "AWS_SES_REGION_NAME";
/// SES region endpoint host, generic
pub const AWS_SES_REGION_ENDPOINT: &str = "AWS_SES_REGION_ENDPOINT";

/// Signing domain (`d=`); signing is disabled when empty
pub const DKIM_DOMAIN: &str = "DKIM_DOMAIN";
/// Signing key; signing is disabled when empty
pub const DKIM_PRIVATE_KEY: &str = "DKIM_PRIVATE_KEY";
/// Selector (`s=`)
pub const DKIM_SELECTOR: &str = "DKIM_SELECTOR";
/// Comma-separated list of headers to sign
pub const DKIM_HEADERS: &str = "DKIM_HEADERS";

/// Region used by the SES SDKs when none is configured
pub const DEFAULT_REGION_NAME: &str = "us-east-1";
/// Endpoint of [`DEFAULT_REGION_NAME`]
pub const DEFAULT_REGION_ENDPOINT: &str = "email.us-east-1.amazonaws.com";
/// Selector used when [`DKIM_SELECTOR`] is absent
pub const DEFAULT_DKIM_SELECTOR: &str = "ses";
/// Headers signed when [`DKIM_HEADERS`] is absent
pub const DEFAULT_DKIM_HEADERS: [&str; 4] = ["From", "To", "Cc", "Subject"];
