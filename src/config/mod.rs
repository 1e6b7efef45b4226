//! Resolves SES credentials, region and DKIM settings from named options
//!
//! Options are looked up through the [`Settings`] trait, so the same resolvers
//! work on the process environment ([`EnvSettings`]), on a `HashMap` loaded from
//! a config file, or on anything else an application keeps its settings in.
//!
//! Each value follows a precedence chain: the library-specific option, then the
//! generic AWS option, then a default. An option that is present wins even when
//! it is empty.
//!
//! | value             | option                           | fallback                  | default                         |
//! |-------------------|----------------------------------|---------------------------|---------------------------------|
//! | access key id     | `CUCUMBER_SES_ACCESS_KEY_ID`     | `AWS_ACCESS_KEY_ID`       | `None`                          |
//! | secret access key | `CUCUMBER_SES_SECRET_ACCESS_KEY` | `AWS_SECRET_ACCESS_KEY`   | `None`                          |
//! | region name       | `CUCUMBER_SES_REGION_NAME`       | `AWS_SES_REGION_NAME`     | `us-east-1`                     |
//! | region endpoint   | `CUCUMBER_SES_REGION_ENDPOINT`   | `AWS_SES_REGION_ENDPOINT` | `email.us-east-1.amazonaws.com` |
//! | DKIM domain       | `DKIM_DOMAIN`                    |                           | empty, signing disabled         |
//! | DKIM private key  | `DKIM_PRIVATE_KEY`               |                           | empty, signing disabled         |
//! | DKIM selector     | `DKIM_SELECTOR`                  |                           | `ses`                           |
//! | DKIM headers      | `DKIM_HEADERS`                   |                           | `From, To, Cc, Subject`         |
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use seacucumber::config::{self, constants::AWS_ACCESS_KEY_ID};
//!
//! let mut settings = HashMap::new();
//! settings.insert(AWS_ACCESS_KEY_ID.to_owned(), "AKIDEXAMPLE".to_owned());
//!
//! let credentials = config::resolve_credentials(&settings);
//! assert_eq!(credentials.access_key_id.as_deref(), Some("AKIDEXAMPLE"));
//! assert_eq!(credentials.secret_access_key, None);
//! ```

use std::{collections::HashMap, env, hash::BuildHasher};

pub use self::credentials::{Region, SesCredentials};
use self::constants::*;
use crate::dkim::DkimConfig;

pub mod constants;
mod credentials;

/// A source of named configuration options
pub trait Settings {
    /// Returns the value of the option `name`, or `None` if it is not set
    fn get(&self, name: &str) -> Option<String>;

    /// Returns the value of the first option in `names` that is set
    fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.get(name))
    }
}

impl<T: Settings + ?Sized> Settings for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

impl<S: BuildHasher> Settings for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Reads options from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl Settings for EnvSettings {
    fn get(&self, name: &str) -> Option<String> {
        // non unicode values are treated as unset
        env::var(name).ok()
    }
}

/// Resolves the access key pair and the region
pub fn resolve_credentials<S: Settings + ?Sized>(settings: &S) -> SesCredentials {
    SesCredentials {
        access_key_id: settings.first_of(&[CUCUMBER_SES_ACCESS_KEY_ID, AWS_ACCESS_KEY_ID]),
        secret_access_key: settings
            .first_of(&[CUCUMBER_SES_SECRET_ACCESS_KEY, AWS_SECRET_ACCESS_KEY]),
        region: resolve_region(settings),
    }
}

/// Resolves the SES region, falling back to the SDK default region
///
/// Name and endpoint are resolved independently: setting only a region name
/// keeps the default endpoint.
pub fn resolve_region<S: Settings + ?Sized>(settings: &S) -> Region {
    let name = settings
        .first_of(&[CUCUMBER_SES_REGION_NAME, AWS_SES_REGION_NAME])
        .unwrap_or_else(|| DEFAULT_REGION_NAME.to_owned());
    let endpoint = settings
        .first_of(&[CUCUMBER_SES_REGION_ENDPOINT, AWS_SES_REGION_ENDPOINT])
        .unwrap_or_else(|| DEFAULT_REGION_ENDPOINT.to_owned());

    Region { name, endpoint }
}

/// Resolves the DKIM signing configuration
///
/// The result is always returned; check [`DkimConfig::is_enabled`] to know
/// whether it will actually sign anything.
pub fn resolve_dkim_config<S: Settings + ?Sized>(settings: &S) -> DkimConfig {
    let headers = match settings.get(DKIM_HEADERS) {
        Some(list) => parse_header_list(&list),
        None => DEFAULT_DKIM_HEADERS.iter().map(|h| (*h).to_owned()).collect(),
    };

    DkimConfig::new(
        settings
            .get(DKIM_SELECTOR)
            .unwrap_or_else(|| DEFAULT_DKIM_SELECTOR.to_owned()),
        settings.get(DKIM_DOMAIN).unwrap_or_default(),
        settings.get(DKIM_PRIVATE_KEY).unwrap_or_default(),
        headers,
    )
}

fn parse_header_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
        .collect()
}
