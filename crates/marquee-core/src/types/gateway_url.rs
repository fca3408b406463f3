//! Gateway URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The gateway base URL used when nothing else is configured.
pub const DEFAULT_GATEWAY: &str = "http://localhost:5000/api";

/// A validated media gateway base URL.
///
/// The base URL points at the API root (e.g. `http://localhost:5000/api`).
/// Endpoints are built below it, while poster paths are resolved against the
/// bare origin, since the gateway serves uploads outside the API prefix.
///
/// # Example
///
/// ```
/// use marquee_core::GatewayUrl;
///
/// let gateway = GatewayUrl::new("http://localhost:5000/api").unwrap();
/// assert_eq!(gateway.endpoint("media/7"), "http://localhost:5000/api/media/7");
/// assert_eq!(
///     gateway.resolve_asset("/uploads/poster.jpg"),
///     "http://localhost:5000/uploads/poster.jpg"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GatewayUrl(Url);

impl GatewayUrl {
    /// Create a new gateway URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not HTTP(S), or has no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::GatewayUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the URL of an endpoint below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns `scheme://host[:port]` without any path.
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }

    /// Resolve a poster reference to a fetchable URL.
    ///
    /// Absolute `http(s)` URLs are returned unchanged; anything else is
    /// treated as a server-relative path below the gateway origin.
    pub fn resolve_asset(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }
        if reference.starts_with('/') {
            format!("{}{}", self.origin(), reference)
        } else {
            format!("{}/{}", self.origin(), reference)
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::GatewayUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvalidInputError::GatewayUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::GatewayUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::GatewayUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for GatewayUrl {
    fn default() -> Self {
        // The constant is a known-good URL.
        Self(Url::parse(DEFAULT_GATEWAY).expect("default gateway URL is valid"))
    }
}

impl fmt::Display for GatewayUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GatewayUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for GatewayUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for GatewayUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GatewayUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for GatewayUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
