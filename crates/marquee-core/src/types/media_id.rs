//! Media record identifier.

use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque media record identifier assigned by the gateway.
///
/// Gateways may send ids as JSON numbers or strings; both deserialize to the
/// same textual form. Ids are used as URL path segments, so they must be
/// non-empty and free of `/`, `?`, `#` and whitespace.
///
/// # Example
///
/// ```
/// use marquee_core::MediaId;
///
/// let id: MediaId = serde_json::from_str("42").unwrap();
/// assert_eq!(id, MediaId::new("42").unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    /// Create a media id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or not path-safe.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::MediaId {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(InvalidInputError::MediaId {
                value: s.to_string(),
                reason: format!("contains invalid character {:?}", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MediaId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u64> for MediaId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for MediaId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

struct MediaIdVisitor;

impl Visitor<'_> for MediaIdVisitor {
    type Value = MediaId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a media id as a string or non-negative integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MediaId, E> {
        Ok(MediaId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MediaId, E> {
        u64::try_from(v)
            .map(MediaId::from)
            .map_err(|_| E::custom(format!("negative media id {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MediaId, E> {
        MediaId::new(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MediaId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(MediaIdVisitor)
    }
}
