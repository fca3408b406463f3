//! Settings resolution.
//!
//! The gateway URL comes from the first of: the `--gateway` flag, the
//! `MARQUEE_GATEWAY` environment variable, the config file, the built-in
//! default. The page size only comes from the config file.

pub mod storage;

use std::fmt;

use anyhow::{Context, Result};

use marquee_core::GatewayUrl;
use marquee_http::HttpGateway;

use storage::StoredConfig;

/// Overrides the stored gateway URL.
pub const GATEWAY_ENV: &str = "MARQUEE_GATEWAY";

/// Where the effective gateway URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewaySource {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for GatewaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewaySource::Flag => f.write_str("--gateway"),
            GatewaySource::Env => f.write_str(GATEWAY_ENV),
            GatewaySource::File => f.write_str("config file"),
            GatewaySource::Default => f.write_str("default"),
        }
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gateway: GatewayUrl,
    pub source: GatewaySource,
    pub page_size: u32,
}

impl Settings {
    /// Resolve settings from the flag, the environment and the config file.
    pub fn resolve(flag: Option<&str>) -> Result<Self> {
        let stored = storage::load()?;
        let env = std::env::var(GATEWAY_ENV).ok();
        Self::from_sources(flag, env.as_deref(), stored)
    }

    fn from_sources(flag: Option<&str>, env: Option<&str>, stored: StoredConfig) -> Result<Self> {
        let non_blank = |v: &&str| !v.trim().is_empty();

        let candidate = flag
            .filter(non_blank)
            .map(|v| (v, GatewaySource::Flag))
            .or_else(|| env.filter(non_blank).map(|v| (v, GatewaySource::Env)))
            .or_else(|| {
                stored
                    .gateway
                    .as_deref()
                    .filter(non_blank)
                    .map(|v| (v, GatewaySource::File))
            });

        let (gateway, source) = match candidate {
            Some((raw, source)) => (
                GatewayUrl::new(raw)
                    .with_context(|| format!("Invalid gateway URL from {}", source))?,
                source,
            ),
            None => (GatewayUrl::default(), GatewaySource::Default),
        };

        Ok(Self {
            gateway,
            source,
            page_size: stored.page_size.max(1),
        })
    }

    /// Build an HTTP gateway for the resolved URL.
    pub fn connect(&self) -> Result<HttpGateway> {
        HttpGateway::new(self.gateway.clone()).context("Failed to create HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(gateway: Option<&str>) -> StoredConfig {
        StoredConfig {
            gateway: gateway.map(str::to_string),
            page_size: 25,
        }
    }

    #[test]
    fn flag_wins_over_everything() {
        let settings = Settings::from_sources(
            Some("http://flag.test/api"),
            Some("http://env.test/api"),
            stored(Some("http://file.test/api")),
        )
        .unwrap();
        assert_eq!(settings.gateway.host(), Some("flag.test"));
        assert_eq!(settings.source, GatewaySource::Flag);
        assert_eq!(settings.page_size, 25);
    }

    #[test]
    fn env_wins_over_file() {
        let settings = Settings::from_sources(
            None,
            Some("http://env.test/api"),
            stored(Some("http://file.test/api")),
        )
        .unwrap();
        assert_eq!(settings.source, GatewaySource::Env);
    }

    #[test]
    fn blank_values_fall_through() {
        let settings =
            Settings::from_sources(Some(""), Some("  "), stored(Some("http://file.test/api")))
                .unwrap();
        assert_eq!(settings.source, GatewaySource::File);
        assert_eq!(settings.gateway.host(), Some("file.test"));
    }

    #[test]
    fn default_when_nothing_is_set() {
        let settings = Settings::from_sources(None, None, StoredConfig::default()).unwrap();
        assert_eq!(settings.source, GatewaySource::Default);
        assert_eq!(settings.gateway, GatewayUrl::default());
        assert_eq!(settings.page_size, 10);
    }

    #[test]
    fn invalid_url_names_its_source() {
        let err = Settings::from_sources(None, Some("ftp://nope"), StoredConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains(GATEWAY_ENV));
    }
}
