use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BACKEND_PORT: u16 = 3669;
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

pub const ENV_SERVER_URL: &str = "SUMMARIZE_SERVER_URL";
pub const ENV_HOST: &str = "SUMMARIZE_HOST";
pub const ENV_BACKEND_PORT: &str = "SUMMARIZE_BACKEND_PORT";
pub const ENV_POLL_INTERVAL_MS: &str = "SUMMARIZE_POLL_INTERVAL_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid server url {value:?}: {reason}")]
    InvalidServerUrl { value: String, reason: String },
    #[error("server url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: String, value: String },
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Raw configuration inputs, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub server_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub poll_interval_ms: Option<u64>,
}

impl SettingsOverrides {
    /// Read the `SUMMARIZE_*` environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SettingsOverrides::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Ok(Self {
            server_url: non_empty(ENV_SERVER_URL),
            host: non_empty(ENV_HOST),
            port: non_empty(ENV_BACKEND_PORT)
                .map(|value| parse_number(ENV_BACKEND_PORT, &value))
                .transpose()?,
            poll_interval_ms: non_empty(ENV_POLL_INTERVAL_MS)
                .map(|value| parse_number(ENV_POLL_INTERVAL_MS, &value))
                .transpose()?,
        })
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: SettingsOverrides) -> Self {
        Self {
            server_url: self.server_url.or(fallback.server_url),
            host: self.host.or(fallback.host),
            port: self.port.or(fallback.port),
            poll_interval_ms: self.poll_interval_ms.or(fallback.poll_interval_ms),
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidNumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server_url: Url,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    entries_url: Url,
}

impl ClientSettings {
    /// Apply defaults: an explicit server url wins, otherwise `http://<host>:<port>`.
    pub fn resolve(overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        let raw = match &overrides.server_url {
            Some(url) => url.trim().to_string(),
            None => format!(
                "http://{}:{}",
                overrides.host.as_deref().unwrap_or(DEFAULT_HOST),
                overrides.port.unwrap_or(DEFAULT_BACKEND_PORT)
            ),
        };
        let server_url = Url::parse(&raw).map_err(|err| SettingsError::InvalidServerUrl {
            value: raw.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(server_url.scheme().to_string()));
        }
        let entries_url = join_entries(&server_url).ok_or_else(|| {
            SettingsError::InvalidServerUrl {
                value: raw.clone(),
                reason: "cannot be used as a base url".to_string(),
            }
        })?;

        let poll_interval = match overrides.poll_interval_ms {
            Some(0) => return Err(SettingsError::ZeroPollInterval),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            server_url,
            poll_interval,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_bytes: 32 * 1024 * 1024,
            entries_url,
        })
    }

    /// `<server>/entries`, keeping any path prefix of the server url.
    pub fn entries_url(&self) -> &Url {
        &self.entries_url
    }
}

fn join_entries(base: &Url) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().push("entries");
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}
