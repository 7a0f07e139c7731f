//! Provider connection settings.
//!
//! Settings are read from `MEDIABRIDGE_*` environment variables. A provider
//! section exists only when its URL variable is set; services built from a
//! missing section report themselves unconfigured.

use thiserror::Error;

use crate::ProviderId;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown provider '{value}', expected one of jellyfin, jellyseerr, radarr, sonarr")]
    UnknownProvider { value: String },

    #[error("{provider} is configured but '{variable}' is not set")]
    MissingField {
        provider: ProviderId,
        variable: String,
    },
}

/// Base URL and API key for a REST provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Media-server connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaServerSettings {
    pub base_url: String,
    pub server_id: String,
    pub user_id: Option<String>,
}

/// Connection settings for every provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    pub media_server: Option<MediaServerSettings>,
    pub request_broker: Option<ProviderEndpoint>,
    pub movie_manager: Option<ProviderEndpoint>,
    pub series_manager: Option<ProviderEndpoint>,
}

impl BridgeConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |provider: ProviderId, suffix: &str| {
            lookup(&format!("{}_{suffix}", provider.env_prefix()))
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let endpoint = |provider: ProviderId| {
            read(provider, "URL").map(|url| ProviderEndpoint {
                base_url: url.trim_end_matches('/').to_owned(),
                api_key: read(provider, "API_KEY"),
            })
        };

        let media_server = match read(ProviderId::Jellyfin, "URL") {
            Some(url) => {
                let server_id = read(ProviderId::Jellyfin, "SERVER_ID").ok_or_else(|| {
                    ConfigError::MissingField {
                        provider: ProviderId::Jellyfin,
                        variable: format!("{}_SERVER_ID", ProviderId::Jellyfin.env_prefix()),
                    }
                })?;
                Some(MediaServerSettings {
                    base_url: url.trim_end_matches('/').to_owned(),
                    server_id,
                    user_id: read(ProviderId::Jellyfin, "USER_ID"),
                })
            }
            None => None,
        };

        Ok(Self {
            media_server,
            request_broker: endpoint(ProviderId::Jellyseerr),
            movie_manager: endpoint(ProviderId::Radarr),
            series_manager: endpoint(ProviderId::Sonarr),
        })
    }

    pub fn is_configured(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::Jellyfin => self.media_server.is_some(),
            ProviderId::Jellyseerr => self.request_broker.is_some(),
            ProviderId::Radarr => self.movie_manager.is_some(),
            ProviderId::Sonarr => self.series_manager.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_sections_and_trims_trailing_slash() {
        let config = BridgeConfig::from_lookup(lookup(&[
            ("MEDIABRIDGE_RADARR_URL", "http://radarr:7878/"),
            ("MEDIABRIDGE_RADARR_API_KEY", "abc"),
            ("MEDIABRIDGE_JELLYFIN_URL", "http://jf:8096"),
            ("MEDIABRIDGE_JELLYFIN_SERVER_ID", "srv-1"),
        ]))
        .expect("config should load");

        let radarr = config.movie_manager.as_ref().expect("radarr section");
        assert_eq!(radarr.base_url, "http://radarr:7878");
        assert_eq!(radarr.api_key.as_deref(), Some("abc"));
        assert!(config.is_configured(ProviderId::Jellyfin));
        assert!(!config.is_configured(ProviderId::Sonarr));
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = BridgeConfig::from_lookup(lookup(&[("MEDIABRIDGE_SONARR_URL", "   ")]))
            .expect("config should load");
        assert!(config.series_manager.is_none());
    }

    #[test]
    fn media_server_requires_server_id() {
        let error = BridgeConfig::from_lookup(lookup(&[("MEDIABRIDGE_JELLYFIN_URL", "http://jf")]))
            .expect_err("server id is required");
        assert!(matches!(
            error,
            ConfigError::MissingField {
                provider: ProviderId::Jellyfin,
                ..
            }
        ));
    }
}
