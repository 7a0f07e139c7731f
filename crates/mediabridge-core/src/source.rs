use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Canonical identifiers for the upstream providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Media server (browsing, playback state).
    Jellyfin,
    /// Request broker (discover, user requests).
    Jellyseerr,
    /// Movie acquisition manager.
    Radarr,
    /// Series acquisition manager.
    Sonarr,
}

impl ProviderId {
    pub const ALL: [Self; 4] = [Self::Jellyfin, Self::Jellyseerr, Self::Radarr, Self::Sonarr];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jellyfin => "jellyfin",
            Self::Jellyseerr => "jellyseerr",
            Self::Radarr => "radarr",
            Self::Sonarr => "sonarr",
        }
    }

    /// Prefix used for this provider's environment variables.
    pub const fn env_prefix(self) -> &'static str {
        match self {
            Self::Jellyfin => "MEDIABRIDGE_JELLYFIN",
            Self::Jellyseerr => "MEDIABRIDGE_JELLYSEERR",
            Self::Radarr => "MEDIABRIDGE_RADARR",
            Self::Sonarr => "MEDIABRIDGE_SONARR",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jellyfin" => Ok(Self::Jellyfin),
            "jellyseerr" => Ok(Self::Jellyseerr),
            "radarr" => Ok(Self::Radarr),
            "sonarr" => Ok(Self::Sonarr),
            other => Err(ConfigError::UnknownProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names_case_insensitively() {
        assert_eq!(" Radarr ".parse::<ProviderId>().expect("known"), ProviderId::Radarr);
        assert!(matches!(
            "plex".parse::<ProviderId>(),
            Err(ConfigError::UnknownProvider { .. })
        ));
    }
}
