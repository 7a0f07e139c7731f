use mediabridge_core::{BridgeConfig, ProviderId};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Report;

#[derive(Debug, Serialize)]
struct ProviderStatus {
    id: ProviderId,
    configured: bool,
    env_prefix: &'static str,
}

pub fn run() -> Result<Report, CliError> {
    let config = BridgeConfig::from_env()?;
    report(&config)
}

fn report(config: &BridgeConfig) -> Result<Report, CliError> {
    let providers = ProviderId::ALL
        .into_iter()
        .map(|id| ProviderStatus {
            id,
            configured: config.is_configured(id),
            env_prefix: id.env_prefix(),
        })
        .collect::<Vec<_>>();

    let data = serde_json::to_value(providers)?;
    Ok(Report::data(None, None, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_provider() {
        let config = BridgeConfig::from_lookup(|key| {
            (key == "MEDIABRIDGE_RADARR_URL").then(|| "http://radarr:7878".to_owned())
        })
        .expect("config");

        let data = report(&config).expect("report").data.expect("data");
        let entries = data.as_array().expect("array");

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2]["id"], "radarr");
        assert_eq!(entries[2]["configured"], true);
        assert_eq!(entries[0]["configured"], false);
    }
}
