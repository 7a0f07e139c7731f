use std::collections::BTreeMap;

use mediabridge_core::{ApiError, ErrorCode, ProviderId};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

/// Classified error as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,
    pub retryable: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl From<&ApiError> for ErrorReport {
    fn from(error: &ApiError) -> Self {
        let field_errors = match error {
            ApiError::Validation(validation) => validation.field_errors(),
            _ => BTreeMap::new(),
        };
        Self {
            code: error.code(),
            message: error.message(),
            http_status: error.http_status(),
            provider: error.provider(),
            retryable: error.is_retryable(),
            field_errors,
        }
    }
}

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub provider: Option<ProviderId>,
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl Report {
    pub fn data(provider: Option<ProviderId>, operation: Option<&str>, data: Value) -> Self {
        Self {
            provider,
            operation: operation.map(str::to_owned),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(provider: ProviderId, operation: &str, error: &ApiError) -> Self {
        Self {
            provider: Some(provider),
            operation: Some(operation.to_owned()),
            data: None,
            error: Some(ErrorReport::from(error)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

pub fn render(report: &Report, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediabridge_core::ErrorContext;

    #[test]
    fn failure_report_serializes_stable_code() {
        let error = ApiError::not_configured(ProviderId::Radarr, "get_queue");
        let report = Report::failure(ProviderId::Radarr, "get_queue", &error);
        let value = serde_json::to_value(&report).expect("serializes");

        assert_eq!(value["error"]["code"], "UNKNOWN");
        assert_eq!(value["error"]["retryable"], false);
        assert_eq!(value["provider"], "radarr");
        assert!(value.get("data").is_none());
        assert!(value["error"].get("field_errors").is_none());
    }

    #[test]
    fn report_carries_http_status() {
        let context = ErrorContext::new(ProviderId::Sonarr, "get_series");
        let error = mediabridge_core::classify(
            mediabridge_core::TransportError::http(503, None).into(),
            &context,
        );
        let report = ErrorReport::from(&error);

        assert_eq!(report.code, ErrorCode::ServerError);
        assert_eq!(report.http_status, Some(503));
        assert!(report.retryable);
    }
}
