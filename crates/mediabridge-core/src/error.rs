//! Error taxonomy and classifier.
//!
//! Every failure that leaves a service is an [`ApiError`]. Services build an
//! [`ErrorContext`] for each call and hand whatever went wrong to
//! [`classify`] exactly once.
//!
//! | Input | Result |
//! |-------|--------|
//! | schema violation | [`ApiError::Validation`] |
//! | transport error without response, or a known network code | [`ApiError::Network`] |
//! | HTTP 401 / 403 / 404 | `UNAUTHORIZED` / `FORBIDDEN` / `NOT_FOUND` |
//! | HTTP 5xx | `SERVER_ERROR` |
//! | any other HTTP status | `UNKNOWN` |
//! | already classified | unchanged |
//! | anything else | `UNKNOWN`, original error kept as source |

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::client::{HttpFailure, TransportError};
use crate::ProviderId;

/// Stable error code carried by every [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "SERVER_ERROR")]
    ServerError,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ServerError => "SERVER_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of schema mismatch found at one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    Required,
    InvalidEnumValue,
    InvalidInteger,
    InvalidTimestamp,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::Required => "required",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// One mismatched field.
///
/// `path` uses dotted keys with bracketed indexes (`Items[2].UserData`); the
/// payload root is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Upstream payload did not match the provider's declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
    provider: Option<ProviderId>,
    operation: Option<String>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues,
            provider: None,
            operation: None,
        }
    }

    pub(crate) fn with_context(mut self, context: &ErrorContext) -> Self {
        self.provider = Some(context.provider);
        self.operation = Some(context.operation.clone());
        self
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub const fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Issue messages grouped by field path.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &self.issues {
            grouped
                .entry(issue.path.clone())
                .or_default()
                .push(issue.message.clone());
        }
        grouped
    }

    pub fn message(&self) -> String {
        let prefix = match (&self.provider, &self.operation) {
            (Some(provider), Some(operation)) => format!("{provider}: {operation} response"),
            (Some(provider), None) => format!("{provider} response"),
            _ => String::from("response"),
        };
        let count = self.issues.len();
        let noun = if count == 1 { "issue" } else { "issues" };
        match self.issues.first() {
            Some(first) => format!("{prefix} failed validation ({count} {noun}; first {first})"),
            None => format!("{prefix} failed validation"),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl StdError for ValidationError {}

/// Transport-level failure code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkCode {
    ConnectionRefused,
    Timeout,
    DnsLookup,
    Aborted,
    /// Unrecognized code, kept verbatim.
    Other(String),
}

impl NetworkCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ECONNREFUSED" => Self::ConnectionRefused,
            "ETIMEDOUT" | "ECONNABORTED" => Self::Timeout,
            "ENOTFOUND" | "EAI_AGAIN" => Self::DnsLookup,
            "ERR_CANCELED" => Self::Aborted,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::Timeout => "ETIMEDOUT",
            Self::DnsLookup => "ENOTFOUND",
            Self::Aborted => "ERR_CANCELED",
            Self::Other(code) => code,
        }
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Display for NetworkCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request never completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    message: String,
    network_code: Option<NetworkCode>,
    provider: Option<ProviderId>,
}

impl NetworkError {
    pub fn new(message: impl Into<String>, network_code: Option<NetworkCode>) -> Self {
        Self {
            message: message.into(),
            network_code,
            provider: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn network_code(&self) -> Option<&NetworkCode> {
        self.network_code.as_ref()
    }

    pub const fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.network_code, Some(NetworkCode::Timeout))
    }

    pub fn is_connection_refused(&self) -> bool {
        matches!(self.network_code, Some(NetworkCode::ConnectionRefused))
    }

    pub fn is_dns_error(&self) -> bool {
        matches!(self.network_code, Some(NetworkCode::DnsLookup))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.network_code, Some(NetworkCode::Aborted))
    }
}

/// Classified service failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        http_status: Option<u16>,
        provider: Option<ProviderId>,
        #[source]
        source: Option<Arc<dyn StdError + Send + Sync>>,
    },
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            http_status: None,
            provider: None,
            source: None,
        }
    }

    /// Error returned when an operation runs against a provider with no settings.
    pub fn not_configured(provider: ProviderId, operation: &str) -> Self {
        Self::Api {
            code: ErrorCode::Unknown,
            message: format!("{provider} is not configured; cannot run {operation}"),
            http_status: None,
            provider: Some(provider),
            source: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::Network(_) => ErrorCode::Network,
            Self::Api { code, .. } => *code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(error) => error.message(),
            Self::Network(error) => error.message.clone(),
            Self::Api { message, .. } => message.clone(),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { http_status, .. } => *http_status,
            _ => None,
        }
    }

    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            Self::Validation(error) => error.provider,
            Self::Network(error) => error.provider,
            Self::Api { provider, .. } => *provider,
        }
    }

    pub fn is_retryable(&self) -> bool {
        is_retryable_error(self)
    }
}

/// Where a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub provider: ProviderId,
    pub operation: String,
    pub item_id: Option<String>,
}

impl ErrorContext {
    pub fn new(provider: ProviderId, operation: impl Into<String>) -> Self {
        Self {
            provider,
            operation: operation.into(),
            item_id: None,
        }
    }

    pub fn with_item(mut self, item_id: impl Display) -> Self {
        self.item_id = Some(item_id.to_string());
        self
    }
}

/// Anything a service step can fail with, before classification.
#[derive(Debug, Clone)]
pub enum Failure {
    Validation(ValidationError),
    Transport(TransportError),
    Classified(ApiError),
    Other(Arc<dyn StdError + Send + Sync>),
}

impl Failure {
    pub fn other<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Other(Arc::new(error))
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<TransportError> for Failure {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self::Classified(error)
    }
}

/// Turns any failure into an [`ApiError`]. Total and idempotent.
pub fn classify(failure: Failure, context: &ErrorContext) -> ApiError {
    match failure {
        Failure::Classified(error) => error,
        Failure::Validation(error) => {
            let error = error.with_context(context);
            tracing::warn!(
                provider = %context.provider,
                operation = %context.operation,
                item_id = context.item_id.as_deref(),
                issues = error.issues().len(),
                "upstream payload failed schema validation"
            );
            ApiError::Validation(error)
        }
        Failure::Transport(error) => classify_transport(error, context),
        Failure::Other(source) => ApiError::Api {
            code: ErrorCode::Unknown,
            message: source.to_string(),
            http_status: None,
            provider: Some(context.provider),
            source: Some(source),
        },
    }
}

/// True only for network failures and server errors.
pub fn is_retryable_error(error: &ApiError) -> bool {
    match error {
        ApiError::Validation(_) => false,
        ApiError::Network(_) => true,
        ApiError::Api { code, .. } => *code == ErrorCode::ServerError,
    }
}

fn classify_transport(error: TransportError, context: &ErrorContext) -> ApiError {
    let recognized = error
        .network_code()
        .is_some_and(NetworkCode::is_recognized);

    let response = match error.response() {
        Some(response) if !recognized => response.clone(),
        _ => {
            tracing::debug!(
                provider = %context.provider,
                operation = %context.operation,
                code = error.network_code().map(NetworkCode::as_str),
                "transport failure classified as network error"
            );
            return ApiError::Network(NetworkError {
                message: format!("{}: {}", context.provider, error.message()),
                network_code: error.network_code().cloned(),
                provider: Some(context.provider),
            });
        }
    };

    let (code, message) = classify_status(&response, &error, context);
    tracing::debug!(
        provider = %context.provider,
        operation = %context.operation,
        status = response.status,
        code = code.as_str(),
        "http failure classified"
    );

    ApiError::Api {
        code,
        message,
        http_status: Some(response.status),
        provider: Some(context.provider),
        source: Some(Arc::new(error)),
    }
}

fn classify_status(
    response: &HttpFailure,
    error: &TransportError,
    context: &ErrorContext,
) -> (ErrorCode, String) {
    let provider = context.provider;
    let operation = &context.operation;
    match response.status {
        401 => (
            ErrorCode::Unauthorized,
            format!("{provider}: unauthorized during {operation}"),
        ),
        403 => (
            ErrorCode::Forbidden,
            format!("{provider}: access forbidden during {operation}"),
        ),
        404 => {
            let target = context.item_id.as_deref().unwrap_or(operation);
            (ErrorCode::NotFound, format!("{provider}: {target} not found"))
        }
        status if status >= 500 => (
            ErrorCode::ServerError,
            format!("{provider}: server error {status} during {operation}"),
        ),
        _ => {
            let message = response
                .body
                .as_ref()
                .and_then(body_message)
                .unwrap_or_else(|| error.message().to_owned());
            (ErrorCode::Unknown, message)
        }
    }
}

fn body_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_owned());
    }
    match body.get("error") {
        Some(Value::String(message)) => return Some(message.clone()),
        Some(nested) => {
            if let Some(message) = nested.get("message").and_then(Value::as_str) {
                return Some(message.to_owned());
            }
        }
        None => {}
    }
    body.as_str()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}
