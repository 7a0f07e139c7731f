use mediabridge_core::{classify, ErrorContext, TransportError};

use super::normalize::read_json;
use crate::cli::ClassifyArgs;
use crate::error::CliError;
use crate::output::Report;

pub fn run(args: &ClassifyArgs) -> Result<Report, CliError> {
    let failure = transport_error(args)?;
    let mut context = ErrorContext::new(args.provider, args.operation.as_str());
    if let Some(item_id) = &args.item_id {
        context = context.with_item(item_id);
    }

    let error = classify(failure.into(), &context);
    Ok(Report::failure(args.provider, &args.operation, &error))
}

fn transport_error(args: &ClassifyArgs) -> Result<TransportError, CliError> {
    if let Some(code) = &args.network_code {
        return Ok(TransportError::network(code, args.message.as_str()));
    }
    match args.status {
        Some(status) => {
            let body = args.body.as_deref().map(read_json).transpose()?;
            Ok(TransportError::http(status, body).with_message(args.message.as_str()))
        }
        None => Ok(TransportError::no_response(args.message.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediabridge_core::{ErrorCode, ProviderId};

    fn args(status: Option<u16>, network_code: Option<&str>) -> ClassifyArgs {
        ClassifyArgs {
            provider: ProviderId::Jellyfin,
            operation: "get_item".to_owned(),
            status,
            body: None,
            network_code: network_code.map(str::to_owned),
            message: "request failed".to_owned(),
            item_id: Some("abc".to_owned()),
        }
    }

    #[test]
    fn not_found_names_item() {
        let report = run(&args(Some(404), None)).expect("report");
        let error = report.error.expect("classified");

        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.message, "jellyfin: abc not found");
        assert!(!error.retryable);
    }

    #[test]
    fn timeout_is_retryable_network_error() {
        let report = run(&args(None, Some("ETIMEDOUT"))).expect("report");
        let error = report.error.expect("classified");

        assert_eq!(error.code, ErrorCode::Network);
        assert!(error.retryable);
    }

    #[test]
    fn missing_response_is_network_error() {
        let report = run(&args(None, None)).expect("report");
        assert_eq!(report.error.expect("classified").code, ErrorCode::Network);
    }
}
