//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use markswap::error::Hint;
use markswap::{Error, ErrorCode, Result};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
                retryable: err.retryable,
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_payload(&mut handle, &payload)
}

/// A closed reader (`| head`) ends output quietly; any other write failure
/// is reported.
fn write_payload<W: Write>(out: &mut W, payload: &str) -> Result<()> {
    match writeln!(out, "{}", payload) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
    }
}

pub fn print_result<T: Serialize>(result: Result<T>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::ValidationInvalidJson
        | ErrorCode::ValidationEmptySearch
        | ErrorCode::ValidationInvalidQuery
        | ErrorCode::DocumentFieldMissing => 2,

        ErrorCode::DocumentNotFound => 4,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        assert!(write_payload(&mut FailingWriter(io::ErrorKind::BrokenPipe), "{}").is_ok());
    }

    #[test]
    fn other_write_failures_are_reported() {
        let err = write_payload(&mut FailingWriter(io::ErrorKind::PermissionDenied), "{}").unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
        assert_eq!(err.details["context"], "write stdout");
    }

    #[test]
    fn payload_is_written_with_trailing_newline() {
        let mut out = Vec::new();
        write_payload(&mut out, "{\"success\": true}").unwrap();
        assert_eq!(out, b"{\"success\": true}\n");
    }

    #[test]
    fn empty_search_maps_to_validation_exit_code() {
        let (value, exit_code) =
            map_cmd_result_to_json::<serde_json::Value>(Err(Error::validation_empty_search()));
        assert!(value.is_err());
        assert_eq!(exit_code, 2);
    }

    #[test]
    fn missing_document_maps_to_not_found_exit_code() {
        assert_eq!(exit_code_for_error(ErrorCode::DocumentNotFound), 4);
    }

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let json = CliResponse::<()>::from_error(&Error::validation_empty_search())
            .to_json()
            .unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"validation.empty_search\""));
        assert!(json.contains("Pass --search"));
    }

    #[test]
    fn success_envelope_omits_error() {
        let json = CliResponse::success(serde_json::json!({ "total_occurrences": 3 }))
            .to_json()
            .unwrap();

        assert!(json.contains("\"success\": true"));
        assert!(json.contains("\"total_occurrences\": 3"));
        assert!(!json.contains("\"error\""));
    }
}
