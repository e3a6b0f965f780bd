//! Response formatting for binary output.

use serde::Serialize;

use crate::flags::ValidationError;

/// A successful result, printed to stdout as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Output of `split` and `splat`.
    Args { args: Vec<String> },
    /// Output of `join`.
    Command { command: String },
}

impl Response {
    pub fn args(args: Vec<String>) -> Self {
        Response::Args { args }
    }

    pub fn command(command: String) -> Self {
        Response::Command { command }
    }
}

/// A failure, printed to stderr as JSON.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// The offending channel for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            channel: None,
        }
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error: err.to_string(),
            channel: Some(err.channel.to_string()),
        }
    }
}

/// Format a response as a JSON line.
pub fn format_response(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| r#"{"args":[]}"#.to_string())
}

/// Format an error as a JSON line.
pub fn format_error(error: &ErrorResponse) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| format!(r#"{{"error":{:?}}}"#, error.error))
}
