//! Request parsing for the `cmdflags` binary.

use serde::Deserialize;
use thiserror::Error;

use crate::flags::{Platform, SplatObject, SplatOptions};

/// Errors that can occur when parsing a request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// A request read from stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// The operation to run: "split", "join" or "splat".
    pub op: String,

    /// The operation's parameters as raw JSON.
    #[serde(default)]
    pub input: serde_json::Value,

    /// Directory searched for `.cmdflags.toml` (optional).
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Parameters for `split`.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitInput {
    /// The command line to split.
    pub command: String,
}

/// Parameters for `join`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinInput {
    pub args: Vec<String>,
    /// Overrides the configured platform.
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// Parameters for `splat`.
#[derive(Debug, Clone, Deserialize)]
pub struct SplatInput {
    pub object: SplatObject,
    #[serde(default)]
    pub options: SplatOptions,
}

/// A parsed operation.
#[derive(Debug, Clone)]
pub enum Operation {
    Split(SplitInput),
    Join(JoinInput),
    Splat(SplatInput),
}

impl Request {
    /// Parse from JSON string.
    pub fn parse(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode `input` according to `op`.
    pub fn operation(&self) -> Result<Operation, InputError> {
        let input = self.input.clone();
        match self.op.as_str() {
            "split" => Ok(Operation::Split(serde_json::from_value(input)?)),
            "join" => Ok(Operation::Join(serde_json::from_value(input)?)),
            "splat" => Ok(Operation::Splat(serde_json::from_value(input)?)),
            other => Err(InputError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_request() {
        let json = r#"{"op":"split","input":{"command":"ls -la"}}"#;
        let request = Request::parse(json).unwrap();
        match request.operation().unwrap() {
            Operation::Split(split) => assert_eq!(split.command, "ls -la"),
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_parse_join_request() {
        let json = r#"{"op":"join","input":{"args":["a","b c"],"platform":"windows"}}"#;
        let request = Request::parse(json).unwrap();
        match request.operation().unwrap() {
            Operation::Join(join) => {
                assert_eq!(join.args, vec!["a", "b c"]);
                assert_eq!(join.platform, Some(Platform::Windows));
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_parse_splat_request() {
        let json = r#"{"op":"splat","input":{"object":{"foo":"bar"}},"cwd":"/work"}"#;
        let request = Request::parse(json).unwrap();
        assert_eq!(request.cwd, Some("/work".to_string()));
        match request.operation().unwrap() {
            Operation::Splat(splat) => {
                assert_eq!(splat.object.options.len(), 1);
                assert_eq!(splat.options, SplatOptions::default());
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operation() {
        let request = Request::parse(r#"{"op":"exec"}"#).unwrap();
        assert!(matches!(
            request.operation(),
            Err(InputError::UnknownOperation(op)) if op == "exec"
        ));
    }

    #[test]
    fn test_missing_field() {
        let request = Request::parse(r#"{"op":"split","input":{}}"#).unwrap();
        assert!(matches!(request.operation(), Err(InputError::Json(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(Request::parse("not json").is_err());
    }
}
