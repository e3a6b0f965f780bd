//! Option values and leading commands.

use serde::{Deserialize, Serialize};

use super::split::split;

/// A configuration value rendered into arguments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Render a scalar as an argument string.
    ///
    /// Returns `None` for lists and for non-finite floats.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) if f.is_finite() => Some(f.to_string()),
            Value::Float(_) => None,
            Value::String(s) => Some(s.clone()),
            Value::List(_) => None,
        }
    }

    /// Render this value into `out`, flattening nested lists.
    pub fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            Value::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            scalar => {
                if let Some(s) = scalar.render() {
                    out.push(s);
                } else {
                    log::debug!("dropping non-finite value {:?}", scalar);
                }
            }
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Whether this value is dropped from positional arguments.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Value::Bool(false)) || matches!(self, Value::String(s) if s.is_empty())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Leading command tokens, e.g. a subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// A command line, split into arguments.
    Line(String),
    /// Arguments used as-is.
    Args(Vec<String>),
}

impl Command {
    /// The argument tokens for this command.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Command::Line(line) => split(line),
            Command::Args(args) => args.clone(),
        }
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Command::Line(line.to_string())
    }
}

impl From<Vec<&str>> for Command {
    fn from(args: Vec<&str>) -> Self {
        Command::Args(args.into_iter().map(String::from).collect())
    }
}
