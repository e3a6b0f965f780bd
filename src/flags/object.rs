//! The structured configuration compiled by [`splat`](super::splat).

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use std::fmt;

use super::options::SplatOptions;
use super::value::{Command, Value};

/// Input to [`splat`](super::splat).
///
/// The reserved channels are separate fields, so an option can never
/// collide with them. When deserialized from a map, the keys `*`, `_`,
/// `--` and `splat` fill `positional`, `remaining`, `extra` and `splat`;
/// every other key becomes an option in document order. Keys whose value
/// is `null` are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplatObject {
    /// Leading command tokens. Overrides [`SplatOptions::command`].
    pub command: Option<Command>,
    /// Positional values (`*`), placed after any named positional slots.
    pub positional: Vec<Value>,
    /// Values appended after flags (`_`). Must be a list.
    pub remaining: Option<Value>,
    /// Values appended after a `--` separator (`--`). Must be a list.
    pub extra: Option<Value>,
    /// Overrides [`SplatOptions::argument_names`].
    pub argument_names: Option<Vec<String>>,
    /// Named options in insertion order.
    pub options: Vec<(String, Value)>,
    /// Options carried with the object. Explicit options passed to
    /// [`splat`](super::splat) take precedence.
    pub splat: Option<SplatOptions>,
}

impl SplatObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    pub fn command(mut self, command: impl Into<Command>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Append a positional value.
    pub fn positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn remaining(mut self, value: impl Into<Value>) -> Self {
        self.remaining = Some(value.into());
        self
    }

    pub fn extra(mut self, value: impl Into<Value>) -> Self {
        self.extra = Some(value.into());
        self
    }

    pub fn argument_names(mut self, names: &[&str]) -> Self {
        self.argument_names = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_options(mut self, options: SplatOptions) -> Self {
        self.splat = Some(options);
        self
    }

    /// Layer the carried options over `defaults`.
    pub fn with_defaults(mut self, defaults: &SplatOptions) -> Self {
        let carried = self.splat.take().unwrap_or_default();
        self.splat = Some(defaults.merge(&carried));
        self
    }
}

impl<'de> Deserialize<'de> for SplatObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SplatObjectVisitor)
    }
}

struct SplatObjectVisitor;

impl<'de> Visitor<'de> for SplatObjectVisitor {
    type Value = SplatObject;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SplatObject, A::Error> {
        let mut object = SplatObject::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "*" => match map.next_value::<Option<Value>>()? {
                    Some(Value::List(items)) => object.positional.extend(items),
                    Some(value) => object.positional.push(value),
                    None => {}
                },
                "_" => object.remaining = map.next_value()?,
                "--" => object.extra = map.next_value()?,
                "splat" => object.splat = map.next_value()?,
                _ => match map.next_value::<Option<Value>>()? {
                    Some(value) => object.options.push((key, value)),
                    None => log::debug!("skipping null value for '{}'", key),
                },
            }
        }
        Ok(object)
    }
}
