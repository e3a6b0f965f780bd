//! Compile a [`SplatObject`] into an argument vector.

use heck::ToKebabCase;
use std::fmt;
use thiserror::Error;

use super::object::SplatObject;
use super::options::{ResolvedOptions, SplatOptions};
use super::value::{Command, Value};

/// A reserved list channel of a [`SplatObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// `_`: appended after options.
    Remaining,
    /// `--`: appended after a `--` separator.
    Extra,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Remaining => f.write_str("_"),
            Channel::Extra => f.write_str("--"),
        }
    }
}

/// A reserved channel was given something other than a list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `{channel}` to be a list, got {found}")]
pub struct ValidationError {
    pub channel: Channel,
    pub found: &'static str,
}

/// How a key is spelled on the command line.
enum Flag<'a> {
    /// Rendered from the key with prefix and dash-casing.
    Key(&'a str),
    /// A literal token from `aliases`.
    Alias(String),
}

/// Convert `object` into an ordered argument vector.
///
/// Options carried in `object.splat` are layered under `options`. Neither
/// input is modified, so repeated calls return the same arguments.
///
/// Order: command, positional values, options, remaining values, then
/// `--` and the extra values. `append_arguments` moves the positional
/// values after the options.
pub fn splat(
    object: &SplatObject,
    options: &SplatOptions,
) -> Result<Vec<String>, ValidationError> {
    let merged = match &object.splat {
        Some(carried) => carried.merge(options),
        None => options.clone(),
    };
    let opts = merged.resolve();

    let remaining = list_channel(object.remaining.as_ref(), Channel::Remaining)?;
    let extra = list_channel(object.extra.as_ref(), Channel::Extra)?;

    let argument_names = object
        .argument_names
        .as_deref()
        .unwrap_or(&opts.argument_names);

    let mut slots: Vec<Option<&Value>> = vec![None; argument_names.len()];
    let mut rendered = Vec::new();

    for (key, value) in &object.options {
        if let Some(index) = argument_names.iter().position(|name| name == key) {
            fill_slots(&mut slots, index, value);
            continue;
        }

        if opts.is_filtered(key) {
            log::debug!("skipping filtered key '{}'", key);
            continue;
        }

        let flag = match opts.aliases.get(key) {
            Some(alias) => Flag::Alias(alias_token(alias)),
            None => Flag::Key(key.as_str()),
        };
        render_entry(&mut rendered, &opts, key, &flag, value);
    }

    let mut positional = Vec::new();
    for value in slots.into_iter().flatten().chain(&object.positional) {
        push_positional(&mut positional, value);
    }

    let mut args = object
        .command
        .as_ref()
        .or(merged.command.as_ref())
        .map(Command::to_args)
        .unwrap_or_default();

    if opts.append_arguments {
        args.append(&mut rendered);
        args.append(&mut positional);
    } else {
        args.append(&mut positional);
        args.append(&mut rendered);
    }

    for value in remaining {
        value.flatten_into(&mut args);
    }

    if !extra.is_empty() {
        args.push("--".to_string());
        for value in extra {
            value.flatten_into(&mut args);
        }
    }

    log::trace!("splat produced {:?}", args);
    Ok(args)
}

fn list_channel(value: Option<&Value>, channel: Channel) -> Result<&[Value], ValidationError> {
    match value {
        None => Ok(&[]),
        Some(Value::List(items)) => Ok(items.as_slice()),
        Some(other) => Err(ValidationError {
            channel,
            found: other.kind(),
        }),
    }
}

/// Write `value` into the positional slot at `index`; list items fill
/// consecutive slots.
fn fill_slots<'a>(slots: &mut Vec<Option<&'a Value>>, index: usize, value: &'a Value) {
    let items = match value {
        Value::List(items) => items.iter().collect::<Vec<_>>(),
        scalar => vec![scalar],
    };
    for (offset, item) in items.into_iter().enumerate() {
        if item.is_blank() {
            continue;
        }
        let slot = index + offset;
        if slot >= slots.len() {
            slots.resize(slot + 1, None);
        }
        slots[slot] = Some(item);
    }
}

/// Positional values skip `false` and empty strings at any depth.
fn push_positional(out: &mut Vec<String>, value: &Value) {
    match value {
        Value::List(items) => {
            for item in items {
                push_positional(out, item);
            }
        }
        blank if blank.is_blank() => log::debug!("skipping blank positional value"),
        scalar => scalar.flatten_into(out),
    }
}

/// Literal alias tokens get a `-` unless they already carry a switch prefix.
fn alias_token(alias: &str) -> String {
    if alias.starts_with('-') || alias.starts_with('/') {
        alias.to_string()
    } else {
        format!("-{alias}")
    }
}

fn render_entry(
    out: &mut Vec<String>,
    opts: &ResolvedOptions,
    key: &str,
    flag: &Flag<'_>,
    value: &Value,
) {
    match value {
        Value::Bool(true) => {
            if opts.ignore_true {
                return;
            }
            let token = flag_token(opts, flag);
            if opts.is_no_flag(key) {
                push_flag(out, opts, token, Some(opts.true_value.as_str()));
            } else {
                push_flag(out, opts, token, None);
            }
        }
        Value::Bool(false) => {
            if opts.ignore_false {
                return;
            }
            if opts.is_no_flag(key) {
                let token = flag_token(opts, flag);
                push_flag(out, opts, token, Some(opts.false_value.as_str()));
            } else {
                let token = negated_token(opts, flag);
                push_flag(out, opts, token, None);
            }
        }
        Value::List(items) => {
            let mut values = Vec::new();
            for item in items {
                item.flatten_into(&mut values);
            }
            for item in values {
                let token = flag_token(opts, flag);
                push_flag(out, opts, token, Some(item.as_str()));
            }
        }
        scalar => match scalar.render() {
            Some(rendered) => {
                let token = flag_token(opts, flag);
                push_flag(out, opts, token, Some(rendered.as_str()));
            }
            None => log::debug!("dropping non-finite value for '{}'", key),
        },
    }
}

fn flag_token(opts: &ResolvedOptions, flag: &Flag<'_>) -> String {
    match flag {
        Flag::Key(key) => prefixed(opts, key),
        Flag::Alias(token) => token.clone(),
    }
}

/// `--no-<key>`, or the alias with `no-` after its switch characters.
fn negated_token(opts: &ResolvedOptions, flag: &Flag<'_>) -> String {
    match flag {
        Flag::Key(key) => prefixed(opts, &format!("no-{key}")),
        Flag::Alias(token) => {
            let name = token.trim_start_matches(['-', '/']);
            let switch = &token[..token.len() - name.len()];
            format!("{switch}no-{name}")
        }
    }
}

fn prefixed(opts: &ResolvedOptions, key: &str) -> String {
    let name = if opts.preserve_case {
        key.to_string()
    } else {
        key.to_kebab_case()
    };
    let prefix = if opts.short_flag && name.chars().count() == 1 {
        "-"
    } else {
        opts.prefix.as_str()
    };
    format!("{prefix}{name}")
}

fn push_flag(out: &mut Vec<String>, opts: &ResolvedOptions, token: String, value: Option<&str>) {
    match (value, &opts.assign) {
        (Some(value), Some(assign)) => out.push(format!("{token}{assign}{value}")),
        (Some(value), None) => {
            out.push(token);
            out.push(value.to_string());
        }
        (None, _) => out.push(token),
    }
}
