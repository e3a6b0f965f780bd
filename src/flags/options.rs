//! Options controlling how [`splat`](super::splat) renders arguments.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::value::Command;

/// Options for [`splat`](super::splat).
///
/// Every field is optional so option blocks can be layered with
/// [`SplatOptions::merge`]. Keys are accepted in camelCase or snake_case.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplatOptions {
    /// Leading command tokens.
    pub command: Option<Command>,
    /// Long flag prefix. Defaults to `--`.
    pub prefix: Option<String>,
    /// Render single-character names with `-`. Defaults to `true`.
    #[serde(alias = "short_flag")]
    pub short_flag: Option<bool>,
    /// Keys whose booleans render as a value instead of a bare flag.
    #[serde(alias = "no_flags")]
    pub no_flags: Option<NoFlags>,
    /// Values emitted for booleans covered by `no_flags`.
    #[serde(alias = "no_flag_values")]
    pub no_flag_values: Option<NoFlagValues>,
    /// Key to literal flag token.
    pub aliases: Option<BTreeMap<String, String>>,
    /// Token joining a flag and its value into one argument, e.g. `=`.
    pub assign: Option<String>,
    /// Keep key names as written instead of dash-casing them.
    #[serde(alias = "preserve_case")]
    pub preserve_case: Option<bool>,
    /// Only render keys matching one of these. Takes precedence over `excludes`.
    pub includes: Option<Vec<KeyPattern>>,
    /// Never render keys matching one of these.
    pub excludes: Option<Vec<KeyPattern>>,
    #[serde(alias = "ignore_true")]
    pub ignore_true: Option<bool>,
    #[serde(alias = "ignore_false")]
    pub ignore_false: Option<bool>,
    /// Keys placed positionally, by their index in this list.
    #[serde(alias = "argument_names")]
    pub argument_names: Option<Vec<String>>,
    /// Place positional values after the flags.
    #[serde(alias = "append_arguments")]
    pub append_arguments: Option<bool>,
}

/// Which keys render booleans as values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NoFlags {
    All(bool),
    Keys(Vec<String>),
}

impl NoFlags {
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            NoFlags::All(all) => *all,
            NoFlags::Keys(keys) => keys.iter().any(|k| k == key),
        }
    }
}

/// Values emitted for `true` and `false` under [`NoFlags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoFlagValues {
    pub t: Option<String>,
    pub f: Option<String>,
}

/// A key name or a regular expression matched against key names.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawKeyPattern")]
pub enum KeyPattern {
    Exact(String),
    Regex(Regex),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeyPattern {
    Exact(String),
    Regex { regex: String },
}

impl TryFrom<RawKeyPattern> for KeyPattern {
    type Error = regex::Error;

    fn try_from(raw: RawKeyPattern) -> Result<Self, Self::Error> {
        match raw {
            RawKeyPattern::Exact(name) => Ok(KeyPattern::Exact(name)),
            RawKeyPattern::Regex { regex } => KeyPattern::regex(&regex),
        }
    }
}

impl KeyPattern {
    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(KeyPattern::Regex(Regex::new(pattern)?))
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyPattern::Exact(name) => name == key,
            KeyPattern::Regex(re) => re.is_match(key),
        }
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyPattern::Exact(a), KeyPattern::Exact(b)) => a == b,
            (KeyPattern::Regex(a), KeyPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<&str> for KeyPattern {
    fn from(name: &str) -> Self {
        KeyPattern::Exact(name.to_string())
    }
}

/// Options with defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub prefix: String,
    pub short_flag: bool,
    pub no_flags: Option<NoFlags>,
    pub true_value: String,
    pub false_value: String,
    pub aliases: BTreeMap<String, String>,
    pub assign: Option<String>,
    pub preserve_case: bool,
    pub includes: Option<Vec<KeyPattern>>,
    pub excludes: Vec<KeyPattern>,
    pub ignore_true: bool,
    pub ignore_false: bool,
    pub argument_names: Vec<String>,
    pub append_arguments: bool,
}

impl SplatOptions {
    /// Layer `other` over `self`. Fields set in `other` win.
    ///
    /// Neither input is modified.
    pub fn merge(&self, other: &SplatOptions) -> SplatOptions {
        SplatOptions {
            command: pick(&self.command, &other.command),
            prefix: pick(&self.prefix, &other.prefix),
            short_flag: other.short_flag.or(self.short_flag),
            no_flags: pick(&self.no_flags, &other.no_flags),
            no_flag_values: pick(&self.no_flag_values, &other.no_flag_values),
            aliases: pick(&self.aliases, &other.aliases),
            assign: pick(&self.assign, &other.assign),
            preserve_case: other.preserve_case.or(self.preserve_case),
            includes: pick(&self.includes, &other.includes),
            excludes: pick(&self.excludes, &other.excludes),
            ignore_true: other.ignore_true.or(self.ignore_true),
            ignore_false: other.ignore_false.or(self.ignore_false),
            argument_names: pick(&self.argument_names, &other.argument_names),
            append_arguments: other.append_arguments.or(self.append_arguments),
        }
    }

    /// Apply defaults.
    pub fn resolve(&self) -> ResolvedOptions {
        let values = self.no_flag_values.clone().unwrap_or_default();
        ResolvedOptions {
            prefix: self.prefix.clone().unwrap_or_else(|| "--".to_string()),
            short_flag: self.short_flag.unwrap_or(true),
            no_flags: self.no_flags.clone(),
            true_value: values.t.unwrap_or_else(|| "true".to_string()),
            false_value: values.f.unwrap_or_else(|| "false".to_string()),
            aliases: self.aliases.clone().unwrap_or_default(),
            assign: self.assign.clone().filter(|a| !a.is_empty()),
            preserve_case: self.preserve_case.unwrap_or(false),
            includes: self.includes.clone(),
            excludes: self.excludes.clone().unwrap_or_default(),
            ignore_true: self.ignore_true.unwrap_or(false),
            ignore_false: self.ignore_false.unwrap_or(false),
            argument_names: self.argument_names.clone().unwrap_or_default(),
            append_arguments: self.append_arguments.unwrap_or(false),
        }
    }
}

fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
    over.as_ref().or(base.as_ref()).cloned()
}

impl ResolvedOptions {
    /// Whether `key` is filtered out by `includes`/`excludes`.
    pub fn is_filtered(&self, key: &str) -> bool {
        if self.excludes.iter().any(|p| p.matches(key)) {
            return true;
        }
        match &self.includes {
            Some(includes) => !includes.iter().any(|p| p.matches(key)),
            None => false,
        }
    }

    pub fn is_no_flag(&self, key: &str) -> bool {
        self.no_flags.as_ref().is_some_and(|n| n.applies_to(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let resolved = SplatOptions::default().resolve();
        assert_eq!(resolved.prefix, "--");
        assert!(resolved.short_flag);
        assert!(!resolved.preserve_case);
        assert_eq!(resolved.true_value, "true");
        assert_eq!(resolved.false_value, "false");
        assert!(resolved.assign.is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = SplatOptions {
            prefix: Some("/".to_string()),
            short_flag: Some(false),
            assign: Some("=".to_string()),
            ..Default::default()
        };
        let over = SplatOptions {
            prefix: Some("--".to_string()),
            ..Default::default()
        };
        let merged = base.merge(&over);
        assert_eq!(merged.prefix.as_deref(), Some("--"));
        assert_eq!(merged.short_flag, Some(false));
        assert_eq!(merged.assign.as_deref(), Some("="));
        // inputs untouched
        assert_eq!(base.prefix.as_deref(), Some("/"));
    }

    #[test]
    fn test_empty_assign_is_unset() {
        let options = SplatOptions {
            assign: Some(String::new()),
            ..Default::default()
        };
        assert!(options.resolve().assign.is_none());
    }

    #[test]
    fn test_filters() {
        let options = SplatOptions {
            includes: Some(vec![KeyPattern::from("a"), KeyPattern::regex("^b").unwrap()]),
            excludes: Some(vec![KeyPattern::from("bad")]),
            ..Default::default()
        }
        .resolve();
        assert!(!options.is_filtered("a"));
        assert!(!options.is_filtered("bee"));
        assert!(options.is_filtered("bad"));
        assert!(options.is_filtered("c"));
    }

    #[test]
    fn test_no_flags() {
        assert!(NoFlags::All(true).applies_to("x"));
        assert!(!NoFlags::All(false).applies_to("x"));
        let keys = NoFlags::Keys(vec!["force".to_string()]);
        assert!(keys.applies_to("force"));
        assert!(!keys.applies_to("other"));
    }

    #[test]
    fn test_deserialize_json_camel_case() {
        let options: SplatOptions = serde_json::from_str(
            r#"{
                "shortFlag": false,
                "noFlags": ["force"],
                "noFlagValues": {"t": "on"},
                "excludes": ["secret", {"regex": "^_"}],
                "argumentNames": ["src"]
            }"#,
        )
        .unwrap();
        assert_eq!(options.short_flag, Some(false));
        assert_eq!(options.no_flags, Some(NoFlags::Keys(vec!["force".to_string()])));
        assert_eq!(options.no_flag_values.unwrap().t.as_deref(), Some("on"));
        let excludes = options.excludes.unwrap();
        assert!(excludes[1].matches("_private"));
        assert_eq!(options.argument_names, Some(vec!["src".to_string()]));
    }

    #[test]
    fn test_deserialize_toml_snake_case() {
        let options: SplatOptions = toml::from_str(
            r#"
prefix = "/"
preserve_case = true
no_flags = true
"#,
        )
        .unwrap();
        assert_eq!(options.prefix.as_deref(), Some("/"));
        assert_eq!(options.preserve_case, Some(true));
        assert_eq!(options.no_flags, Some(NoFlags::All(true)));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let result: Result<SplatOptions, _> =
            serde_json::from_str(r#"{"includes": [{"regex": "[oops"}]}"#);
        assert!(result.is_err());
    }
}
