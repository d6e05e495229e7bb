//! Release options: the descriptor table, the resolved option set and the
//! layering of config and command-line overrides on top of the defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::{ReleaseError, Result};

/// Placeholder replaced with the next tag name in commit messages and annotations.
pub const TAG_PLACEHOLDER: &str = "%@";

/// Value shape accepted for an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    String,
    StringArray,
    StringOrBool,
}

impl OptionKind {
    pub fn describe(&self) -> &'static str {
        match self {
            OptionKind::Bool => "a boolean",
            OptionKind::String => "a string",
            OptionKind::StringArray => "an array of strings",
            OptionKind::StringOrBool => "a string or a boolean",
        }
    }
}

/// Describes a single release option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    /// Options with `valid_in_config == false` are only accepted as direct arguments.
    pub valid_in_config: bool,
}

pub const AVAILABLE_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "local",
        kind: OptionKind::Bool,
        valid_in_config: true,
    },
    OptionSpec {
        name: "remote",
        kind: OptionKind::String,
        valid_in_config: true,
    },
    OptionSpec {
        name: "tag",
        kind: OptionKind::String,
        valid_in_config: false,
    },
    OptionSpec {
        name: "annotation",
        kind: OptionKind::String,
        valid_in_config: true,
    },
    OptionSpec {
        name: "message",
        kind: OptionKind::String,
        valid_in_config: true,
    },
    OptionSpec {
        name: "manifest",
        kind: OptionKind::StringArray,
        valid_in_config: true,
    },
    OptionSpec {
        name: "yes",
        kind: OptionKind::Bool,
        valid_in_config: false,
    },
    OptionSpec {
        name: "strategy",
        kind: OptionKind::String,
        valid_in_config: true,
    },
    OptionSpec {
        name: "major",
        kind: OptionKind::Bool,
        valid_in_config: false,
    },
    OptionSpec {
        name: "minor",
        kind: OptionKind::Bool,
        valid_in_config: false,
    },
    OptionSpec {
        name: "prerelease",
        kind: OptionKind::StringOrBool,
        valid_in_config: false,
    },
];

/// Look up an option descriptor by name.
pub fn find_option(name: &str) -> Option<&'static OptionSpec> {
    AVAILABLE_OPTIONS.iter().find(|spec| spec.name == name)
}

/// Built-in tag naming strategies selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyName {
    #[default]
    Semver,
    Date,
}

impl StrategyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyName::Semver => "semver",
            StrategyName::Date => "date",
        }
    }
}

impl FromStr for StrategyName {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "semver" => Ok(StrategyName::Semver),
            "date" => Ok(StrategyName::Date),
            other => Err(ReleaseError::config(format!(
                "Unknown strategy '{}', expected 'semver' or 'date'",
                other
            ))),
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `prerelease` option: either a bare flag or a named identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerelease {
    Flag,
    Named(String),
}

impl Prerelease {
    /// Identifier used when the option was given as a bare flag.
    pub const DEFAULT_IDENTIFIER: &'static str = "beta";

    /// Interpret a raw argument value. Argument parsers cannot tell a bare
    /// flag from a value, so `""` and `"true"` both mean the flag form.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "" | "true" => Prerelease::Flag,
            name => Prerelease::Named(name.to_string()),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Prerelease::Flag => Self::DEFAULT_IDENTIFIER,
            Prerelease::Named(name) => name,
        }
    }
}

/// Fully resolved options for one release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    pub local: bool,
    pub remote: String,
    pub tag: Option<String>,
    pub annotation: Option<String>,
    pub message: String,
    pub manifest: Vec<String>,
    pub yes: bool,
    pub strategy: StrategyName,
    pub major: bool,
    pub minor: bool,
    pub prerelease: Option<Prerelease>,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        ReleaseOptions {
            local: false,
            remote: "origin".to_string(),
            tag: None,
            annotation: None,
            message: "Released %@".to_string(),
            manifest: vec!["package.json".to_string()],
            yes: false,
            strategy: StrategyName::Semver,
            major: false,
            minor: false,
            prerelease: None,
        }
    }
}

impl ReleaseOptions {
    /// Layer `overrides` on top of the current values.
    pub fn apply(&mut self, overrides: &OptionOverrides) {
        if let Some(local) = overrides.local {
            self.local = local;
        }
        if let Some(ref remote) = overrides.remote {
            self.remote = remote.clone();
        }
        if let Some(ref tag) = overrides.tag {
            self.tag = Some(tag.clone());
        }
        if let Some(ref annotation) = overrides.annotation {
            self.annotation = Some(annotation.clone());
        }
        if let Some(ref message) = overrides.message {
            self.message = message.clone();
        }
        if let Some(ref manifest) = overrides.manifest {
            self.manifest = manifest.clone();
        }
        if let Some(yes) = overrides.yes {
            self.yes = yes;
        }
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(major) = overrides.major {
            self.major = major;
        }
        if let Some(minor) = overrides.minor {
            self.minor = minor;
        }
        if let Some(ref prerelease) = overrides.prerelease {
            self.prerelease = Some(prerelease.clone());
        }
    }

    /// Commit message with the tag name substituted in.
    pub fn commit_message(&self, tag: &str) -> String {
        substitute_tag(&self.message, tag)
    }

    /// Tag annotation with the tag name substituted in; `None` means a lightweight tag.
    pub fn tag_annotation(&self, tag: &str) -> Option<String> {
        self.annotation
            .as_deref()
            .map(|annotation| substitute_tag(annotation, tag))
    }
}

/// A partial option set. `None` keeps the lower-precedence value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub local: Option<bool>,
    pub remote: Option<String>,
    pub tag: Option<String>,
    pub annotation: Option<String>,
    pub message: Option<String>,
    pub manifest: Option<Vec<String>>,
    pub yes: Option<bool>,
    pub strategy: Option<StrategyName>,
    pub major: Option<bool>,
    pub minor: Option<bool>,
    pub prerelease: Option<Prerelease>,
}

impl OptionOverrides {
    pub fn is_empty(&self) -> bool {
        *self == OptionOverrides::default()
    }
}

/// Replace every occurrence of `%@` in `template` with `tag`.
pub fn substitute_tag(template: &str, tag: &str) -> String {
    template.replace(TAG_PLACEHOLDER, tag)
}
