//! Release configuration file
//!
//! A TOML file holding any of the config-allowed options, shell commands
//! for the five hooks, and a `strategy`:
//!
//! ```toml
//! remote = "upstream"
//! message = "chore(release): %@"
//! manifest = ["package.json", "package-lock.json"]
//! afterPush = "npm publish"
//!
//! [strategy]
//! next_tag = "./scripts/next-tag.sh"
//! latest_tag = "git describe --tags --abbrev=0"
//! ```
//!
//! Loading never fails on a malformed entry: [validate_config] drops it and
//! reports a [ConfigWarning] instead.

pub mod warning;

pub use warning::ConfigWarning;

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{ReleaseError, Result};
use crate::hooks::{HookName, HookSet, ScriptHook};
use crate::options::{find_option, OptionOverrides, StrategyName};
use crate::strategy::{CommandStrategy, Strategy};

/// Config file name, both in the project and in the user config directory
pub const CONFIG_FILE: &str = "release.toml";

/// Directory under the project root holding [CONFIG_FILE]
pub const PROJECT_CONFIG_DIR: &str = "config";

/// Directory under the user config directory holding [CONFIG_FILE]
pub const USER_CONFIG_DIR: &str = "git-release";

/// A validated config file
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// File the config was read from, `None` if no file was found
    pub path: Option<PathBuf>,
    pub options: OptionOverrides,
    pub hooks: HookSet,
    /// A custom strategy; named strategies land in `options.strategy`
    pub strategy: Option<Strategy>,
    pub warnings: Vec<ConfigWarning>,
}

/// Locates the config file.
///
/// Looks in the following order:
/// 1. `explicit`, which must exist
/// 2. `config/release.toml` under the project root
/// 3. `git-release/release.toml` in the user config directory
///
/// # Returns
/// * `Ok(Some(path))` - The first file found
/// * `Ok(None)` - No config file anywhere
/// * `Err` - If `explicit` was given but does not exist
pub fn find_config(explicit: Option<&Path>, project_root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(ReleaseError::config(format!(
            "Config file '{}' not found",
            path.display()
        )));
    }

    let project = project_root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR).join(CONFIG_FILE))
        .filter(|path| path.is_file()))
}

/// Loads and validates the config file, or returns an empty report if none exists.
///
/// # Returns
/// * `Ok(ConfigReport)` - Sanitized config plus any warnings
/// * `Err` - If the file cannot be read or is not valid TOML
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<ConfigReport> {
    let path = match find_config(explicit, project_root)? {
        Some(path) => path,
        None => {
            debug!("no config file found");
            return Ok(ConfigReport::default());
        }
    };

    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)?;
    let table: Table = toml::from_str(&content)?;

    let mut report = validate_config(&table, project_root);
    for warning in &report.warnings {
        warn!(key = warning.key(), "{}", warning);
    }
    report.path = Some(path);

    Ok(report)
}

/// Splits a raw config table into options, hooks and strategy.
///
/// Entries of the wrong shape and unknown keys are dropped with a warning.
pub fn validate_config(table: &Table, project_root: &Path) -> ConfigReport {
    let mut report = ConfigReport::default();

    for (key, value) in table {
        if let Ok(hook) = key.parse::<HookName>() {
            validate_hook(hook, value, &mut report);
        } else if key == "strategy" {
            validate_strategy(value, project_root, &mut report);
        } else {
            validate_option(key, value, &mut report);
        }
    }

    report
}

fn validate_hook(hook: HookName, value: &Value, report: &mut ConfigReport) {
    match value.as_str() {
        Some(command) if !command.trim().is_empty() => {
            report
                .hooks
                .insert(hook, Box::new(ScriptHook::new(hook, command)));
        }
        Some(_) => report.warnings.push(ConfigWarning::MisconfiguredHook {
            hook,
            found: "an empty string".to_string(),
        }),
        None => report.warnings.push(ConfigWarning::MisconfiguredHook {
            hook,
            found: value.type_str().to_string(),
        }),
    }
}

fn validate_strategy(value: &Value, project_root: &Path, report: &mut ConfigReport) {
    match value {
        Value::String(name) => match name.parse::<StrategyName>() {
            Ok(name) => report.options.strategy = Some(name),
            Err(_) => report.warnings.push(ConfigWarning::InvalidStrategy {
                reason: format!("unknown strategy '{}'", name),
            }),
        },
        Value::Table(commands) => {
            let next_tag = match commands.get("next_tag").and_then(Value::as_str) {
                Some(command) if !command.trim().is_empty() => command,
                _ => {
                    report.warnings.push(ConfigWarning::InvalidStrategy {
                        reason: "a strategy table needs a 'next_tag' command".to_string(),
                    });
                    return;
                }
            };

            let mut strategy = CommandStrategy::new(next_tag, project_root);
            match commands.get("latest_tag") {
                None => {}
                Some(Value::String(command)) => {
                    strategy = strategy.with_latest_tag(command.as_str());
                }
                Some(other) => {
                    report.warnings.push(ConfigWarning::InvalidStrategy {
                        reason: format!("'latest_tag' must be a string, found {}", other.type_str()),
                    });
                    return;
                }
            }

            report.strategy = Some(Strategy::custom(strategy));
        }
        other => report.warnings.push(ConfigWarning::InvalidStrategy {
            reason: format!(
                "expected 'semver', 'date' or a table of commands, found {}",
                other.type_str()
            ),
        }),
    }
}

fn validate_option(key: &str, value: &Value, report: &mut ConfigReport) {
    let spec = match find_option(key) {
        Some(spec) => spec,
        None => {
            report.warnings.push(ConfigWarning::UnknownOption {
                option: key.to_string(),
            });
            return;
        }
    };

    if !spec.valid_in_config {
        report.warnings.push(ConfigWarning::NotAllowedInConfig {
            option: key.to_string(),
        });
        return;
    }

    let misconfigured = || ConfigWarning::MisconfiguredOption {
        option: key.to_string(),
        expected: spec.kind,
        found: value.type_str().to_string(),
    };

    let options = &mut report.options;
    match (key, value) {
        ("local", Value::Boolean(flag)) => options.local = Some(*flag),
        ("remote", Value::String(text)) => options.remote = Some(text.clone()),
        ("annotation", Value::String(text)) => options.annotation = Some(text.clone()),
        ("message", Value::String(text)) => options.message = Some(text.clone()),
        ("manifest", Value::Array(items)) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();

            match strings {
                Some(strings) => options.manifest = Some(strings),
                None => report.warnings.push(misconfigured()),
            }
        }
        _ => report.warnings.push(misconfigured()),
    }
}
