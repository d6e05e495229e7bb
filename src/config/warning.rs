use std::fmt;

use crate::hooks::HookName;
use crate::options::OptionKind;

/// Non-fatal problems found while validating a config file.
/// The offending entry is dropped and the release continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A hook name bound to something other than a shell command
    MisconfiguredHook { hook: HookName, found: String },
    /// A known option with a value of the wrong type
    MisconfiguredOption {
        option: String,
        expected: OptionKind,
        found: String,
    },
    /// An option that is only accepted as a command-line argument
    NotAllowedInConfig { option: String },
    /// A key that is neither a hook, an option nor `strategy`
    UnknownOption { option: String },
    /// A `strategy` entry that names no known strategy
    InvalidStrategy { reason: String },
}

impl ConfigWarning {
    /// The config key the warning is about
    pub fn key(&self) -> &str {
        match self {
            ConfigWarning::MisconfiguredHook { hook, .. } => hook.name(),
            ConfigWarning::MisconfiguredOption { option, .. }
            | ConfigWarning::NotAllowedInConfig { option }
            | ConfigWarning::UnknownOption { option } => option,
            ConfigWarning::InvalidStrategy { .. } => "strategy",
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MisconfiguredHook { hook, found } => write!(
                f,
                "Hook '{}' must be a shell command string, found {}; ignoring it",
                hook, found
            ),
            ConfigWarning::MisconfiguredOption {
                option,
                expected,
                found,
            } => write!(
                f,
                "Option '{}' must be {}, found {}; ignoring it",
                option,
                expected.describe(),
                found
            ),
            ConfigWarning::NotAllowedInConfig { option } => write!(
                f,
                "Cannot specify option '{}' in config, pass it as an argument instead",
                option
            ),
            ConfigWarning::UnknownOption { option } => {
                write!(f, "Invalid option '{}' in config; ignoring it", option)
            }
            ConfigWarning::InvalidStrategy { reason } => {
                write!(f, "Invalid strategy in config: {}; using the default", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_key() {
        let warnings = vec![
            ConfigWarning::MisconfiguredHook {
                hook: HookName::AfterPush,
                found: "integer".to_string(),
            },
            ConfigWarning::MisconfiguredOption {
                option: "local".to_string(),
                expected: OptionKind::Bool,
                found: "string".to_string(),
            },
            ConfigWarning::NotAllowedInConfig {
                option: "yes".to_string(),
            },
            ConfigWarning::UnknownOption {
                option: "colour".to_string(),
            },
        ];

        for warning in warnings {
            assert!(warning.to_string().contains(warning.key()), "{}", warning);
        }
    }

    #[test]
    fn test_misconfigured_option_describes_expected_type() {
        let warning = ConfigWarning::MisconfiguredOption {
            option: "manifest".to_string(),
            expected: OptionKind::StringArray,
            found: "integer".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Option 'manifest' must be an array of strings, found integer; ignoring it"
        );
    }
}
