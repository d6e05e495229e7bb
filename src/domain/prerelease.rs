//! Pre-release identifier handling for semantic versioning
//!
//! A pre-release is a dot-separated list of identifiers, each either numeric
//! or alphanumeric (`beta.0`, `rc.2`, `alpha.x.1`).
//! See https://semver.org/#spec-item-9

use crate::error::{ReleaseError, Result};
use std::fmt;

/// Single dot-separated pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    fn parse(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
                Identifier::Numeric(n)
            }
            _ => Identifier::AlphaNumeric(s.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Parsed pre-release identifiers of a version
///
/// # Examples
/// - "" -> []
/// - "beta.1" -> [AlphaNumeric("beta"), Numeric(1)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrereleaseIds {
    pub ids: Vec<Identifier>,
}

impl PrereleaseIds {
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return PrereleaseIds::default();
        }

        PrereleaseIds {
            ids: s.split('.').map(Identifier::parse).collect(),
        }
    }

    pub fn from_semver(pre: &semver::Prerelease) -> Self {
        Self::parse(pre.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bump the pre-release under the given `name`.
    ///
    /// The right-most numeric identifier is incremented (a `0` is appended if
    /// there is none). If the leading identifier is not `name`, or `name` is
    /// not followed by a number, the result restarts at `<name>.0`.
    ///
    /// Fails if the numeric identifier is already `u64::MAX`.
    ///
    /// ```ignore
    /// PrereleaseIds::parse("beta.0").bump("beta")? // beta.1
    /// PrereleaseIds::parse("alpha.3").bump("beta")? // beta.0
    /// PrereleaseIds::parse("").bump("beta")? // beta.0
    /// ```
    pub fn bump(&self, name: &str) -> Result<Self> {
        let mut ids = self.ids.clone();

        if ids.is_empty() {
            ids.push(Identifier::Numeric(0));
        } else {
            let last_numeric = ids
                .iter()
                .rposition(|id| matches!(id, Identifier::Numeric(_)));
            match last_numeric {
                Some(i) => {
                    if let Identifier::Numeric(n) = &mut ids[i] {
                        *n = n.checked_add(1).ok_or_else(|| {
                            ReleaseError::strategy(format!(
                                "Cannot increment pre-release '{}'",
                                self
                            ))
                        })?;
                    }
                }
                None => ids.push(Identifier::Numeric(0)),
            }
        }

        let restart = match ids.first() {
            Some(Identifier::AlphaNumeric(first)) if first == name => {
                !matches!(ids.get(1), Some(Identifier::Numeric(_)))
            }
            _ => true,
        };

        if restart {
            ids = vec![
                Identifier::AlphaNumeric(name.to_string()),
                Identifier::Numeric(0),
            ];
        }

        Ok(PrereleaseIds { ids })
    }

    pub fn to_semver(&self) -> Result<semver::Prerelease> {
        semver::Prerelease::new(&self.to_string()).map_err(|e| {
            ReleaseError::strategy(format!("Invalid pre-release identifier '{}': {}", self, e))
        })
    }
}

impl fmt::Display for PrereleaseIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_iteration() {
        let pr = PrereleaseIds::parse("beta.1");
        assert_eq!(
            pr.ids,
            vec![
                Identifier::AlphaNumeric("beta".to_string()),
                Identifier::Numeric(1)
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(PrereleaseIds::parse("").is_empty());
    }

    #[test]
    fn test_bump_from_empty() {
        assert_eq!(PrereleaseIds::default().bump("beta").unwrap().to_string(), "beta.0");
    }

    #[test]
    fn test_bump_same_name() {
        assert_eq!(PrereleaseIds::parse("beta.0").bump("beta").unwrap().to_string(), "beta.1");
        assert_eq!(PrereleaseIds::parse("rc.99").bump("rc").unwrap().to_string(), "rc.100");
    }

    #[test]
    fn test_bump_other_name_restarts() {
        assert_eq!(PrereleaseIds::parse("alpha.3").bump("beta").unwrap().to_string(), "beta.0");
    }

    #[test]
    fn test_bump_name_without_number_restarts() {
        assert_eq!(PrereleaseIds::parse("beta").bump("beta").unwrap().to_string(), "beta.0");
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let max = PrereleaseIds::parse(&format!("beta.{}", u64::MAX));
        assert!(max.bump("beta").is_err());
    }

    #[test]
    fn test_to_semver_rejects_invalid_identifier() {
        assert!(PrereleaseIds::default().bump("not valid!").unwrap().to_semver().is_err());
        assert!(PrereleaseIds::default().bump("rc").unwrap().to_semver().is_ok());
    }
}
