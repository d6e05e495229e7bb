//! Tag naming strategies
//!
//! A strategy maps the repository's existing tags (plus the release options)
//! to the name of the next tag, and optionally to the latest existing one.
//!
//! - [SemverStrategy]: increments the highest semantic version (`v1.2.3` -> `v1.2.4`)
//! - [DateStrategy]: names tags after the current UTC date (`v19.10.10`, `v19.10.10.1`)
//! - [CommandStrategy]: delegates to shell commands from the release config
//! - [FnStrategy]: delegates to a closure supplied by a library caller

pub mod command;
pub mod date;
pub mod semantic;

pub use command::CommandStrategy;
pub use date::{Clock, DateStrategy, FixedClock, SystemClock};
pub use semantic::SemverStrategy;

use std::fmt;

use crate::error::Result;
use crate::options::{ReleaseOptions, StrategyName};

/// Computes tag names from prior tags
pub trait TagStrategy {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// The latest existing tag under this strategy, if the strategy has that notion
    fn latest_tag(&self, _tags: &[String], _options: &ReleaseOptions) -> Result<Option<String>> {
        Ok(None)
    }

    /// The name of the tag to create next
    fn next_tag(&self, tags: &[String], options: &ReleaseOptions) -> Result<String>;
}

/// The strategy selected for a run
pub enum Strategy {
    Semver(SemverStrategy),
    Date(DateStrategy),
    Custom(Box<dyn TagStrategy>),
}

impl Strategy {
    pub fn from_name(name: StrategyName) -> Self {
        match name {
            StrategyName::Semver => Strategy::Semver(SemverStrategy),
            StrategyName::Date => Strategy::Date(DateStrategy::new()),
        }
    }

    pub fn custom(strategy: impl TagStrategy + 'static) -> Self {
        Strategy::Custom(Box::new(strategy))
    }

    pub fn as_tag_strategy(&self) -> &dyn TagStrategy {
        match self {
            Strategy::Semver(strategy) => strategy,
            Strategy::Date(strategy) => strategy,
            Strategy::Custom(strategy) => strategy.as_ref(),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Semver(_) => f.write_str("Strategy::Semver"),
            Strategy::Date(_) => f.write_str("Strategy::Date"),
            Strategy::Custom(strategy) => write!(f, "Strategy::Custom({})", strategy.name()),
        }
    }
}

/// A strategy backed by a closure computing the next tag
pub struct FnStrategy<F> {
    next: F,
}

impl<F> FnStrategy<F>
where
    F: Fn(&[String], &ReleaseOptions) -> Result<String>,
{
    pub fn new(next: F) -> Self {
        FnStrategy { next }
    }
}

impl<F> TagStrategy for FnStrategy<F>
where
    F: Fn(&[String], &ReleaseOptions) -> Result<String>,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn next_tag(&self, tags: &[String], options: &ReleaseOptions) -> Result<String> {
        (self.next)(tags, options)
    }
}
