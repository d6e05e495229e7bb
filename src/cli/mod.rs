//! Command-line surface
//!
//! [ReleaseArgs] is parsed by clap and turned into [OptionOverrides], the
//! highest-precedence layer of release options. The workflow itself lives
//! in [orchestration].

pub mod orchestration;

use std::path::PathBuf;

use clap::Parser;

use crate::options::{OptionOverrides, Prerelease, StrategyName};

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "git-release",
    version,
    about = "Commit, tag and push a release of the current git repository"
)]
pub struct ReleaseArgs {
    #[arg(short, long, help = "Keep the release commit and tag local (do not push)")]
    pub local: bool,

    #[arg(short, long, help = "Git remote to push to [default: origin]")]
    pub remote: Option<String>,

    #[arg(short, long, help = "Name of the tag to create, bypassing the strategy")]
    pub tag: Option<String>,

    #[arg(
        short,
        long,
        help = "Create an annotated tag with this message ('%@' is the tag name)"
    )]
    pub annotation: Option<String>,

    #[arg(
        short,
        long,
        help = "Release commit message ('%@' is the tag name) [default: \"Released %@\"]"
    )]
    pub message: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON manifest whose 'version' is updated, may be repeated [default: package.json]"
    )]
    pub manifest: Vec<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    pub yes: bool,

    #[arg(short, long, help = "Tag naming strategy: semver or date [default: semver]")]
    pub strategy: Option<StrategyName>,

    #[arg(short = 'j', long, help = "Increment the major version")]
    pub major: bool,

    #[arg(short = 'i', long, help = "Increment the minor version")]
    pub minor: bool,

    #[arg(
        short = 'e',
        long,
        value_name = "NAME",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Increment the pre-release version, named NAME [default: beta]"
    )]
    pub prerelease: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,
}

impl ReleaseArgs {
    /// Options given on the command line. Absent flags leave the
    /// lower-precedence value in place.
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            local: self.local.then_some(true),
            remote: self.remote.clone(),
            tag: self.tag.clone(),
            annotation: self.annotation.clone(),
            message: self.message.clone(),
            manifest: (!self.manifest.is_empty()).then(|| self.manifest.clone()),
            yes: self.yes.then_some(true),
            strategy: self.strategy,
            major: self.major.then_some(true),
            minor: self.minor.then_some(true),
            prerelease: self.prerelease.as_deref().map(Prerelease::from_arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ReleaseArgs {
        ReleaseArgs::try_parse_from(std::iter::once("git-release").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_args_no_overrides() {
        assert!(parse(&[]).overrides().is_empty());
    }

    #[test]
    fn test_short_flags() {
        let overrides = parse(&["-l", "-y", "-j", "-r", "upstream", "-t", "v2.0.0"]).overrides();

        assert_eq!(overrides.local, Some(true));
        assert_eq!(overrides.yes, Some(true));
        assert_eq!(overrides.major, Some(true));
        assert_eq!(overrides.minor, None);
        assert_eq!(overrides.remote.as_deref(), Some("upstream"));
        assert_eq!(overrides.tag.as_deref(), Some("v2.0.0"));
    }

    #[test]
    fn test_repeated_manifest() {
        let overrides = parse(&["--manifest", "package.json", "--manifest", "bower.json"]).overrides();
        assert_eq!(
            overrides.manifest,
            Some(vec!["package.json".to_string(), "bower.json".to_string()])
        );
    }

    #[test]
    fn test_strategy_parsed() {
        assert_eq!(parse(&["-s", "date"]).strategy, Some(StrategyName::Date));
        assert!(ReleaseArgs::try_parse_from(["git-release", "-s", "calver"]).is_err());
    }

    #[test]
    fn test_prerelease_flag_and_name() {
        assert_eq!(
            parse(&["--prerelease"]).overrides().prerelease,
            Some(Prerelease::Flag)
        );
        assert_eq!(
            parse(&["-e", "rc"]).overrides().prerelease,
            Some(Prerelease::Named("rc".to_string()))
        );
    }
}
