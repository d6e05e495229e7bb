use semver::Version;
use tracing::debug;

use crate::domain::{has_prefixed_match, increment, strip_prefix, with_prefix, ReleaseType};
use crate::error::{ReleaseError, Result};
use crate::options::{Prerelease, ReleaseOptions};
use crate::strategy::TagStrategy;

/// Version used for the very first tag of a repository
pub const INITIAL_VERSION: &str = "0.1.0";

/// Semantic-version tags (`v1.2.3` or `1.2.3`)
///
/// Whether tags carry a `v` prefix is inferred on every call from the
/// existing tags, never configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SemverStrategy;

impl SemverStrategy {
    /// Versions parsed from `tags` (one leading `v` stripped), highest first,
    /// paired with their unprefixed text. Tags that are not valid semantic
    /// versions are dropped.
    pub fn sorted_versions(tags: &[String]) -> Vec<(Version, &str)> {
        let mut versions: Vec<(Version, &str)> = tags
            .iter()
            .map(|tag| strip_prefix(tag))
            .filter_map(|text| Version::parse(text).ok().map(|version| (version, text)))
            .collect();

        versions.sort_by(|a, b| b.0.cmp(&a.0));
        versions
    }

    /// Highest version tag, prefixed with `v` if `v<version>` exists among `tags`.
    pub fn latest(tags: &[String]) -> Option<String> {
        Self::sorted_versions(tags)
            .first()
            .map(|(_, text)| with_prefix(text, has_prefixed_match(tags, text)))
    }

    /// Next tag after the latest version, following the options' release axis.
    ///
    /// # Returns
    /// * `Ok("v0.1.0")` - if there are no tags at all
    /// * `Err(NoCompliantTags)` - if there are tags but none is a semantic version
    pub fn next(tags: &[String], options: &ReleaseOptions) -> Result<String> {
        let latest = match Self::latest(tags) {
            Some(latest) => latest,
            None if tags.is_empty() => return Ok(with_prefix(INITIAL_VERSION, true)),
            None => return Err(ReleaseError::NoCompliantTags),
        };

        let latest_text = strip_prefix(&latest);
        let version = Version::parse(latest_text).map_err(|e| {
            ReleaseError::strategy(format!("Cannot parse latest tag '{}': {}", latest, e))
        })?;

        let release_type = ReleaseType::select(
            options.major,
            options.minor,
            options.prerelease.as_ref().map(Prerelease::identifier),
        );
        let next = increment(&version, &release_type)?;
        debug!(%latest, %next, %release_type, "computed next semver tag");

        Ok(with_prefix(
            &next.to_string(),
            has_prefixed_match(tags, latest_text),
        ))
    }
}

impl TagStrategy for SemverStrategy {
    fn name(&self) -> &str {
        "semver"
    }

    fn latest_tag(&self, tags: &[String], _options: &ReleaseOptions) -> Result<Option<String>> {
        Ok(Self::latest(tags))
    }

    fn next_tag(&self, tags: &[String], options: &ReleaseOptions) -> Result<String> {
        Self::next(tags, options)
    }
}
