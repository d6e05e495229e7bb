use crate::domain::prerelease::PrereleaseIds;
use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Kind of increment to apply to a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    PreMajor(String),
    PreMinor(String),
    PreRelease(String),
}

impl ReleaseType {
    /// Pick the release axis in priority order `major` > `minor` > patch.
    ///
    /// A pre-release identifier converts the axis to its pre-release
    /// counterpart: major -> premajor, minor -> preminor, patch -> prerelease.
    pub fn select(major: bool, minor: bool, prerelease: Option<&str>) -> Self {
        match (major, minor, prerelease) {
            (true, _, None) => ReleaseType::Major,
            (true, _, Some(id)) => ReleaseType::PreMajor(id.to_string()),
            (false, true, None) => ReleaseType::Minor,
            (false, true, Some(id)) => ReleaseType::PreMinor(id.to_string()),
            (false, false, None) => ReleaseType::Patch,
            (false, false, Some(id)) => ReleaseType::PreRelease(id.to_string()),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseType::Major => write!(f, "major"),
            ReleaseType::Minor => write!(f, "minor"),
            ReleaseType::Patch => write!(f, "patch"),
            ReleaseType::PreMajor(id) => write!(f, "premajor ({})", id),
            ReleaseType::PreMinor(id) => write!(f, "preminor ({})", id),
            ReleaseType::PreRelease(id) => write!(f, "prerelease ({})", id),
        }
    }
}

/// Increment a version following the usual semantic-version rules.
///
/// - **Major**: `1.2.3` -> `2.0.0`; a pre-release of a major (`2.0.0-beta.1`) is released as `2.0.0`
/// - **Minor**: `1.2.3` -> `1.3.0`; `1.3.0-beta.1` -> `1.3.0`
/// - **Patch**: `1.2.3` -> `1.2.4`; `1.2.4-beta.1` -> `1.2.4`
/// - **PreMajor/PreMinor**: bump the axis, then start `<id>.0`
/// - **PreRelease**: bump the pre-release counter, or patch + `<id>.0` on a plain release
///
/// Build metadata is always dropped.
pub fn increment(version: &Version, release_type: &ReleaseType) -> Result<Version> {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;
    let is_pre = !version.pre.is_empty();

    match release_type {
        ReleaseType::Major => {
            if version.minor != 0 || version.patch != 0 || !is_pre {
                next.major = bump_component(version.major, "major")?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Minor => {
            if version.patch != 0 || !is_pre {
                next.minor = bump_component(version.minor, "minor")?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Patch => {
            if !is_pre {
                next.patch = bump_component(version.patch, "patch")?;
            }
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::PreMajor(id) => {
            next.major = bump_component(version.major, "major")?;
            next.minor = 0;
            next.patch = 0;
            next.pre = PrereleaseIds::default().bump(id)?.to_semver()?;
        }
        ReleaseType::PreMinor(id) => {
            next.minor = bump_component(version.minor, "minor")?;
            next.patch = 0;
            next.pre = PrereleaseIds::default().bump(id)?.to_semver()?;
        }
        ReleaseType::PreRelease(id) => {
            if !is_pre {
                next.patch = bump_component(version.patch, "patch")?;
            }
            next.pre = PrereleaseIds::from_semver(&version.pre)
                .bump(id)?
                .to_semver()?;
        }
    }

    Ok(next)
}

fn bump_component(value: u64, component: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        ReleaseError::strategy(format!("Cannot increment {} version {}", component, value))
    })
}
