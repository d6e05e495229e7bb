//! Domain logic - pure version rules independent of git operations

pub mod prerelease;
pub mod tag;
pub mod version;

pub use prerelease::PrereleaseIds;
pub use tag::{has_prefixed_match, strip_prefix, with_prefix, TAG_PREFIX};
pub use version::{increment, ReleaseType};
