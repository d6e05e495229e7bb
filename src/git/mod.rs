//! Git operations abstraction layer
//!
//! The release workflow only needs a narrow slice of a version-control
//! client. That slice is the [Repository] trait, with two implementations:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation that records calls for tests
//!
//! Code driving a release should depend on the trait rather than a concrete type.
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example(repo: &dyn Repository) -> git_release::Result<()> {
//! let tags = repo.all_tags()?;
//! if repo.has_staged_modifications()? {
//!     repo.commit_all("Released v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::PathBuf;

/// Version-control operations used by the release workflow
///
/// Every call runs to completion before returning; the workflow never issues
/// two calls at once. Implementations map their underlying errors (like
/// `git2::Error`) to [crate::error::ReleaseError] variants.
pub trait Repository {
    /// All tag names in the repository, in no particular order.
    fn all_tags(&self) -> Result<Vec<String>>;

    /// Whether the index differs from HEAD (new, modified, deleted, renamed
    /// or type-changed entries). Untracked and unstaged files do not count.
    fn has_staged_modifications(&self) -> Result<bool>;

    /// Short name of the checked-out branch, or `None` on a detached HEAD.
    fn current_branch_name(&self) -> Result<Option<String>>;

    /// Commit the current index on top of HEAD.
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Tag HEAD. A `message` creates an annotated tag, otherwise the tag is lightweight.
    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()>;

    /// Push `branch` to the same-named branch on `remote`.
    fn push_branch(&self, branch: &str, remote: &str) -> Result<()>;

    /// Push every local tag to `remote`.
    fn push_all_tags(&self, remote: &str) -> Result<()>;

    /// Add files (relative to the working directory) to the index.
    fn stage_files(&self, paths: &[PathBuf]) -> Result<()>;
}
