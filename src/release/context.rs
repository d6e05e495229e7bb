use std::path::PathBuf;

use crate::options::ReleaseOptions;

/// The latest existing tag and the tag about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    /// Absent when no prior tag qualifies under the active strategy
    pub latest: Option<String>,
    /// Never empty
    pub next: String,
}

impl TagPair {
    pub fn new(latest: Option<String>, next: impl Into<String>) -> Self {
        TagPair {
            latest,
            next: next.into(),
        }
    }
}

/// State of a single release run
///
/// Created once tags are resolved and threaded by reference through every
/// phase and hook. Hooks may change `options`; later steps read the
/// changed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseContext {
    pub options: ReleaseOptions,
    pub tags: TagPair,
    pub project_root: PathBuf,
    /// Manifests rewritten by this run, relative to `project_root`
    pub manifests: Vec<PathBuf>,
    /// Message of the release commit, if one was made
    pub commit_message: Option<String>,
    pub pushed: bool,
}

impl ReleaseContext {
    pub fn new(options: ReleaseOptions, tags: TagPair, project_root: PathBuf) -> Self {
        ReleaseContext {
            options,
            tags,
            project_root,
            manifests: Vec::new(),
            commit_message: None,
            pushed: false,
        }
    }

    pub fn committed(&self) -> bool {
        self.commit_message.is_some()
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub tags: TagPair,
    pub manifests: Vec<PathBuf>,
    pub committed: bool,
    pub commit_message: Option<String>,
    pub pushed: bool,
}

impl From<ReleaseContext> for ReleaseSummary {
    fn from(ctx: ReleaseContext) -> Self {
        ReleaseSummary {
            committed: ctx.committed(),
            tags: ctx.tags,
            manifests: ctx.manifests,
            commit_message: ctx.commit_message,
            pushed: ctx.pushed,
        }
    }
}
