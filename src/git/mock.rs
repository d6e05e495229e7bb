use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// A mutating call received by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    StageFiles(Vec<PathBuf>),
    CommitAll(String),
    CreateTag {
        name: String,
        message: Option<String>,
    },
    PushBranch {
        branch: String,
        remote: String,
    },
    PushAllTags(String),
}

/// Mock repository for testing without actual git operations
///
/// Staging a non-empty set of files marks the index dirty and committing
/// cleans it again, so the release workflow sees the same transitions it
/// would see on a real repository.
pub struct MockRepository {
    tags: RefCell<Vec<String>>,
    staged: Cell<bool>,
    branch: Option<String>,
    calls: RefCell<Vec<GitCall>>,
    fail_push: Option<String>,
}

impl MockRepository {
    /// Create a clean repository on `master` with no tags
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(Vec::new()),
            staged: Cell::new(false),
            branch: Some("master".to_string()),
            calls: RefCell::new(Vec::new()),
            fail_push: None,
        }
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.tags.borrow_mut() = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_staged_modifications(self) -> Self {
        self.staged.set(true);
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Simulate a detached HEAD
    pub fn detached(mut self) -> Self {
        self.branch = None;
        self
    }

    /// Make every push fail with the given message
    pub fn failing_push(mut self, message: impl Into<String>) -> Self {
        self.fail_push = Some(message.into());
        self
    }

    /// Mutating calls received so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    /// Tags currently known, including ones created through the trait
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    pub fn commits(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GitCall::CommitAll(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GitCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn all_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn has_staged_modifications(&self) -> Result<bool> {
        Ok(self.staged.get())
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.record(GitCall::CommitAll(message.to_string()));
        self.staged.set(false);
        Ok(())
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        self.record(GitCall::CreateTag {
            name: name.to_string(),
            message: message.map(str::to_string),
        });
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn push_branch(&self, branch: &str, remote: &str) -> Result<()> {
        if let Some(ref message) = self.fail_push {
            return Err(ReleaseError::remote(message.clone()));
        }
        self.record(GitCall::PushBranch {
            branch: branch.to_string(),
            remote: remote.to_string(),
        });
        Ok(())
    }

    fn push_all_tags(&self, remote: &str) -> Result<()> {
        if let Some(ref message) = self.fail_push {
            return Err(ReleaseError::remote(message.clone()));
        }
        self.record(GitCall::PushAllTags(remote.to_string()));
        Ok(())
    }

    fn stage_files(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(GitCall::StageFiles(paths.to_vec()));
        if !paths.is_empty() {
            self.staged.set(true);
        }
        Ok(())
    }
}
