use crate::error::{ReleaseError, Result};
use git2::{
    Commit, Cred, CredentialType, ErrorCode, ObjectType, PushOptions, RemoteCallbacks,
    Repository as Git2Repo, Status, StatusOptions,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working directory
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseError::config("Cannot release from a bare repository"))
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn push(&self, remote_name: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseError::remote(format!("No remote named '{}' found", remote_name)))?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(remote_callbacks());

        let refspec_strs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
        remote
            .push(&refspec_strs, Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseError::remote(format!(
                        "Failed to push to '{}': {}",
                        remote_name, e
                    ))
                }
            })
    }
}

/// Credential and push-status callbacks shared by every push.
///
/// Tries SSH keys from `~/.ssh/` in order of preference, then the SSH agent,
/// then the default credential helper.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });

    callbacks.push_update_reference(|refname, status| match status {
        Some(status) => Err(git2::Error::from_str(&format!(
            "Could not update reference {}: {}",
            refname, status
        ))),
        None => Ok(()),
    });

    callbacks
}

impl super::Repository for Git2Repository {
    fn all_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn has_staged_modifications(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.iter().any(|entry| entry.status().intersects(staged)))
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            // A fresh repository has HEAD pointing at a branch with no commits yet
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!(%oid, "created release commit");

        Ok(())
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        let target = self.repo.head()?.peel(ObjectType::Commit)?;

        match message {
            Some(message) => {
                let signature = self.repo.signature()?;
                self.repo.tag(name, &target, &signature, message, false)?;
            }
            None => {
                self.repo.tag_lightweight(name, &target, false)?;
            }
        }
        debug!(tag = name, annotated = message.is_some(), "created tag");

        Ok(())
    }

    fn push_branch(&self, branch: &str, remote: &str) -> Result<()> {
        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        debug!(branch, remote, "pushing branch");
        self.push(remote, &[refspec])
    }

    fn push_all_tags(&self, remote: &str) -> Result<()> {
        let refspecs: Vec<String> = self
            .all_tags()?
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();

        if refspecs.is_empty() {
            return Ok(());
        }

        debug!(remote, count = refspecs.len(), "pushing tags");
        self.push(remote, &refspecs)
    }

    fn stage_files(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        Ok(())
    }
}
