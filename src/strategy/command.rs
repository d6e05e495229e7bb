use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use tracing::debug;

use crate::error::{ReleaseError, Result};
use crate::hooks::shell_command;
use crate::options::{Prerelease, ReleaseOptions};
use crate::strategy::TagStrategy;

/// A strategy configured as shell commands
///
/// Each command runs in the project root with the prior tags in
/// `RELEASE_TAGS` (one per line). Its trimmed stdout is the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStrategy {
    pub next_tag: String,
    pub latest_tag: Option<String>,
    pub project_root: PathBuf,
}

impl CommandStrategy {
    pub fn new(next_tag: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        CommandStrategy {
            next_tag: next_tag.into(),
            latest_tag: None,
            project_root: project_root.into(),
        }
    }

    pub fn with_latest_tag(mut self, command: impl Into<String>) -> Self {
        self.latest_tag = Some(command.into());
        self
    }

    fn env(tags: &[String], options: &ReleaseOptions) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("RELEASE_TAGS".to_string(), tags.join("\n"));

        if options.major {
            env.insert("RELEASE_MAJOR".to_string(), "true".to_string());
        }
        if options.minor {
            env.insert("RELEASE_MINOR".to_string(), "true".to_string());
        }
        if let Some(ref prerelease) = options.prerelease {
            env.insert(
                "RELEASE_PRERELEASE".to_string(),
                match prerelease {
                    Prerelease::Flag => "true".to_string(),
                    Prerelease::Named(name) => name.clone(),
                },
            );
        }

        env
    }

    fn run(&self, command: &str, tags: &[String], options: &ReleaseOptions) -> Result<String> {
        debug!(command, "running strategy command");

        let output = shell_command(command)
            .current_dir(&self.project_root)
            .envs(Self::env(tags, options))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                ReleaseError::strategy(format!("Failed to run strategy `{}`: {}", command, e))
            })?;

        if !output.status.success() {
            return Err(ReleaseError::strategy(format!(
                "Strategy `{}` failed with exit code {}",
                command,
                output.status.code().unwrap_or(-1)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl TagStrategy for CommandStrategy {
    fn name(&self) -> &str {
        "command"
    }

    fn latest_tag(&self, tags: &[String], options: &ReleaseOptions) -> Result<Option<String>> {
        match self.latest_tag {
            Some(ref command) => {
                let latest = self.run(command, tags, options)?;
                Ok(Some(latest).filter(|tag| !tag.is_empty()))
            }
            None => Ok(None),
        }
    }

    /// An empty stdout is returned as-is; the caller rejects it.
    fn next_tag(&self, tags: &[String], options: &ReleaseOptions) -> Result<String> {
        self.run(&self.next_tag, tags, options)
    }
}
