use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ReleaseError, Result};
use crate::release::ReleaseContext;

/// The fixed points in a release where hooks run, in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookName {
    /// After tags are resolved, before anything is touched
    Init,
    /// After manifests are rewritten and staged, before the commit
    BeforeCommit,
    /// After the commit step, whether or not a commit was made
    AfterCommit,
    /// After the tag is created locally
    AfterCreateTag,
    /// End of the run, whether or not anything was pushed
    AfterPush,
}

impl HookName {
    pub const ALL: [HookName; 5] = [
        HookName::Init,
        HookName::BeforeCommit,
        HookName::AfterCommit,
        HookName::AfterCreateTag,
        HookName::AfterPush,
    ];

    /// Get the hook name as it appears in configuration
    pub fn name(&self) -> &'static str {
        match self {
            HookName::Init => "init",
            HookName::BeforeCommit => "beforeCommit",
            HookName::AfterCommit => "afterCommit",
            HookName::AfterCreateTag => "afterCreateTag",
            HookName::AfterPush => "afterPush",
        }
    }
}

impl FromStr for HookName {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        HookName::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| ReleaseError::hook(format!("Unknown hook '{}'", s)))
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Environment variables describing the run to a hook script
///
/// Maps context fields to RELEASE_* environment variables
pub fn hook_env(hook: HookName, ctx: &ReleaseContext) -> HashMap<String, String> {
    let mut env = HashMap::new();

    env.insert("RELEASE_HOOK".to_string(), hook.name().to_string());
    env.insert("RELEASE_TAG_NEXT".to_string(), ctx.tags.next.clone());
    env.insert("RELEASE_REMOTE".to_string(), ctx.options.remote.clone());
    env.insert("RELEASE_LOCAL".to_string(), ctx.options.local.to_string());
    env.insert(
        "RELEASE_PROJECT_ROOT".to_string(),
        ctx.project_root.display().to_string(),
    );

    if let Some(ref latest) = ctx.tags.latest {
        env.insert("RELEASE_TAG_LATEST".to_string(), latest.clone());
    }

    env
}
