//! Release orchestration
//!
//! A run moves through three phases, always in this order:
//!
//! 1. [Release::before_create_tag]: resolve tags, run `init`, check the working tree
//! 2. [Release::create_tag]: rewrite manifests, commit, tag
//! 3. [Release::after_create_tag]: push, run `afterPush`
//!
//! A declined prompt stops the run with [ReleaseError::Aborted]. Nothing
//! already written, committed or tagged is rolled back.

pub mod context;

pub use context::{ReleaseContext, ReleaseSummary, TagPair};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::confirm::ConfirmationGate;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::hooks::{HookName, HookScope, HookSet};
use crate::manifest::ManifestRewriter;
use crate::options::ReleaseOptions;
use crate::strategy::Strategy;
use crate::ui::{Tone, Ui};

/// Prompt shown when the index already holds changes
pub const DIRTY_TREE_MESSAGE: &str =
    "Your working tree contains staged, but uncommitted changes that will be added to the release commit";

/// Drives one release against a repository and a UI
pub struct Release<'a> {
    repo: &'a dyn Repository,
    ui: &'a mut dyn Ui,
    hooks: HookSet,
    strategy: Option<Strategy>,
    project_root: PathBuf,
}

impl<'a> Release<'a> {
    /// A release with no hooks, using the strategy named in the options.
    pub fn new(
        repo: &'a dyn Repository,
        ui: &'a mut dyn Ui,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Release {
            repo,
            ui,
            hooks: HookSet::new(),
            strategy: None,
            project_root: project_root.into(),
        }
    }

    pub fn with_hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    /// Use `strategy` instead of the one named by `options.strategy`.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Run all three phases.
    pub fn run(&mut self, options: ReleaseOptions) -> Result<ReleaseSummary> {
        let mut ctx = self.before_create_tag(options)?;
        self.create_tag(&mut ctx)?;
        self.after_create_tag(&mut ctx)?;

        info!(tag = %ctx.tags.next, pushed = ctx.pushed, "release completed");
        Ok(ReleaseSummary::from(ctx))
    }

    /// Latest and next tag for `options`.
    ///
    /// An explicit `tag` option is used as-is and the strategy is not consulted.
    pub fn resolve_tags(&self, options: &ReleaseOptions) -> Result<TagPair> {
        if let Some(ref tag) = options.tag {
            debug!(tag, "using explicit tag");
            return Ok(TagPair::new(None, tag.clone()));
        }

        let fallback;
        let strategy = match self.strategy {
            Some(ref strategy) => strategy,
            None => {
                fallback = Strategy::from_name(options.strategy);
                &fallback
            }
        };
        let strategy = strategy.as_tag_strategy();

        let tags = self.repo.all_tags()?;
        let latest = strategy.latest_tag(&tags, options)?;
        let next = strategy.next_tag(&tags, options)?;

        if next.trim().is_empty() {
            return Err(ReleaseError::invalid_strategy_result(strategy.name()));
        }

        debug!(strategy = strategy.name(), ?latest, %next, "resolved tags");
        Ok(TagPair::new(latest, next))
    }

    /// First phase. Returns the context the remaining phases work on.
    pub fn before_create_tag(&mut self, options: ReleaseOptions) -> Result<ReleaseContext> {
        let tags = self.resolve_tags(&options)?;
        let mut ctx = ReleaseContext::new(options, tags, self.project_root.clone());

        self.run_hook(HookName::Init, &mut ctx)?;

        if self.repo.has_staged_modifications()? {
            ConfirmationGate::ask(&mut *self.ui, DIRTY_TREE_MESSAGE)?;
        }

        Ok(ctx)
    }

    /// Second phase: manifests, commit and tag.
    pub fn create_tag(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        if let Some(ref latest) = ctx.tags.latest {
            self.ui
                .write_line(Tone::Success, &format!("Latest tag: {}", latest));
        }

        let rewriter = ManifestRewriter::new(&ctx.project_root);
        ctx.manifests =
            rewriter.rewrite_and_stage(&ctx.options.manifest, &ctx.tags.next, self.repo)?;

        self.run_hook(HookName::BeforeCommit, ctx)?;
        self.commit(ctx)?;
        self.run_hook(HookName::AfterCommit, ctx)?;

        let gate = ConfirmationGate::from_options(&ctx.options);
        gate.proceed(&mut *self.ui, &tag_prompt(&ctx.options, &ctx.tags.next))?;

        let annotation = ctx.options.tag_annotation(&ctx.tags.next);
        self.repo.create_tag(&ctx.tags.next, annotation.as_deref())?;
        info!(tag = %ctx.tags.next, annotated = annotation.is_some(), "created tag");
        self.ui.write_line(
            Tone::Success,
            &format!("Successfully created git tag \"{}\" locally.", ctx.tags.next),
        );

        self.run_hook(HookName::AfterCreateTag, ctx)
    }

    /// Third phase: push unless local. `afterPush` runs either way.
    pub fn after_create_tag(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        if ctx.options.local {
            debug!("local release, skipping push");
        } else {
            let branch = self
                .repo
                .current_branch_name()?
                .ok_or(ReleaseError::NoBranchCheckedOut)?;
            let remote = ctx.options.remote.clone();

            self.repo.push_branch(&branch, &remote)?;
            self.repo.push_all_tags(&remote)?;
            ctx.pushed = true;
            info!(%branch, %remote, "pushed branch and tags");
            self.ui.write_line(
                Tone::Success,
                &format!("Successfully pushed changes to {}.", remote),
            );
        }

        self.run_hook(HookName::AfterPush, ctx)
    }

    fn run_hook(&mut self, name: HookName, ctx: &mut ReleaseContext) -> Result<()> {
        let mut scope = HookScope {
            repo: self.repo,
            ui: &mut *self.ui,
        };
        self.hooks.execute(name, ctx, &mut scope)
    }

    fn commit(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        if !self.repo.has_staged_modifications()? {
            debug!("nothing staged, skipping commit");
            return Ok(());
        }

        if self.repo.current_branch_name()?.is_none() {
            return Err(ReleaseError::NoBranchCheckedOut);
        }

        let message = ctx.options.commit_message(&ctx.tags.next);
        self.repo.commit_all(&message)?;
        info!(%message, "created release commit");
        self.ui.write_line(
            Tone::Success,
            &format!("Successfully committed changes \"{}\" locally.", message),
        );
        ctx.commit_message = Some(message);

        Ok(())
    }
}

/// Question asked before the tag is created.
pub fn tag_prompt(options: &ReleaseOptions, next: &str) -> String {
    if options.local {
        format!("About to create tag \"{}\"", next)
    } else {
        format!(
            "About to create tag \"{}\" and push to remote {}",
            next, options.remote
        )
    }
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    Completed(ReleaseSummary),
    /// A prompt was declined
    Aborted,
    Failed(ReleaseError),
}

impl Outcome {
    /// Process exit code: only failures are non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed(_) | Outcome::Aborted => 0,
            Outcome::Failed(_) => 1,
        }
    }
}

impl From<Result<ReleaseSummary>> for Outcome {
    fn from(result: Result<ReleaseSummary>) -> Self {
        match result {
            Ok(summary) => Outcome::Completed(summary),
            Err(e) if e.is_aborted() => Outcome::Aborted,
            Err(e) => Outcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::options::StrategyName;
    use crate::strategy::FnStrategy;
    use crate::ui::MockUi;

    #[test]
    fn test_resolve_explicit_tag_skips_strategy() {
        let repo = MockRepository::new().with_tags(["not-semver"]);
        let mut ui = MockUi::new();
        let release = Release::new(&repo, &mut ui, ".");

        let options = ReleaseOptions {
            tag: Some("custom-tag".to_string()),
            ..Default::default()
        };
        assert_eq!(
            release.resolve_tags(&options).unwrap(),
            TagPair::new(None, "custom-tag")
        );
    }

    #[test]
    fn test_resolve_semver_tags() {
        let repo = MockRepository::new().with_tags(["v0.1.0", "v0.2.0"]);
        let mut ui = MockUi::new();
        let release = Release::new(&repo, &mut ui, ".");

        let tags = release.resolve_tags(&ReleaseOptions::default()).unwrap();
        assert_eq!(tags, TagPair::new(Some("v0.2.0".to_string()), "v0.2.1"));
    }

    #[test]
    fn test_resolve_date_strategy_has_no_latest() {
        let repo = MockRepository::new().with_tags(["v0.1.0"]);
        let mut ui = MockUi::new();
        let release = Release::new(&repo, &mut ui, ".");

        let options = ReleaseOptions {
            strategy: StrategyName::Date,
            ..Default::default()
        };
        let tags = release.resolve_tags(&options).unwrap();
        assert_eq!(tags.latest, None);
        assert!(tags.next.starts_with('v'));
    }

    #[test]
    fn test_resolve_rejects_empty_next_tag() {
        let repo = MockRepository::new();
        let mut ui = MockUi::new();
        let release = Release::new(&repo, &mut ui, ".").with_strategy(Strategy::custom(
            FnStrategy::new(|_: &[String], _: &ReleaseOptions| Ok(String::new())),
        ));

        let err = release.resolve_tags(&ReleaseOptions::default()).unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidStrategyResult { .. }));
    }

    #[test]
    fn test_tag_prompt() {
        let mut options = ReleaseOptions::default();
        assert_eq!(
            tag_prompt(&options, "v1.0.0"),
            "About to create tag \"v1.0.0\" and push to remote origin"
        );
        options.local = true;
        assert_eq!(tag_prompt(&options, "v1.0.0"), "About to create tag \"v1.0.0\"");
    }

    #[test]
    fn test_outcome_from_result() {
        assert!(matches!(Outcome::from(Err(ReleaseError::Aborted)), Outcome::Aborted));

        let failed = Outcome::from(Err(ReleaseError::NoBranchCheckedOut));
        assert_eq!(failed.exit_code(), 1);
        assert_eq!(Outcome::Aborted.exit_code(), 0);
    }
}
