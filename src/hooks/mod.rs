//! Hooks for extending a release
//!
//! A hook runs at one of five fixed points of the release:
//! - init: After tags are resolved
//! - beforeCommit: After manifests are rewritten
//! - afterCommit: After the commit step
//! - afterCreateTag: After the tag is created locally
//! - afterPush: At the end of the run
//!
//! Hooks are closures registered by library callers, or shell commands
//! loaded from the release config.

pub mod executor;
pub mod lifecycle;

pub use executor::{shell_command, HookExecutor, ScriptHook};
pub use lifecycle::{hook_env, HookName};

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::git::Repository;
use crate::release::ReleaseContext;
use crate::ui::Ui;

/// Collaborators of the run a hook may use
pub struct HookScope<'s> {
    pub repo: &'s dyn Repository,
    pub ui: &'s mut dyn Ui,
}

/// Host-supplied code run at a lifecycle point
///
/// Hooks receive the run's context mutably and may adjust it, e.g. change
/// the commit message before the commit is made.
pub trait Hook {
    fn run(&mut self, ctx: &mut ReleaseContext, scope: &mut HookScope<'_>) -> Result<()>;
}

impl<F> Hook for F
where
    F: FnMut(&mut ReleaseContext, &mut HookScope<'_>) -> Result<()>,
{
    fn run(&mut self, ctx: &mut ReleaseContext, scope: &mut HookScope<'_>) -> Result<()> {
        self(ctx, scope)
    }
}

/// At most one hook per [HookName]
#[derive(Default)]
pub struct HookSet {
    hooks: BTreeMap<HookName, Box<dyn Hook>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure, replacing any hook already bound to `name`
    pub fn on<F>(&mut self, name: HookName, hook: F) -> &mut Self
    where
        F: FnMut(&mut ReleaseContext, &mut HookScope<'_>) -> Result<()> + 'static,
    {
        self.insert(name, Box::new(hook));
        self
    }

    pub fn insert(&mut self, name: HookName, hook: Box<dyn Hook>) {
        self.hooks.insert(name, hook);
    }

    /// Bound hook names in firing order
    pub fn names(&self) -> Vec<HookName> {
        self.hooks.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the hook bound to `name`, if any
    pub fn execute(
        &mut self,
        name: HookName,
        ctx: &mut ReleaseContext,
        scope: &mut HookScope<'_>,
    ) -> Result<()> {
        match self.hooks.get_mut(&name) {
            Some(hook) => {
                debug!(hook = %name, "executing hook");
                hook.run(ctx, scope)
            }
            None => Ok(()),
        }
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::options::ReleaseOptions;
    use crate::release::TagPair;
    use crate::ui::{MockUi, Tone};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn context() -> ReleaseContext {
        ReleaseContext::new(
            ReleaseOptions::default(),
            TagPair::new(None, "v0.1.0"),
            PathBuf::from("."),
        )
    }

    fn execute(hooks: &mut HookSet, name: HookName, ctx: &mut ReleaseContext) -> Result<()> {
        let repo = MockRepository::new();
        let mut ui = MockUi::new();
        let mut scope = HookScope {
            repo: &repo,
            ui: &mut ui,
        };
        hooks.execute(name, ctx, &mut scope)
    }

    #[test]
    fn test_execute_missing_hook_is_noop() {
        let mut hooks = HookSet::new();
        assert!(execute(&mut hooks, HookName::Init, &mut context()).is_ok());
    }

    #[test]
    fn test_execute_bound_hook() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let mut hooks = HookSet::new();
        hooks.on(
            HookName::BeforeCommit,
            move |ctx: &mut ReleaseContext, _: &mut HookScope<'_>| {
                log.borrow_mut().push(ctx.tags.next.clone());
                Ok(())
            },
        );

        execute(&mut hooks, HookName::BeforeCommit, &mut context()).unwrap();
        execute(&mut hooks, HookName::AfterCommit, &mut context()).unwrap();

        assert_eq!(*seen.borrow(), vec!["v0.1.0".to_string()]);
    }

    #[test]
    fn test_hook_can_mutate_context() {
        let mut hooks = HookSet::new();
        hooks.on(HookName::Init, |ctx: &mut ReleaseContext, _: &mut HookScope<'_>| {
            ctx.options.message = "Ship %@".to_string();
            Ok(())
        });

        let mut ctx = context();
        execute(&mut hooks, HookName::Init, &mut ctx).unwrap();
        assert_eq!(ctx.options.message, "Ship %@");
    }

    #[test]
    fn test_hook_uses_scope() {
        let repo = MockRepository::new().with_tags(["v0.0.1"]);
        let mut ui = MockUi::new();

        let mut hooks = HookSet::new();
        hooks.on(HookName::Init, |_: &mut ReleaseContext, scope: &mut HookScope<'_>| {
            let count = scope.repo.all_tags()?.len();
            scope.ui.write_line(Tone::Success, &format!("{} tags", count));
            Ok(())
        });

        let mut scope = HookScope {
            repo: &repo,
            ui: &mut ui,
        };
        hooks
            .execute(HookName::Init, &mut context(), &mut scope)
            .unwrap();

        assert_eq!(ui.messages, vec!["1 tags".to_string()]);
    }

    #[test]
    fn test_names_in_firing_order() {
        let mut hooks = HookSet::new();
        hooks
            .on(HookName::AfterPush, |_: &mut ReleaseContext, _: &mut HookScope<'_>| Ok(()))
            .on(HookName::Init, |_: &mut ReleaseContext, _: &mut HookScope<'_>| Ok(()));

        assert_eq!(hooks.names(), vec![HookName::Init, HookName::AfterPush]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut hooks = HookSet::new();
        hooks.insert(HookName::Init, Box::new(ScriptHook::new(HookName::Init, "false")));
        hooks.on(HookName::Init, |_: &mut ReleaseContext, _: &mut HookScope<'_>| Ok(()));

        assert_eq!(hooks.names(), vec![HookName::Init]);
        assert!(execute(&mut hooks, HookName::Init, &mut context()).is_ok());
    }
}
