use crate::error::{ReleaseError, Result};
use crate::hooks::lifecycle::{hook_env, HookName};
use crate::hooks::{Hook, HookScope};
use crate::release::ReleaseContext;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Build a platform shell invocation for `command`.
pub fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

/// Executes hook commands from the release config
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a hook command in `cwd` with the given environment variables
    ///
    /// The command runs through the shell with stdout and stderr inherited.
    /// Exit code 0 is success; any other exit code is a [ReleaseError::Hook].
    pub fn execute(command: &str, cwd: &Path, env: &HashMap<String, String>) -> Result<()> {
        if command.trim().is_empty() {
            return Err(ReleaseError::hook("Hook command is empty"));
        }

        let status = shell_command(command)
            .current_dir(cwd)
            .envs(env)
            .status()
            .map_err(|e| ReleaseError::hook(format!("Failed to execute hook `{}`: {}", command, e)))?;

        if !status.success() {
            return Err(ReleaseError::hook(format!(
                "Hook `{}` failed with exit code {}",
                command,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

/// A hook configured as a shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHook {
    pub hook: HookName,
    pub command: String,
}

impl ScriptHook {
    pub fn new(hook: HookName, command: impl Into<String>) -> Self {
        ScriptHook {
            hook,
            command: command.into(),
        }
    }
}

impl Hook for ScriptHook {
    fn run(&mut self, ctx: &mut ReleaseContext, _scope: &mut HookScope<'_>) -> Result<()> {
        info!(hook = %self.hook, command = %self.command, "running hook script");
        let env = hook_env(self.hook, ctx);
        HookExecutor::execute(&self.command, &ctx.project_root, &env)
    }
}
