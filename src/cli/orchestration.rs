//! Main workflow orchestration logic
//!
//! Glues the command line, the config file and the release engine together.
//! [run_with] takes its collaborators as arguments so the whole workflow can
//! be driven against a mock repository and UI.

use std::path::Path;

use tracing::debug;

use crate::cli::ReleaseArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::options::ReleaseOptions;
use crate::release::{Outcome, Release, ReleaseSummary};
use crate::ui::{TerminalUi, Tone, Ui};

/// Release the repository containing the current directory.
pub fn run_release(args: &ReleaseArgs) -> Outcome {
    Outcome::from(release_current_dir(args))
}

fn release_current_dir(args: &ReleaseArgs) -> Result<ReleaseSummary> {
    let repo = Git2Repository::open(".")?;
    let project_root = repo.workdir()?;
    let mut ui = TerminalUi::new();

    run_with(args, &repo, &mut ui, &project_root)
}

/// Main release workflow
///
/// 1. Load and validate the config file, reporting warnings through `ui`
/// 2. Layer defaults, config and command-line options
/// 3. Pick the strategy: command line, then config, then the default
/// 4. Run the release
pub fn run_with(
    args: &ReleaseArgs,
    repo: &dyn Repository,
    ui: &mut dyn Ui,
    project_root: &Path,
) -> Result<ReleaseSummary> {
    let report = load_config(args.config.as_deref(), project_root)?;
    for warning in &report.warnings {
        ui.write_line(Tone::Warning, &warning.to_string());
    }

    let mut options = ReleaseOptions::default();
    options.apply(&report.options);
    options.apply(&args.overrides());
    debug!(?options, config = ?report.path, "resolved release options");

    let mut release = Release::new(repo, ui, project_root).with_hooks(report.hooks);
    if args.strategy.is_none() {
        if let Some(strategy) = report.strategy {
            release = release.with_strategy(strategy);
        }
    }

    release.run(options)
}
