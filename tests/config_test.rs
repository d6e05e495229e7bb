// tests/config_test.rs
use std::fs;
use std::io::Write;
use std::path::Path;

use git_release::cli::orchestration::run_with;
use git_release::cli::ReleaseArgs;
use git_release::config::{load_config, ConfigWarning, CONFIG_FILE, PROJECT_CONFIG_DIR};
use git_release::git::{GitCall, MockRepository};
use git_release::hooks::HookName;
use git_release::options::StrategyName;
use git_release::ui::MockUi;
use serial_test::serial;
use tempfile::NamedTempFile;

fn write_project_config(root: &Path, content: &str) {
    let dir = root.join(PROJECT_CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(CONFIG_FILE), content).unwrap();
}

#[test]
fn test_load_from_explicit_file() {
    let project = tempfile::tempdir().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
message = "chore(release): %@"
strategy = "date"
afterPush = "echo published"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let report = load_config(Some(temp_file.path()), project.path()).unwrap();

    assert_eq!(report.path.as_deref(), Some(temp_file.path()));
    assert_eq!(report.options.remote.as_deref(), Some("upstream"));
    assert_eq!(report.options.message.as_deref(), Some("chore(release): %@"));
    assert_eq!(report.options.strategy, Some(StrategyName::Date));
    assert_eq!(report.hooks.names(), vec![HookName::AfterPush]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(project.path(), "remote = ");

    assert!(load_config(None, project.path()).is_err());
}

#[test]
fn test_project_config_warnings_reported() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(project.path(), "yes = true\nbogus = 1\nlocal = true");

    let report = load_config(None, project.path()).unwrap();

    assert_eq!(report.options.local, Some(true));
    assert_eq!(report.options.yes, None);
    assert_eq!(
        report.warnings,
        vec![
            ConfigWarning::UnknownOption {
                option: "bogus".to_string()
            },
            ConfigWarning::NotAllowedInConfig {
                option: "yes".to_string()
            },
        ]
    );
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_dir_fallback() {
    let project = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    let user_dir = home.path().join("git-release");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join(CONFIG_FILE), "remote = \"fork\"").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", home.path());
    let report = load_config(None, project.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let report = report.unwrap();
    assert_eq!(report.options.remote.as_deref(), Some("fork"));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_project_config_wins_over_user_config() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(project.path(), "remote = \"project\"");

    let home = tempfile::tempdir().unwrap();
    let user_dir = home.path().join("git-release");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join(CONFIG_FILE), "remote = \"user\"").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", home.path());
    let report = load_config(None, project.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(report.unwrap().options.remote.as_deref(), Some("project"));
}

// ============================================================================
// Workflow with config
// ============================================================================

#[test]
#[serial]
fn test_run_with_layers_config_under_arguments() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(
        project.path(),
        "remote = \"upstream\"\nmessage = \"Ship %@\"\ntag = \"v9.9.9\"",
    );
    fs::write(project.path().join("package.json"), r#"{"version":"0.0.0"}"#).unwrap();

    let repo = MockRepository::new().with_tags(["v1.0.0"]);
    let mut ui = MockUi::new();
    let args = ReleaseArgs {
        remote: Some("fork".to_string()),
        minor: true,
        yes: true,
        ..Default::default()
    };

    let summary = run_with(&args, &repo, &mut ui, project.path()).unwrap();

    assert_eq!(summary.tags.next, "v1.1.0");
    assert_eq!(repo.commits(), vec!["Ship v1.1.0".to_string()]);
    assert!(repo
        .calls()
        .contains(&GitCall::PushAllTags("fork".to_string())));
    assert!(ui.messages[0].contains("tag"));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_config_hook_script_runs_in_project_root() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(
        project.path(),
        "local = true\nafterPush = \"printf '%s' \\\"$RELEASE_TAG_NEXT\\\" > released.txt\"",
    );

    let repo = MockRepository::new();
    let mut ui = MockUi::new();
    let args = ReleaseArgs {
        yes: true,
        ..Default::default()
    };

    let summary = run_with(&args, &repo, &mut ui, project.path()).unwrap();

    assert!(!summary.pushed);
    let written = fs::read_to_string(project.path().join("released.txt")).unwrap();
    assert_eq!(written, "v0.1.0");
}

#[cfg(unix)]
#[test]
#[serial]
fn test_config_command_strategy() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(
        project.path(),
        r#"
local = true

[strategy]
next_tag = "echo nightly-$(echo \"$RELEASE_TAGS\" | grep -c nightly)"
"#,
    );

    let repo = MockRepository::new().with_tags(["nightly-a"]);
    let mut ui = MockUi::new();
    let args = ReleaseArgs {
        yes: true,
        ..Default::default()
    };

    let summary = run_with(&args, &repo, &mut ui, project.path()).unwrap();
    assert_eq!(summary.tags.next, "nightly-1");
}

#[cfg(unix)]
#[test]
#[serial]
fn test_argument_strategy_overrides_config_command() {
    let project = tempfile::tempdir().unwrap();
    write_project_config(
        project.path(),
        "local = true\n[strategy]\nnext_tag = \"echo from-config\"",
    );

    let repo = MockRepository::new().with_tags(["v2.0.0"]);
    let mut ui = MockUi::new();
    let args = ReleaseArgs {
        yes: true,
        strategy: Some(StrategyName::Semver),
        ..Default::default()
    };

    let summary = run_with(&args, &repo, &mut ui, project.path()).unwrap();
    assert_eq!(summary.tags.next, "v2.0.1");
}
