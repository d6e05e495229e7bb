use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_release::cli::orchestration::run_release;
use git_release::cli::ReleaseArgs;
use git_release::release::Outcome;
use git_release::ui;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "git_release=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    let args = ReleaseArgs::parse();
    let outcome = run_release(&args);

    match outcome {
        Outcome::Completed(ref summary) => {
            ui::display_success(&format!("Released {}", summary.tags.next));
        }
        Outcome::Aborted => println!("Aborted."),
        Outcome::Failed(ref e) => ui::display_error(&e.to_string()),
    }

    std::process::exit(outcome.exit_code())
}
