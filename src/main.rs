use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    lessonbook::logging::init("warn").context("init logging")?;

    let cli = lessonbook::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = lessonbook::config::SiteConfig::from_env().with_overrides(cli.base, cli.chapters);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        lessonbook::cli::Command::Check(args) => {
            lessonbook::commands::check(args, &mut stdout).context("check")?;
        }
        lessonbook::cli::Command::List(args) => {
            lessonbook::commands::list(args, &config, &mut stdout).context("list")?;
        }
        lessonbook::cli::Command::Nav(args) => {
            lessonbook::commands::nav(args, &config, &mut stdout).context("nav")?;
        }
        lessonbook::cli::Command::Chapters(args) => {
            lessonbook::commands::chapters(args, &config, &mut stdout).context("chapters")?;
        }
    }

    Ok(())
}
