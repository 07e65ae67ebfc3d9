// ABOUTME: Main entry point for the github-issues application
// ABOUTME: Parses arguments, resolves settings once and runs the requested issue workflow

use anyhow::Result;
use clap::Parser;
use github_issues::args::normalize_legacy_flags;
use github_issues::cli::Cli;
use github_issues::cli_output::CliOutput;
use github_issues::config::{Config, Settings};
use github_issues::constants;
use github_issues::dispatch::{self, DispatchError, Invocation};
use github_issues::editor::ExternalEditor;
use github_issues::output::{JsonFormatter, OutputFormat, TextFormatter, describe_outcome};
use std::env;
use std::io::IsTerminal;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_from(normalize_legacy_flags(env::args_os()));

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output = CliOutput::with_color(color_allowed(&cli) && std::io::stderr().is_terminal());

    if let Err(err) = run(&cli).await {
        output.error(&format!("{:#}", err));
        if let Some(help) = err
            .downcast_ref::<DispatchError>()
            .and_then(DispatchError::help_text)
        {
            output.hint(help);
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let invocation = Invocation::from_cli(cli, &config)?;
    let settings = Settings::resolve(&config);
    let editor = ExternalEditor::new(settings.editor.clone());

    let outcome = dispatch::run(&invocation, &settings, &editor).await?;

    let formatter: Box<dyn OutputFormat> = if cli.json {
        Box::new(JsonFormatter::new(cli.pretty))
    } else {
        Box::new(TextFormatter::new(
            color_allowed(cli) && std::io::stdout().is_terminal(),
        ))
    };
    println!("{}", describe_outcome(&outcome, formatter.as_ref())?);

    Ok(())
}

fn color_allowed(cli: &Cli) -> bool {
    !cli.no_color
        && env::var_os(constants::env::NO_COLOR).is_none()
        && env::var("TERM").unwrap_or_default() != "dumb"
}
