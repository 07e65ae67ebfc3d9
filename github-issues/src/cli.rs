// ABOUTME: CLI argument definitions for the github-issues application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "github-issues")]
#[command(about = "Create, update, close and reopen GitHub issues from your editor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Action to perform: create, update, read, close or open
    #[arg(long)]
    pub action: Option<String>,

    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Issue number (required by update, read, close and open)
    #[arg(
        long = "issue-number",
        visible_alias = "issueNumber",
        alias = "issue",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub issue_number: Option<u64>,

    /// Print the issue as JSON (read only)
    #[arg(long)]
    pub json: bool,

    /// Pretty print JSON output
    #[arg(long, requires = "json")]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short)]
    pub verbose: bool,
}
