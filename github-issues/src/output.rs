// ABOUTME: This module handles output formatting for github-issues
// ABOUTME: It renders fetched issues as text or JSON and describes workflow results

use crate::dispatch::Outcome;
use anyhow::Result;
use github_sdk::{Issue, IssueState};
use owo_colors::OwoColorize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

pub trait OutputFormat {
    fn format_issue(&self, issue: &Issue) -> Result<String>;
}

pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn format_state(&self, state: IssueState) -> String {
        if !self.use_color {
            return state.to_string();
        }
        match state {
            IssueState::Open => state.to_string().green().to_string(),
            IssueState::Closed => state.to_string().red().to_string(),
        }
    }

    fn format_body(&self, body: &str) -> String {
        if !body.trim().is_empty() {
            body.to_string()
        } else if self.use_color {
            "No description".dimmed().to_string()
        } else {
            "No description".to_string()
        }
    }
}

impl OutputFormat for TextFormatter {
    fn format_issue(&self, issue: &Issue) -> Result<String> {
        let heading = format!("#{} {}", issue.number, issue.title);
        let heading = if self.use_color {
            heading.bold().to_string()
        } else {
            heading
        };

        let mut lines = vec![
            heading,
            format!("State:   {}", self.format_state(issue.state)),
            format!("Created: {}", issue.created_at.format(TIMESTAMP_FORMAT)),
            format!("Updated: {}", issue.updated_at.format(TIMESTAMP_FORMAT)),
        ];
        if let Some(url) = &issue.html_url {
            lines.push(format!("URL:     {}", url));
        }
        lines.push(String::new());
        lines.push(self.format_body(&issue.body));

        Ok(lines.join("\n"))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_issue(&self, issue: &Issue) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(issue)?)
        } else {
            Ok(serde_json::to_string(issue)?)
        }
    }
}

/// Stdout text for a finished workflow
pub fn describe_outcome(outcome: &Outcome, formatter: &dyn OutputFormat) -> Result<String> {
    let text = match outcome {
        Outcome::Created(created) => match &created.location {
            Some(location) => format!("Successfully created issue at: {}", location),
            None => "Successfully created issue".to_string(),
        },
        Outcome::Updated { number, location } => {
            with_location(format!("Updated issue #{}", number), location)
        }
        Outcome::Closed { number, location } => {
            with_location(format!("Closed issue #{}", number), location)
        }
        Outcome::Reopened { number, location } => {
            with_location(format!("Reopened issue #{}", number), location)
        }
        Outcome::Read(issue) => formatter.format_issue(issue)?,
    };
    Ok(text)
}

fn with_location(message: String, location: &Option<String>) -> String {
    match location {
        Some(location) => format!("{}\ncheck issue at: {}", message, location),
        None => message,
    }
}
