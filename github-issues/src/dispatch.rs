// ABOUTME: Command dispatcher that routes an invocation to its issue workflow
// ABOUTME: Composes the editor bridge and the GitHub client for create, update, read, close and open

use crate::cli::Cli;
use crate::config::{Config, Settings};
use crate::constants::actions;
use crate::editor::{EditorError, TextEditor};
use crate::issue_text::{parse_text, seed_text};
use github_sdk::{CreatedIssue, GithubClient, GithubError, Issue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Make sure to provide an action (create, update, read, close or open)")]
    MissingAction,

    #[error("Unknown action '{0}'. Expected one of: create, update, read, close, open")]
    UnknownAction(String),

    #[error("Missing required argument --{0}")]
    MissingArgument(&'static str),

    #[error("Aborting: the issue title is empty")]
    EmptyTitle,

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Api(#[from] GithubError),
}

impl DispatchError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            DispatchError::MissingAction | DispatchError::UnknownAction(_) => {
                Some("Example: github-issues -action create -owner octocat -repo hello-world")
            }
            DispatchError::MissingArgument(_) => {
                Some("Pass the flag or set default_owner/default_repo in github-issues.toml")
            }
            DispatchError::EmptyTitle => {
                Some("The first line of the edited text becomes the issue title")
            }
            DispatchError::Editor(err) => err.help_text(),
            DispatchError::Api(err) => err.help_text(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Read,
    Close,
    Open,
}

impl Action {
    pub fn needs_issue_number(self) -> bool {
        !matches!(self, Action::Create)
    }
}

impl FromStr for Action {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            actions::CREATE => Ok(Action::Create),
            actions::UPDATE => Ok(Action::Update),
            actions::READ => Ok(Action::Read),
            actions::CLOSE => Ok(Action::Close),
            actions::OPEN => Ok(Action::Open),
            "" => Err(DispatchError::MissingAction),
            other => Err(DispatchError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => actions::CREATE,
            Action::Update => actions::UPDATE,
            Action::Read => actions::READ,
            Action::Close => actions::CLOSE,
            Action::Open => actions::OPEN,
        };
        write!(f, "{}", name)
    }
}

/// One parsed command line, with config defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub action: Action,
    pub owner: String,
    pub repo: String,
    pub issue_number: Option<u64>,
}

impl Invocation {
    pub fn from_cli(cli: &Cli, config: &Config) -> Result<Self, DispatchError> {
        let action: Action = cli
            .action
            .as_deref()
            .map(str::trim)
            .ok_or(DispatchError::MissingAction)?
            .parse()?;

        let owner = first_non_blank(&cli.owner, &config.default_owner)
            .ok_or(DispatchError::MissingArgument("owner"))?;
        let repo = first_non_blank(&cli.repo, &config.default_repo)
            .ok_or(DispatchError::MissingArgument("repo"))?;

        if action.needs_issue_number() && cli.issue_number.is_none() {
            return Err(DispatchError::MissingArgument("issue-number"));
        }

        Ok(Self {
            action,
            owner,
            repo,
            issue_number: cli.issue_number,
        })
    }

    fn number(&self) -> Result<u64, DispatchError> {
        self.issue_number
            .ok_or(DispatchError::MissingArgument("issue-number"))
    }
}

fn first_non_blank(flag: &Option<String>, fallback: &Option<String>) -> Option<String> {
    [flag, fallback]
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// What a workflow did, for reporting
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(CreatedIssue),
    Updated { number: u64, location: Option<String> },
    Closed { number: u64, location: Option<String> },
    Reopened { number: u64, location: Option<String> },
    Read(Box<Issue>),
}

pub struct Dispatcher<'a, E: TextEditor> {
    client: &'a GithubClient,
    editor: &'a E,
}

impl<'a, E: TextEditor> Dispatcher<'a, E> {
    pub fn new(client: &'a GithubClient, editor: &'a E) -> Self {
        Self { client, editor }
    }

    pub async fn execute(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        log::debug!(
            "Running {} on {}/{}",
            invocation.action,
            invocation.owner,
            invocation.repo
        );

        match invocation.action {
            Action::Create => self.create(invocation).await,
            Action::Update => self.update(invocation).await,
            Action::Read => self.read(invocation).await,
            Action::Close => {
                let number = invocation.number()?;
                let updated = self
                    .client
                    .close_issue(&invocation.owner, &invocation.repo, number)
                    .await?;
                Ok(Outcome::Closed {
                    number,
                    location: updated.location,
                })
            }
            Action::Open => {
                let number = invocation.number()?;
                let updated = self
                    .client
                    .open_issue(&invocation.owner, &invocation.repo, number)
                    .await?;
                Ok(Outcome::Reopened {
                    number,
                    location: updated.location,
                })
            }
        }
    }

    async fn create(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        // Blocks this task until the editor exits; no other work is in flight
        let edited = parse_text(&self.editor.edit("")?);
        if !edited.has_title() {
            return Err(DispatchError::EmptyTitle);
        }

        let created = self
            .client
            .create_issue(
                &invocation.owner,
                &invocation.repo,
                &edited.title,
                &edited.body,
            )
            .await?;

        Ok(Outcome::Created(created))
    }

    async fn update(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let number = invocation.number()?;
        let issue = self
            .client
            .get_issue(&invocation.owner, &invocation.repo, number)
            .await?;

        // Blocks this task until the editor exits; no other work is in flight
        let raw = self.editor.edit(&seed_text(&issue.title, &issue.body))?;
        log::debug!("Edited text:\n{}", String::from_utf8_lossy(&raw));

        let edited = parse_text(&raw);
        if !edited.has_title() {
            return Err(DispatchError::EmptyTitle);
        }

        let updated = self
            .client
            .update_issue(
                &invocation.owner,
                &invocation.repo,
                &edited.title,
                &edited.body,
                number,
            )
            .await?;

        Ok(Outcome::Updated {
            number,
            location: updated.location,
        })
    }

    async fn read(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let issue = self
            .client
            .get_issue(&invocation.owner, &invocation.repo, invocation.number()?)
            .await?;

        Ok(Outcome::Read(Box::new(issue)))
    }
}

/// Build the client from settings and run one invocation
///
/// A missing token fails here, before any request is sent.
pub async fn run<E: TextEditor>(
    invocation: &Invocation,
    settings: &Settings,
    editor: &E,
) -> Result<Outcome, DispatchError> {
    let client = settings.client()?;
    Dispatcher::new(&client, editor).execute(invocation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mockito::{Matcher, ServerGuard};
    use serde_json::json;
    use std::cell::RefCell;

    /// Editor double that records seeds and returns canned text
    struct FakeEditor {
        reply: Option<String>,
        seeds: RefCell<Vec<String>>,
    }

    impl FakeEditor {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                seeds: RefCell::new(Vec::new()),
            }
        }

        fn missing() -> Self {
            Self {
                reply: None,
                seeds: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seeds.borrow().len()
        }
    }

    impl TextEditor for FakeEditor {
        fn edit(&self, initial: &str) -> Result<Vec<u8>, EditorError> {
            self.seeds.borrow_mut().push(initial.to_string());
            match &self.reply {
                Some(reply) => Ok(reply.clone().into_bytes()),
                None => Err(EditorError::ToolNotFound {
                    program: "fake".to_string(),
                }),
            }
        }
    }

    fn settings_for(server: &ServerGuard) -> Settings {
        Settings::from_values(
            Some("ghp_test".to_string()),
            None,
            &Config {
                api_url: Some(server.url()),
                ..Default::default()
            },
        )
    }

    fn invocation(action: Action, issue_number: Option<u64>) -> Invocation {
        Invocation {
            action,
            owner: "o".to_string(),
            repo: "r".to_string(),
            issue_number,
        }
    }

    fn issue_json(number: u64, title: &str, body: &str) -> String {
        json!({
            "number": number,
            "title": title,
            "body": body,
            "state": "open",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-16T14:45:00Z"
        })
        .to_string()
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
        assert_eq!("update".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("read".parse::<Action>().unwrap(), Action::Read);
        assert_eq!("close".parse::<Action>().unwrap(), Action::Close);
        assert_eq!("open".parse::<Action>().unwrap(), Action::Open);
        assert!(matches!(
            "reopen".parse::<Action>(),
            Err(DispatchError::UnknownAction(a)) if a == "reopen"
        ));
        assert!(matches!(
            "".parse::<Action>(),
            Err(DispatchError::MissingAction)
        ));
    }

    #[test]
    fn test_action_display_round_trips() {
        for action in [
            Action::Create,
            Action::Update,
            Action::Read,
            Action::Close,
            Action::Open,
        ] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_invocation_from_cli() {
        let cli = Cli::try_parse_from([
            "github-issues",
            "--action",
            "close",
            "--owner",
            "o",
            "--repo",
            "r",
            "--issue-number",
            "5",
        ])
        .unwrap();

        let invocation = Invocation::from_cli(&cli, &Config::default()).unwrap();
        assert_eq!(invocation, invocation_for_close());
    }

    fn invocation_for_close() -> Invocation {
        invocation(Action::Close, Some(5))
    }

    #[test]
    fn test_invocation_requires_action() {
        let cli = Cli::try_parse_from(["github-issues", "--owner", "o", "--repo", "r"]).unwrap();
        assert!(matches!(
            Invocation::from_cli(&cli, &Config::default()),
            Err(DispatchError::MissingAction)
        ));

        let cli = Cli::try_parse_from(["github-issues", "--action", "  "]).unwrap();
        assert!(matches!(
            Invocation::from_cli(&cli, &Config::default()),
            Err(DispatchError::MissingAction)
        ));
    }

    #[test]
    fn test_invocation_requires_owner_repo_and_number() {
        let cli = Cli::try_parse_from(["github-issues", "--action", "create", "--repo", "r"])
            .unwrap();
        assert!(matches!(
            Invocation::from_cli(&cli, &Config::default()),
            Err(DispatchError::MissingArgument("owner"))
        ));

        let cli = Cli::try_parse_from([
            "github-issues",
            "--action",
            "update",
            "--owner",
            "o",
            "--repo",
            "r",
        ])
        .unwrap();
        assert!(matches!(
            Invocation::from_cli(&cli, &Config::default()),
            Err(DispatchError::MissingArgument("issue-number"))
        ));
    }

    #[test]
    fn test_invocation_uses_config_defaults() {
        let config = Config {
            default_owner: Some("cfg-owner".to_string()),
            default_repo: Some("cfg-repo".to_string()),
            ..Default::default()
        };

        let cli = Cli::try_parse_from(["github-issues", "--action", "create"]).unwrap();
        let invocation = Invocation::from_cli(&cli, &config).unwrap();
        assert_eq!(invocation.owner, "cfg-owner");
        assert_eq!(invocation.repo, "cfg-repo");
        assert_eq!(invocation.issue_number, None);

        let cli = Cli::try_parse_from(["github-issues", "--action", "create", "--owner", "flag"])
            .unwrap();
        let invocation = Invocation::from_cli(&cli, &config).unwrap();
        assert_eq!(invocation.owner, "flag");
    }

    #[tokio::test]
    async fn test_close_sends_one_patch_and_skips_editor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/repos/o/r/issues/5")
            .match_body(Matcher::Json(json!({"state": "closed"})))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let editor = FakeEditor::replying("unused");

        let outcome = run(&invocation_for_close(), &settings_for(&server), &editor)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(editor.calls(), 0);
        assert_eq!(
            outcome,
            Outcome::Closed {
                number: 5,
                location: None
            }
        );
    }

    #[tokio::test]
    async fn test_open_sends_state_open_and_skips_editor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/repos/o/r/issues/8")
            .match_body(Matcher::Json(json!({"state": "open"})))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let editor = FakeEditor::replying("unused");

        let outcome = run(
            &invocation(Action::Open, Some(8)),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(editor.calls(), 0);
        assert!(matches!(outcome, Outcome::Reopened { number: 8, .. }));
    }

    #[tokio::test]
    async fn test_create_edits_empty_seed_and_posts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/issues")
            .match_body(Matcher::Json(
                json!({"title": "Crash on save", "body": "Stack trace attached"}),
            ))
            .with_status(201)
            .with_header("location", "https://api.github.com/repos/o/r/issues/77")
            .expect(1)
            .create_async()
            .await;
        let editor = FakeEditor::replying("Crash on save\n\nStack trace attached\n\n");

        let outcome = run(
            &invocation(Action::Create, None),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(*editor.seeds.borrow(), vec![String::new()]);
        assert_eq!(
            outcome,
            Outcome::Created(CreatedIssue {
                location: Some("https://api.github.com/repos/o/r/issues/77".to_string())
            })
        );
    }

    #[tokio::test]
    async fn test_create_with_empty_title_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/issues")
            .expect(0)
            .create_async()
            .await;
        let editor = FakeEditor::replying("\n\nbody without title");

        let err = run(
            &invocation(Action::Create, None),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, DispatchError::EmptyTitle));
    }

    #[tokio::test]
    async fn test_create_reports_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/o/r/issues")
            .with_status(422)
            .create_async()
            .await;
        let editor = FakeEditor::replying("Title");

        let err = run(
            &invocation(Action::Create, None),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to create issue: 422 Unprocessable Entity"
        );
    }

    #[tokio::test]
    async fn test_editor_failure_stops_create() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/issues")
            .expect(0)
            .create_async()
            .await;
        let editor = FakeEditor::missing();

        let err = run(
            &invocation(Action::Create, None),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            DispatchError::Editor(EditorError::ToolNotFound { .. })
        ));
        assert!(err.help_text().is_some());
    }

    #[tokio::test]
    async fn test_update_seeds_editor_with_current_issue() {
        let mut server = mockito::Server::new_async().await;
        let get = server
            .mock("GET", "/repos/o/r/issues/3")
            .with_status(200)
            .with_body(issue_json(3, "Old title", "Old body"))
            .expect(1)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/repos/o/r/issues/3")
            .match_body(Matcher::Json(
                json!({"title": "New title", "body": "New body"}),
            ))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let editor = FakeEditor::replying("New title\n\nNew body\n");

        let outcome = run(
            &invocation(Action::Update, Some(3)),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap();

        get.assert_async().await;
        patch.assert_async().await;
        assert_eq!(
            *editor.seeds.borrow(),
            vec!["Old title\n\nOld body".to_string()]
        );
        assert_eq!(
            outcome,
            Outcome::Updated {
                number: 3,
                location: None
            }
        );
    }

    #[tokio::test]
    async fn test_update_stops_when_fetch_fails() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/repos/o/r/issues/4")
            .with_status(404)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/repos/o/r/issues/4")
            .expect(0)
            .create_async()
            .await;
        let editor = FakeEditor::replying("unused");

        let err = run(
            &invocation(Action::Update, Some(4)),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap_err();

        patch.assert_async().await;
        assert_eq!(editor.calls(), 0);
        assert!(err.to_string().contains("failed to get issue 4"));
    }

    #[tokio::test]
    async fn test_read_returns_issue_without_editor() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/repos/o/r/issues/11")
            .with_status(200)
            .with_body(issue_json(11, "Readable", ""))
            .create_async()
            .await;
        let editor = FakeEditor::replying("unused");

        let outcome = run(
            &invocation(Action::Read, Some(11)),
            &settings_for(&server),
            &editor,
        )
        .await
        .unwrap();

        assert_eq!(editor.calls(), 0);
        match outcome {
            Outcome::Read(issue) => {
                assert_eq!(issue.number, 11);
                assert_eq!(issue.title, "Readable");
            }
            other => panic!("Expected read outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let settings = Settings::from_values(
            None,
            None,
            &Config {
                api_url: Some(server.url()),
                ..Default::default()
            },
        );
        let editor = FakeEditor::replying("unused");

        let err = run(&invocation_for_close(), &settings, &editor)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            DispatchError::Api(GithubError::Configuration(_))
        ));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }
}
