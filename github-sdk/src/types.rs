// ABOUTME: Issue model and request payloads for the GitHub issues API
// ABOUTME: Decodes issue JSON and serializes partial updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

// GitHub sends `"body": null` for issues created without a description
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a PATCH request; unset fields are left untouched on the server
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

impl IssueChanges {
    pub fn content(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            state: None,
        }
    }

    pub fn state(state: IssueState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewIssue<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    /// Canonical API URL of the new issue, from the `Location` header
    pub location: Option<String>,
}

/// Result of a successful PATCH
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedIssue {
    pub location: Option<String>,
}
