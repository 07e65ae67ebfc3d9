// ABOUTME: GitHub SDK library providing a typed REST client for repository issues
// ABOUTME: Includes authentication headers, issue operations and status mapping

pub mod builder;
pub mod constants;
pub mod error;
pub mod types;

#[cfg(test)]
mod test_helpers;

use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, LOCATION, USER_AGENT,
};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use url::Url;

pub use builder::GithubClientConfig;
pub use error::GithubError;
pub use types::{CreatedIssue, Issue, IssueChanges, IssueState, UpdatedIssue};

use crate::constants::{headers, urls};
use crate::types::NewIssue;

pub type Result<T> = std::result::Result<T, GithubError>;

pub struct GithubClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GithubClient {
    pub(crate) fn from_config(config: GithubClientConfig) -> Result<Self> {
        let token = config.auth_token.expose_secret().trim();
        if token.is_empty() {
            return Err(GithubError::missing_token());
        }

        let base_url =
            builder::parse_base_url(config.base_url.as_deref().unwrap_or(urls::GITHUB_API_BASE))?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            GithubError::Configuration(
                "GITHUB_TOKEN contains characters that are not valid in an HTTP header".to_string(),
            )
        })?;
        authorization.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, authorization);
        default_headers.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT_GITHUB_JSON));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(headers::CONTENT_TYPE_JSON));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(headers::USER_AGENT));
        default_headers.insert(
            HeaderName::from_static(headers::API_VERSION_HEADER),
            HeaderValue::from_static(headers::API_VERSION),
        );

        let mut http = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            http = http.timeout(timeout);
        }
        let client = http.build().map_err(|e| {
            GithubError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    /// Create an issue; only HTTP 201 counts as success
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatedIssue> {
        let url = self.issues_url(owner, repo, None)?;
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&NewIssue { title, body })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(GithubError::Status {
                action: "failed to create issue".to_string(),
                status,
            });
        }

        Ok(CreatedIssue {
            location: location_header(&response),
        })
    }

    pub async fn get_issue(&self, owner: &str, repo: &str, issue_number: u64) -> Result<Issue> {
        let url = self.issues_url(owner, repo, Some(issue_number))?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GithubError::Status {
                action: format!("failed to get issue {}", issue_number),
                status,
            });
        }

        let text = response.text().await?;
        let issue: Issue = serde_json::from_str(&text)?;
        Ok(issue)
    }

    pub async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        issue_number: u64,
    ) -> Result<UpdatedIssue> {
        self.patch_issue(owner, repo, issue_number, &IssueChanges::content(title, body))
            .await
    }

    pub async fn close_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<UpdatedIssue> {
        self.patch_issue(owner, repo, issue_number, &IssueChanges::state(IssueState::Closed))
            .await
    }

    pub async fn open_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<UpdatedIssue> {
        self.patch_issue(owner, repo, issue_number, &IssueChanges::state(IssueState::Open))
            .await
    }

    /// Send a partial update; only HTTP 200 counts as success
    pub async fn patch_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        changes: &IssueChanges,
    ) -> Result<UpdatedIssue> {
        let url = self.issues_url(owner, repo, Some(issue_number))?;
        log::debug!("PATCH {}", url);

        let response = self.client.patch(url).json(changes).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GithubError::Status {
                action: format!("failed for issue {}", issue_number),
                status,
            });
        }

        Ok(UpdatedIssue {
            location: location_header(&response),
        })
    }

    fn issues_url(&self, owner: &str, repo: &str, issue_number: Option<u64>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GithubError::Configuration(format!("Invalid API URL '{}'", self.base_url))
            })?;
            segments.pop_if_empty().extend(["repos", owner, repo, "issues"]);
            if let Some(number) = issue_number {
                segments.push(&number.to_string());
            }
        }
        Ok(url)
    }
}

fn location_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
