// ABOUTME: Test helper utilities for mocking GitHub API responses and server
// ABOUTME: Provides mockito-based helpers for unit testing API interactions

use mockito::{Server, ServerGuard};
use serde_json::json;

pub const TEST_TOKEN: &str = "ghp_test_token";

pub async fn mock_github_server() -> ServerGuard {
    Server::new_async().await
}

pub fn mock_issue_response(number: u64) -> serde_json::Value {
    json!({
        "url": format!("https://api.github.com/repos/o/r/issues/{}", number),
        "html_url": format!("https://github.com/o/r/issues/{}", number),
        "id": 1000 + number,
        "number": number,
        "title": "Fix login race condition",
        "body": "Users see a race when logging in from two devices.",
        "state": "open",
        "locked": false,
        "comments": 0,
        "user": {
            "login": "octocat",
            "id": 1
        },
        "labels": [],
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-01-16T14:45:00Z",
        "closed_at": null
    })
}

pub fn mock_error_response(message: &str) -> serde_json::Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}
