// ABOUTME: Builder pattern implementation for GithubClient configuration
// ABOUTME: Validates the token and base URL before any request can be sent

use crate::GithubClient;
use crate::error::GithubError;
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<GithubClient, GithubError>))]
pub struct GithubClientConfig {
    pub auth_token: SecretString,

    /// Overrides reqwest's default when set
    #[builder(default = None)]
    pub timeout: Option<Duration>,

    #[builder(default = None)]
    pub base_url: Option<String>,
}

impl From<GithubClientConfig> for Result<GithubClient, GithubError> {
    fn from(config: GithubClientConfig) -> Self {
        GithubClient::from_config(config)
    }
}

impl GithubClient {
    pub fn builder() -> GithubClientConfigBuilder<((), (), ())> {
        GithubClientConfig::builder()
    }
}

/// Parse an API base URL, dropping any trailing slash
pub fn parse_base_url(raw: &str) -> Result<Url, GithubError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| GithubError::Configuration(format!("Invalid API URL '{}': {}", raw, e)))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(GithubError::Configuration(format!(
            "Invalid API URL '{}': expected an http(s) URL",
            raw
        )));
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn token(value: &str) -> SecretString {
        SecretString::new(value.to_string().into_boxed_str())
    }

    #[test]
    fn test_builder_with_minimal_config() {
        let client_result = GithubClient::builder()
            .auth_token(token("ghp_test"))
            .build();

        assert!(client_result.is_ok());
    }

    #[test]
    fn test_builder_with_all_options() {
        let client_result = GithubClient::builder()
            .auth_token(token("ghp_test"))
            .timeout(Some(Duration::from_secs(60)))
            .base_url(Some("https://api.github.example.com".to_string()))
            .build();

        assert!(client_result.is_ok());
    }

    #[test]
    fn test_builder_rejects_blank_token() {
        for blank in ["", "   ", "\n"] {
            let result = GithubClient::builder().auth_token(token(blank)).build();
            assert!(
                matches!(result, Err(GithubError::Configuration(_))),
                "blank token {:?} should be rejected",
                blank
            );
        }
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = GithubClient::builder()
            .auth_token(token("ghp_test"))
            .base_url(Some("not-a-url".to_string()))
            .build();

        match result {
            Err(GithubError::Configuration(msg)) => assert!(msg.contains("Invalid API URL")),
            _ => panic!("Expected configuration error"),
        }
    }

    #[test]
    fn test_token_is_redacted_in_debug_output() {
        let config = GithubClientConfig {
            auth_token: token("ghp_supersecret"),
            timeout: None,
            base_url: None,
        };

        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("ghp_supersecret"));
    }

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let url = parse_base_url("https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3");

        let url = parse_base_url("https://api.github.com").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("mailto:someone@example.com").is_err());
        assert!(parse_base_url("ftp://example.com").is_err());
    }
}
