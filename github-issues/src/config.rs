// ABOUTME: Configuration file loading and runtime settings resolution for github-issues
// ABOUTME: Merges TOML config files, then combines them with environment variables once at startup

use crate::constants;
use anyhow::{Context, Result};
use github_sdk::{GithubClient, GithubError};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    /// API base URL, e.g. `https://ghe.example.com/api/v3`
    #[serde(default, deserialize_with = "validate_api_url")]
    pub api_url: Option<String>,
    #[serde(default)]
    pub default_owner: Option<String>,
    #[serde(default)]
    pub default_repo: Option<String>,
    /// Editor used when GIT_EDITOR is unset
    #[serde(default)]
    pub editor: Option<String>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from file paths, later paths overriding earlier ones
    ///
    /// Missing files are skipped; files that exist but fail to parse are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })
    }

    /// Standard config file paths in order of increasing precedence
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(constants::config::APP_DIR)
                    .join(constants::config::USER_FILE),
            );
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(constants::config::APP_DIR)
                    .join(constants::config::USER_FILE),
            );
        }

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(constants::config::PROJECT_FILE));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_url: other.api_url.or(self.api_url),
            default_owner: other.default_owner.or(self.default_owner),
            default_repo: other.default_repo.or(self.default_repo),
            editor: other.editor.or(self.editor),
        }
    }
}

fn validate_api_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<String>::deserialize(deserializer)?;
    if let Some(ref url) = value {
        github_sdk::builder::parse_base_url(url).map_err(D::Error::custom)?;
    }
    Ok(value)
}

/// Everything the commands read from the environment, resolved once
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: Option<SecretString>,
    pub editor: String,
    pub api_url: Option<String>,
}

impl Settings {
    /// Resolve settings from the process environment and loaded config
    pub fn resolve(config: &Config) -> Self {
        Self::from_values(
            std::env::var(constants::env::GITHUB_TOKEN).ok(),
            std::env::var(constants::env::GIT_EDITOR).ok(),
            config,
        )
    }

    pub fn from_values(token: Option<String>, git_editor: Option<String>, config: &Config) -> Self {
        let token = non_blank(token).map(|t| SecretString::new(t.into_boxed_str()));

        let editor = non_blank(git_editor)
            .or_else(|| non_blank(config.editor.clone()))
            .unwrap_or_else(|| constants::editor::DEFAULT_EDITOR.to_string());

        Self {
            token,
            editor,
            api_url: config.api_url.clone(),
        }
    }

    /// The token, or a configuration error when it is missing or blank
    pub fn require_token(&self) -> Result<SecretString, GithubError> {
        self.token.clone().ok_or_else(GithubError::missing_token)
    }

    /// Build the API client; fails before any request when the token is absent
    pub fn client(&self) -> Result<GithubClient, GithubError> {
        GithubClient::builder()
            .auth_token(self.require_token()?)
            .base_url(self.api_url.clone())
            .build()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
