// ABOUTME: Centralized constants for the github-issues application
// ABOUTME: Contains environment variable names, editor defaults and config file locations

/// Environment variables read at startup
pub mod env {
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const GIT_EDITOR: &str = "GIT_EDITOR";
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Editor session settings
pub mod editor {
    /// Used when neither GIT_EDITOR nor the config file names an editor
    pub const DEFAULT_EDITOR: &str = "vim";

    pub const TEMP_FILE_PREFIX: &str = "github-issue-edit-";
    pub const TEMP_FILE_SUFFIX: &str = ".md";
}

/// Configuration file names
pub mod config {
    /// Project-local config file, looked up in the working directory
    pub const PROJECT_FILE: &str = "github-issues.toml";

    pub const APP_DIR: &str = "github-issues";
    pub const USER_FILE: &str = "config.toml";
}

/// Accepted values for the action flag
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const READ: &str = "read";
    pub const CLOSE: &str = "close";
    pub const OPEN: &str = "open";
}
