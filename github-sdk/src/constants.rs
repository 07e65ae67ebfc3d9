// ABOUTME: Centralized constants for the GitHub SDK
// ABOUTME: Contains API URLs, media types, header values and error hints

/// GitHub API URLs
pub mod urls {
    /// Base URL for the public GitHub REST API
    pub const GITHUB_API_BASE: &str = "https://api.github.com";
}

/// Header values sent with every request
pub mod headers {
    /// Media type GitHub recommends for REST responses
    pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

    /// Media type of request bodies
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Header pinning the REST API version
    pub const API_VERSION_HEADER: &str = "x-github-api-version";

    pub const API_VERSION: &str = "2022-11-28";

    /// GitHub rejects requests without a User-Agent
    pub const USER_AGENT: &str = concat!("github-issues/", env!("CARGO_PKG_VERSION"));
}

/// Error handling constants
pub mod errors {
    /// Name of the environment variable holding the token
    pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

    /// Appended to status errors for HTTP 401
    pub const UNAUTHORIZED_HINT: &str = "Maybe invalid GITHUB_TOKEN";
}
