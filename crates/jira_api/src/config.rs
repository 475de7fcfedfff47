//! Client configuration for the Jira REST API.

use std::time::Duration;

pub const DEFAULT_API_PREFIX: &str = "rest/api/2";
pub const DEFAULT_USER_AGENT: &str = "jqr-tauri";
pub const DEFAULT_COOLDOWN_MS: u64 = 250;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for a Jira Cloud site, authenticated with the
/// account email and an API token (HTTP basic auth).
#[derive(Clone, Debug)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub user_agent: String,
    pub cooldown: Duration,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl JiraConfig {
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            email: email.into(),
            api_token: api_token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = duration;
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = duration;
        self
    }

    pub fn api_root(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            DEFAULT_API_PREFIX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::JiraConfig;

    #[test]
    fn api_root_normalizes_trailing_slash() {
        let with_slash = JiraConfig::new("https://acme.atlassian.net/", "a@b.c", "tok");
        let without = JiraConfig::new("https://acme.atlassian.net", "a@b.c", "tok");
        assert_eq!(with_slash.api_root(), "https://acme.atlassian.net/rest/api/2/");
        assert_eq!(with_slash.api_root(), without.api_root());
    }
}
