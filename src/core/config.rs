use std::env;
use std::time::Duration;

use crate::shared::credentials::Credentials;

#[derive(Debug, Clone)]
pub struct Config {
    pub bugzilla: BugzillaConfig,
}

/// Connection settings for a Bugzilla REST endpoint
#[derive(Debug, Clone)]
pub struct BugzillaConfig {
    /// REST root of the server, e.g. "https://bugzilla.example.org/rest"
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bugzilla: BugzillaConfig::from_env()?,
        })
    }
}

impl BugzillaConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 60;
    const DEFAULT_USER_AGENT: &'static str = "bugzilla-rest-core/0.1";

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("BUGZILLA_URL")
            .map_err(|_| "BUGZILLA_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        if base_url.is_empty() {
            return Err("BUGZILLA_URL must not be empty".to_string());
        }

        let api_key = non_empty_var("BUGZILLA_API_KEY");
        let username = non_empty_var("BUGZILLA_USERNAME");
        let password = non_empty_var("BUGZILLA_PASSWORD");

        let credentials = Credentials::from_parts(username, password, api_key)?;

        let timeout_secs = non_empty_var("BUGZILLA_TIMEOUT_SECS")
            .unwrap_or_else(|| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BUGZILLA_TIMEOUT_SECS must be a valid number".to_string())?;

        let user_agent = non_empty_var("BUGZILLA_USER_AGENT")
            .unwrap_or_else(|| Self::DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            base_url,
            credentials,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        })
    }

    /// Settings for a server without authentication, mostly useful for tests
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: Credentials::Anonymous,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Environment value, with empty values counting as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "BUGZILLA_URL",
        "BUGZILLA_API_KEY",
        "BUGZILLA_USERNAME",
        "BUGZILLA_PASSWORD",
        "BUGZILLA_TIMEOUT_SECS",
        "BUGZILLA_USER_AGENT",
    ];

    /// Run `f` with exactly the given BUGZILLA_* variables set
    fn with_bugzilla_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|key| {
                let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn test_defaults_apply() {
        let config = with_bugzilla_env(&[("BUGZILLA_URL", "https://bz.example.org/rest/")], || {
            BugzillaConfig::from_env().unwrap()
        });
        assert_eq!(config.base_url, "https://bz.example.org/rest");
        assert!(config.credentials.is_anonymous());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "bugzilla-rest-core/0.1");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = with_bugzilla_env(
            &[
                ("BUGZILLA_URL", "https://bz.example.org/rest"),
                ("BUGZILLA_API_KEY", ""),
                ("BUGZILLA_TIMEOUT_SECS", ""),
                ("BUGZILLA_USER_AGENT", ""),
            ],
            || BugzillaConfig::from_env().unwrap(),
        );
        assert!(config.credentials.is_anonymous());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "bugzilla-rest-core/0.1");
    }

    #[test]
    fn test_explicit_values() {
        let config = with_bugzilla_env(
            &[
                ("BUGZILLA_URL", "https://bz.example.org/rest"),
                ("BUGZILLA_USERNAME", "me@example.org"),
                ("BUGZILLA_PASSWORD", "pw"),
                ("BUGZILLA_TIMEOUT_SECS", "5"),
                ("BUGZILLA_USER_AGENT", "attach-bot/2"),
            ],
            || Config::from_env().unwrap(),
        );
        let fields = config.bugzilla.credentials.auth_fields();
        assert_eq!(fields.login, Some("me@example.org"));
        assert_eq!(config.bugzilla.timeout, Duration::from_secs(5));
        assert_eq!(config.bugzilla.user_agent, "attach-bot/2");
    }

    #[test]
    fn test_missing_url_and_bad_timeout_fail() {
        let missing = with_bugzilla_env(&[], BugzillaConfig::from_env);
        assert!(missing.unwrap_err().contains("BUGZILLA_URL"));

        let bad_timeout = with_bugzilla_env(
            &[
                ("BUGZILLA_URL", "https://bz.example.org/rest"),
                ("BUGZILLA_TIMEOUT_SECS", "soon"),
            ],
            BugzillaConfig::from_env,
        );
        assert!(bad_timeout.unwrap_err().contains("BUGZILLA_TIMEOUT_SECS"));
    }
}
