//! Authentication fields carried inside Bugzilla REST request bodies

use std::fmt;

use serde::Serialize;

/// How requests authenticate against the Bugzilla server
#[derive(Clone, Default)]
pub enum Credentials {
    #[default]
    Anonymous,
    Login {
        username: String,
        password: String,
    },
    ApiKey {
        api_key: String,
        /// Some installations want the login alongside the key
        username: Option<String>,
    },
}

/// Serialized form of [`Credentials`], flattened into the request object
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct AuthFields<'a> {
    #[serde(rename = "Bugzilla_login", skip_serializing_if = "Option::is_none")]
    pub login: Option<&'a str>,
    #[serde(rename = "Bugzilla_password", skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(rename = "Bugzilla_api_key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

impl Credentials {
    /// Pick credentials from optional configuration values.
    /// An API key wins over a password.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, String> {
        match (api_key, username, password) {
            (Some(api_key), username, _) => Ok(Credentials::ApiKey { api_key, username }),
            (None, Some(username), Some(password)) => {
                Ok(Credentials::Login { username, password })
            }
            (None, Some(_), None) => {
                Err("BUGZILLA_PASSWORD is required when BUGZILLA_USERNAME is set".to_string())
            }
            (None, None, Some(_)) => {
                Err("BUGZILLA_USERNAME is required when BUGZILLA_PASSWORD is set".to_string())
            }
            (None, None, None) => Ok(Credentials::Anonymous),
        }
    }

    pub fn auth_fields(&self) -> AuthFields<'_> {
        match self {
            Credentials::Anonymous => AuthFields::default(),
            Credentials::Login { username, password } => AuthFields {
                login: Some(username),
                password: Some(password),
                api_key: None,
            },
            Credentials::ApiKey { api_key, username } => AuthFields {
                login: username.as_deref(),
                password: None,
                api_key: Some(api_key),
            },
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credentials::Anonymous)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "Anonymous"),
            Credentials::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::ApiKey { username, .. } => f
                .debug_struct("ApiKey")
                .field("api_key", &"***")
                .field("username", username)
                .finish(),
        }
    }
}
