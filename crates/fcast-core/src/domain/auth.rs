//! Authentication profiles for the query and write paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::commands::{Command, RegisterProfile};
use crate::error::{ForecastError, ForecastResult};

/// Authentication scheme used by a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Token in an `Authorization: Bearer` header.
    #[default]
    Bearer,
    /// Username and password.
    Basic,
}

impl AuthType {
    /// Parse a server-supplied value. Anything other than `basic` is bearer.
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("basic") {
            Self::Basic
        } else {
            Self::Bearer
        }
    }

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Basic => "basic",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two per-session profiles is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// Credentials used to read metrics.
    Query,
    /// Credentials used to write forecasts back.
    Write,
}

impl ProfileKind {
    /// Command that reads this profile.
    pub fn read_command(self) -> Command {
        match self {
            Self::Query => Command::GetGrafanaQueryConfig,
            Self::Write => Command::GetGrafanaWriteConfig,
        }
    }

    /// Command that saves this profile.
    pub fn register_command(self, profile: RegisterProfile) -> Command {
        match self {
            Self::Query => Command::GrafanaQueryRegister(profile),
            Self::Write => Command::GrafanaWriteRegister(profile),
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully resolved profile, or the canonical empty one.
///
/// `is_api_key_set` is always derived from the other fields: true iff a token
/// is present, or the profile is basic auth with a username.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfile {
    api_url: String,
    api_key: String,
    is_api_key_set: bool,
    auth_type: AuthType,
    username: String,
    password: String,
}

impl AuthProfile {
    /// The canonical empty profile.
    pub fn empty() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            is_api_key_set: false,
            auth_type: AuthType::Bearer,
            username: String::new(),
            password: String::new(),
        }
    }

    /// Build a profile from resolved values.
    ///
    /// An empty `api_url` yields [`AuthProfile::empty`] regardless of the other
    /// arguments; a profile is either fully resolved or empty.
    pub fn resolved(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        auth_type: AuthType,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into();
        if api_url.is_empty() {
            return Self::empty();
        }

        let api_key = api_key.into();
        let username = username.into();
        let is_api_key_set =
            !api_key.is_empty() || (auth_type == AuthType::Basic && !username.is_empty());

        Self {
            api_url,
            api_key,
            is_api_key_set,
            auth_type,
            username,
            password: password.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub const fn is_api_key_set(&self) -> bool {
        self.is_api_key_set
    }

    pub const fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether this is the canonical empty profile.
    pub fn is_empty(&self) -> bool {
        self.api_url.is_empty()
    }

    /// Whether the profile has a URL and usable credentials.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty()
            && (self.is_api_key_set
                || (self.auth_type == AuthType::Basic && !self.username.is_empty()))
    }
}

impl Default for AuthProfile {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for AuthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthProfile")
            .field("api_url", &self.api_url)
            .field("is_api_key_set", &self.is_api_key_set)
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// User input for saving a profile.
///
/// The same reset rule applies to both profiles: bearer auth never sends a
/// username or password, basic auth never sends a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub api_url: String,
    /// Defaults to basic when unset.
    pub auth_type: Option<AuthType>,
    pub token: String,
    pub username: String,
    pub password: String,
}

impl ProfileDraft {
    /// Validate the draft and build the register command for `kind`.
    pub fn into_command(self, kind: ProfileKind) -> ForecastResult<Command> {
        let api_url = self.api_url.trim().to_string();
        if api_url.is_empty() {
            return Err(ForecastError::Validation(
                "Please input Grafana URL!".to_string(),
            ));
        }

        let auth_type = self.auth_type.unwrap_or(AuthType::Basic);
        let profile = match auth_type {
            AuthType::Bearer => {
                if self.token.is_empty() {
                    return Err(ForecastError::Validation(
                        "Please input API Token!".to_string(),
                    ));
                }
                RegisterProfile {
                    grafana_url: api_url,
                    token: self.token,
                    auth_type,
                    username: String::new(),
                    password: String::new(),
                }
            }
            AuthType::Basic => {
                if self.username.is_empty() {
                    return Err(ForecastError::Validation(
                        "Please input username!".to_string(),
                    ));
                }
                if self.password.is_empty() {
                    return Err(ForecastError::Validation(
                        "Please input password!".to_string(),
                    ));
                }
                RegisterProfile {
                    grafana_url: api_url,
                    token: String::new(),
                    auth_type,
                    username: self.username,
                    password: self.password,
                }
            }
        };

        Ok(kind.register_command(profile))
    }
}
