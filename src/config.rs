//! Session configuration, resolved through an explicit ordered chain:
//! explicit builder value, then environment variable, then an interactive
//! prompt (username only) or a documented default.

use std::env;

use log::debug;

use crate::error::AuthError;
use crate::prompt::Prompt;

/// Region used when `CLIENT_REGION` is not configured.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Resolved configuration for an authentication session.
///
/// Every field is read from the environment variable matching its uppercase
/// name (`CLIENT_ID`, `USER_POOL_ID`, ...) when no explicit value is given.
/// A `.env` file in the working directory is loaded into the environment
/// before resolution.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cognito username; either an email address or a sub. Prompted for
    /// interactively when not configured.
    pub username: String,
    /// ID of the app client associated with the user pool.
    pub client_id: String,
    /// User pool region.
    pub client_region: String,
    /// ID of the user pool holding the user's credentials.
    pub user_pool_id: String,
    /// ID of the identity pool issuing federated credentials.
    pub identity_pool_id: String,
    /// Pre-seeded access token, allowing login to be skipped. Only honored
    /// together with `id_token`.
    pub access_token: Option<String>,
    /// Pre-seeded identity token. Only honored together with `access_token`.
    pub id_token: Option<String>,
    /// Whether the session should automatically attempt to resolve auth
    /// challenges with interactive input.
    pub resolve_challenges: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Explicit overrides for [`SessionConfig`] fields. Anything left unset falls
/// back to the environment, then to a prompt or default.
#[derive(Debug, Default, Clone)]
pub struct SessionConfigBuilder {
    username: Option<String>,
    client_id: Option<String>,
    client_region: Option<String>,
    user_pool_id: Option<String>,
    identity_pool_id: Option<String>,
    access_token: Option<String>,
    id_token: Option<String>,
    resolve_challenges: Option<bool>,
}

impl SessionConfigBuilder {
    #[must_use]
    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    #[must_use]
    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn client_region(mut self, value: impl Into<String>) -> Self {
        self.client_region = Some(value.into());
        self
    }

    #[must_use]
    pub fn user_pool_id(mut self, value: impl Into<String>) -> Self {
        self.user_pool_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn identity_pool_id(mut self, value: impl Into<String>) -> Self {
        self.identity_pool_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn access_token(mut self, value: impl Into<String>) -> Self {
        self.access_token = Some(value.into());
        self
    }

    #[must_use]
    pub fn id_token(mut self, value: impl Into<String>) -> Self {
        self.id_token = Some(value.into());
        self
    }

    #[must_use]
    pub fn resolve_challenges(mut self, value: bool) -> Self {
        self.resolve_challenges = Some(value);
        self
    }

    /// Resolve the configuration, loading `.env` into the environment first.
    ///
    /// ## Errors
    ///
    /// Returns an error when a required field (`CLIENT_ID`, `USER_POOL_ID`,
    /// `IDENTITY_POOL_ID`) is missing, when `RESOLVE_CHALLENGES` is not a
    /// boolean, when exactly one of the token pair is seeded, or when the
    /// username prompt fails.
    pub fn resolve(self, prompt: &dyn Prompt) -> Result<SessionConfig, AuthError> {
        dotenvy::dotenv().ok();
        self.resolve_with(env_var, prompt)
    }

    fn resolve_with(
        self,
        env: impl Fn(&str) -> Option<String>,
        prompt: &dyn Prompt,
    ) -> Result<SessionConfig, AuthError> {
        let username = match self.username.or_else(|| env("USERNAME")) {
            Some(username) => username,
            None => prompt.read_line("Enter your Cognito username: ")?,
        };

        let client_id = required("CLIENT_ID", self.client_id, &env)?;
        let user_pool_id = required("USER_POOL_ID", self.user_pool_id, &env)?;
        let identity_pool_id = required("IDENTITY_POOL_ID", self.identity_pool_id, &env)?;

        let client_region = self
            .client_region
            .or_else(|| env("CLIENT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let resolve_challenges = match self.resolve_challenges {
            Some(value) => value,
            None => match env("RESOLVE_CHALLENGES") {
                Some(raw) => parse_bool("RESOLVE_CHALLENGES", &raw)?,
                None => true,
            },
        };

        // Tokens only ever move as a pair.
        let (access_token, id_token) = match (
            self.access_token.or_else(|| env("ACCESS_TOKEN")),
            self.id_token.or_else(|| env("ID_TOKEN")),
        ) {
            (Some(access_token), Some(id_token)) => (Some(access_token), Some(id_token)),
            (None, None) => (None, None),
            _ => {
                return Err(AuthError::Config(
                    "ACCESS_TOKEN and ID_TOKEN must be seeded together or not at all".into(),
                ))
            }
        };

        debug!(username = username.as_str(); "Resolved session configuration");

        Ok(SessionConfig {
            username,
            client_id,
            client_region,
            user_pool_id,
            identity_pool_id,
            access_token,
            id_token,
            resolve_challenges,
        })
    }
}

/// Read an environment variable, treating empty values as unset.
pub(crate) fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn required(
    key: &str,
    explicit: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, AuthError> {
    explicit
        .or_else(|| env(key))
        .ok_or_else(|| AuthError::Config(format!("missing required configuration value {key}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AuthError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AuthError::Config(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}
