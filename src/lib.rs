#![crate_name = "cognito_client"]

//! # Cognito Client
//!
//! An interactive AWS Cognito client which exchanges user pool logins for
//! temporary federated AWS credentials.
//!
//! The client drives the `USER_PASSWORD_AUTH` flow described in the
//! [InitiateAuth](https://docs.aws.amazon.com/cognito-user-identity-pools/latest/APIReference/API_InitiateAuth.html)
//! documentation, resolves the challenges an interactive user can answer
//! (a required new password, an SMS MFA code, a forced password reset), and
//! then exchanges the issued identity token for short-lived AWS credentials
//! through the paired identity pool.
//!
//! It is intended for interactive terminal environments: anything the
//! configuration does not provide is asked for on the terminal, with secret
//! input masked.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! cognito-client = "0.1.0"
//! ```
//!
//! ### Logging in
//!
//! Configuration is resolved per field through the same ordered chain:
//! an explicit builder value, then the environment variable matching the
//! field's uppercase name (a `.env` file is loaded first), then an
//! interactive prompt (username) or a documented default.
//!
//! ```no_run
//! use cognito_client::{AuthSession, SessionConfig, TerminalPrompt};
//!
//! # async fn run() -> Result<(), cognito_client::AuthError> {
//! let config = SessionConfig::builder()
//!     // The ID of the app client the user pool is accessed through.
//!     .client_id("<app client id>")
//!
//!     // The user pool holding the user's credentials, and the identity
//!     // pool issuing federated credentials for it.
//!     .user_pool_id("<user pool id>")
//!     .identity_pool_id("<identity pool id>")
//!     .resolve(&TerminalPrompt)?;
//!
//! let mut session = AuthSession::connect(config).await;
//!
//! // Prompts for the password (unless `PASSWORD` is set in the
//! // environment) and for any challenge input the provider asks for.
//! let tokens = session.login(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Federated credentials
//!
//! Once a login has succeeded, the identity token can be exchanged for
//! short-lived AWS credentials. The exchange is performed against the
//! identity pool on every call; nothing is cached.
//!
//! ```no_run
//! use cognito_client::{AuthSession, SessionConfig, TerminalPrompt};
//!
//! # async fn run() -> Result<(), cognito_client::AuthError> {
//! # let config = SessionConfig::builder().resolve(&TerminalPrompt)?;
//! let mut session = AuthSession::connect(config).await;
//! session.login(None).await?;
//!
//! let credentials = session.get_federated_credentials().await?;
//! println!("{}", credentials.access_key_id);
//! # Ok(())
//! # }
//! ```
//!
//! ### Skipping login
//!
//! A session seeded with `ACCESS_TOKEN` and `ID_TOKEN` starts out
//! authenticated, so token-gated operations work without a login call. The
//! two tokens are only honored together.
//!
//! ## Command line
//!
//! The `cognito-login` binary resolves configuration the same way, performs
//! a login, and prints the resulting access token to standard output.

pub use crate::challenge::ChallengeKind;
pub use crate::client::AuthSession;
pub use crate::config::{SessionConfig, SessionConfigBuilder, DEFAULT_REGION};
pub use crate::error::AuthError;
pub use crate::prompt::{Prompt, TerminalPrompt};
pub use crate::provider::{
    sdk_config, AuthAttempt, FederatedCredentials, FederatedIdentity, IdentityPoolClient,
    IdentityProvider, PendingChallenge, TokenPair, UserPoolClient, UserProfile,
};

mod challenge;
mod client;
mod config;
mod error;
mod prompt;
mod provider;
