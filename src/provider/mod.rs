//! Trait seams over the two external Cognito services, plus the domain types
//! their responses are projected into.
//!
//! The session logic only ever talks to these traits; the AWS-backed
//! implementations live in [`cognito`] and in-memory fakes can stand in for
//! them in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::challenge::ChallengeKind;
use crate::error::AuthError;

pub use cognito::{sdk_config, IdentityPoolClient, UserPoolClient};

mod cognito;

/// Access and identity tokens issued together by a successful authentication.
///
/// The pair is indivisible: a response carrying only one of the two is
/// treated as having no authentication result at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Token authorizing calls to the user pool API itself.
    pub access_token: String,
    /// Token identifying the user, exchanged for federated credentials.
    pub id_token: String,
}

/// A challenge issued mid-flow, with the session handle that binds the next
/// response to the same flow.
#[derive(Debug, Clone)]
pub struct PendingChallenge {
    pub kind: ChallengeKind,
    pub session: Option<String>,
}

/// A single provider response in the authentication flow: either a challenge
/// to answer, issued tokens, or neither (a failure the caller reports using
/// the raw rendering).
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub challenge: Option<PendingChallenge>,
    pub tokens: Option<TokenPair>,
    /// Debug rendering of the provider's response, kept for diagnostics.
    pub raw: String,
}

/// Short-lived AWS credentials issued for an authenticated identity.
#[derive(Debug, Clone)]
pub struct FederatedCredentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

/// The user pool record for an authenticated user.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub username: String,
    pub attributes: Vec<(String, String)>,
}

/// The user pool side of Cognito: validates credentials, issues tokens,
/// evaluates challenges, and resets passwords.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a `USER_PASSWORD_AUTH` flow for the user.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::PasswordResetRequired`] when the provider demands
    /// a password reset before the flow can continue; any other provider
    /// error is carried through as [`AuthError::Provider`].
    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthAttempt, AuthError>;

    /// Answer a challenge issued by a previous attempt.
    async fn respond_to_challenge(
        &self,
        client_id: &str,
        challenge: ChallengeKind,
        session: Option<String>,
        responses: HashMap<String, String>,
    ) -> Result<AuthAttempt, AuthError>;

    /// Complete a forgotten-password reset with the emailed confirmation
    /// code and the user's chosen new password.
    async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &str,
        confirmation_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Ask the provider to (re)send a confirmation code to the user.
    async fn resend_confirmation_code(
        &self,
        client_id: &str,
        username: &str,
    ) -> Result<(), AuthError>;

    /// Fetch the user pool record for the holder of `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<UserProfile, AuthError>;
}

/// The identity pool side of Cognito: exchanges a validated identity token
/// for short-lived federated credentials.
#[async_trait]
pub trait FederatedIdentity: Send + Sync {
    /// Resolve the identity ID for the logins map.
    async fn get_id(
        &self,
        identity_pool_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<String, AuthError>;

    /// Issue credentials for a previously resolved identity.
    async fn get_credentials_for_identity(
        &self,
        identity_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<FederatedCredentials, AuthError>;
}
