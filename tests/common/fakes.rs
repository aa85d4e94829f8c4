use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cognito_client::{
    AuthAttempt, AuthError, ChallengeKind, FederatedCredentials, FederatedIdentity,
    IdentityProvider, PendingChallenge, Prompt, TokenPair, UserProfile,
};

use crate::common::{ACCESS_TOKEN, ID_TOKEN, SESSION_HANDLE};

/// A scripted user pool response, consumed front to back across
/// `initiate_auth` and `respond_to_challenge` calls.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    /// A response carrying a full authentication result.
    Tokens,
    /// A response carrying the given challenge and a session handle.
    Challenge(ChallengeKind),
    /// The initiate-auth password-reset-required signal.
    ResetRequired,
    /// A response carrying neither tokens nor a challenge.
    Empty,
}

#[derive(Default)]
struct UserPoolState {
    script: Mutex<VecDeque<Scripted>>,
    confirm_failure: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
    credentials: Mutex<Vec<(String, String)>>,
    challenges: Mutex<Vec<(ChallengeKind, Option<String>)>>,
    challenge_responses: Mutex<Vec<HashMap<String, String>>>,
    confirm_requests: Mutex<Vec<(String, String)>>,
    access_tokens: Mutex<Vec<String>>,
}

/// An in-memory [`IdentityProvider`] which replays scripted responses and
/// records every call made against it.
#[derive(Clone, Default)]
pub struct FakeUserPool {
    inner: Arc<UserPoolState>,
}

impl FakeUserPool {
    pub fn script(steps: impl IntoIterator<Item = Scripted>) -> Self {
        let pool = Self::default();
        pool.inner.script.lock().unwrap().extend(steps);
        pool
    }

    /// Make `confirm_forgot_password` fail with the given service message.
    pub fn fail_confirmation(&self, message: &str) {
        *self.inner.confirm_failure.lock().unwrap() = Some(message.to_string());
    }

    /// The operations invoked, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// The (username, password) pairs passed to `initiate_auth`.
    pub fn credentials_seen(&self) -> Vec<(String, String)> {
        self.inner.credentials.lock().unwrap().clone()
    }

    /// The (kind, session) pairs passed to `respond_to_challenge`.
    pub fn challenges_seen(&self) -> Vec<(ChallengeKind, Option<String>)> {
        self.inner.challenges.lock().unwrap().clone()
    }

    /// The challenge response maps passed to `respond_to_challenge`.
    pub fn challenge_responses(&self) -> Vec<HashMap<String, String>> {
        self.inner.challenge_responses.lock().unwrap().clone()
    }

    /// The (confirmation code, new password) pairs passed to
    /// `confirm_forgot_password`.
    pub fn confirm_requests(&self) -> Vec<(String, String)> {
        self.inner.confirm_requests.lock().unwrap().clone()
    }

    /// The access tokens passed to `get_user`.
    pub fn access_tokens_seen(&self) -> Vec<String> {
        self.inner.access_tokens.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.inner.calls.lock().unwrap().push(call.to_string());
    }

    fn next_scripted(&self) -> Result<AuthAttempt, AuthError> {
        match self.inner.script.lock().unwrap().pop_front() {
            Some(Scripted::Tokens) => Ok(AuthAttempt {
                challenge: None,
                tokens: Some(TokenPair {
                    access_token: ACCESS_TOKEN.to_string(),
                    id_token: ID_TOKEN.to_string(),
                }),
                raw: "AuthenticationResult { .. }".to_string(),
            }),
            Some(Scripted::Challenge(kind)) => Ok(AuthAttempt {
                challenge: Some(PendingChallenge {
                    kind,
                    session: Some(SESSION_HANDLE.to_string()),
                }),
                tokens: None,
                raw: format!("ChallengeName: {kind}"),
            }),
            Some(Scripted::ResetRequired) => Err(AuthError::PasswordResetRequired),
            Some(Scripted::Empty) => Ok(AuthAttempt {
                challenge: None,
                tokens: None,
                raw: "{}".to_string(),
            }),
            None => Err(AuthError::Provider {
                code: "NotAuthorizedException".to_string(),
                message: "script exhausted".to_string(),
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeUserPool {
    async fn initiate_auth(
        &self,
        _client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthAttempt, AuthError> {
        self.record("initiate_auth");
        self.inner
            .credentials
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));
        self.next_scripted()
    }

    async fn respond_to_challenge(
        &self,
        _client_id: &str,
        challenge: ChallengeKind,
        session: Option<String>,
        responses: HashMap<String, String>,
    ) -> Result<AuthAttempt, AuthError> {
        self.record("respond_to_challenge");
        self.inner
            .challenges
            .lock()
            .unwrap()
            .push((challenge, session));
        self.inner
            .challenge_responses
            .lock()
            .unwrap()
            .push(responses);
        self.next_scripted()
    }

    async fn confirm_forgot_password(
        &self,
        _client_id: &str,
        _username: &str,
        confirmation_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.record("confirm_forgot_password");
        self.inner
            .confirm_requests
            .lock()
            .unwrap()
            .push((confirmation_code.to_string(), new_password.to_string()));

        match self.inner.confirm_failure.lock().unwrap().as_ref() {
            Some(message) => Err(AuthError::Provider {
                code: "CodeMismatchException".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn resend_confirmation_code(
        &self,
        _client_id: &str,
        _username: &str,
    ) -> Result<(), AuthError> {
        self.record("resend_confirmation_code");
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        self.record("get_user");
        self.inner
            .access_tokens
            .lock()
            .unwrap()
            .push(access_token.to_string());

        Ok(UserProfile {
            username: "ferris".to_string(),
            attributes: vec![("email".to_string(), "ferris@example.com".to_string())],
        })
    }
}

#[derive(Default)]
struct IdentityPoolState {
    calls: Mutex<Vec<String>>,
    logins_seen: Mutex<Vec<HashMap<String, String>>>,
    identity_ids_seen: Mutex<Vec<String>>,
}

/// An in-memory [`FederatedIdentity`] which records every exchange.
#[derive(Clone, Default)]
pub struct FakeIdentityPool {
    inner: Arc<IdentityPoolState>,
}

impl FakeIdentityPool {
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn logins_seen(&self) -> Vec<HashMap<String, String>> {
        self.inner.logins_seen.lock().unwrap().clone()
    }

    pub fn identity_ids_seen(&self) -> Vec<String> {
        self.inner.identity_ids_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FederatedIdentity for FakeIdentityPool {
    async fn get_id(
        &self,
        _identity_pool_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<String, AuthError> {
        self.inner.calls.lock().unwrap().push("get_id".to_string());
        self.inner.logins_seen.lock().unwrap().push(logins.clone());
        Ok("identity-id-fixture".to_string())
    }

    async fn get_credentials_for_identity(
        &self,
        identity_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<FederatedCredentials, AuthError> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push("get_credentials_for_identity".to_string());
        self.inner.logins_seen.lock().unwrap().push(logins.clone());
        self.inner
            .identity_ids_seen
            .lock()
            .unwrap()
            .push(identity_id.to_string());

        Ok(FederatedCredentials {
            access_key_id: "ASIA-FIXTURE".to_string(),
            secret_key: "secret-key-fixture".to_string(),
            session_token: "session-token-fixture".to_string(),
            expiration: None,
        })
    }
}

#[derive(Default)]
struct PromptState {
    answers: Mutex<VecDeque<String>>,
    lines: Mutex<Vec<String>>,
    secrets: Mutex<Vec<String>>,
}

/// A [`Prompt`] which replays canned answers and records every prompt shown,
/// so tests can assert exactly what the user was asked.
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    inner: Arc<PromptState>,
}

impl ScriptedPrompt {
    pub fn with_answers(answers: impl IntoIterator<Item = &'static str>) -> Self {
        let prompt = Self::default();
        prompt
            .inner
            .answers
            .lock()
            .unwrap()
            .extend(answers.into_iter().map(str::to_string));
        prompt
    }

    /// The visible prompts shown, in order.
    pub fn lines(&self) -> Vec<String> {
        self.inner.lines.lock().unwrap().clone()
    }

    /// The masked prompts shown, in order.
    pub fn secrets(&self) -> Vec<String> {
        self.inner.secrets.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.lines().len() + self.secrets().len()
    }

    fn answer(&self) -> String {
        self.inner
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        self.inner.lines.lock().unwrap().push(prompt.to_string());
        Ok(self.answer())
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        self.inner.secrets.lock().unwrap().push(prompt.to_string());
        Ok(self.answer())
    }
}
