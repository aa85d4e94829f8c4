use std::collections::HashMap;

use log::info;

use crate::challenge::ChallengeKind;
use crate::config;
use crate::error::AuthError;
use crate::provider::{AuthAttempt, FederatedIdentity, IdentityProvider, TokenPair};

use super::AuthSession;

impl<P, F> AuthSession<P, F>
where
    P: IdentityProvider,
    F: FederatedIdentity,
{
    /// Log the user in with `USER_PASSWORD_AUTH`, resolving a single
    /// challenge or a forced password reset along the way when challenge
    /// resolution is enabled.
    ///
    /// The password is resolved in order: the explicit argument, the
    /// `PASSWORD` environment variable, then a masked interactive prompt.
    ///
    /// ## Errors
    ///
    /// Fails when the provider issues a challenge while resolution is
    /// disabled, when the challenge cannot be resolved interactively, or
    /// when the final response carries no authentication result. Provider
    /// errors other than the password-reset signal are carried through
    /// untouched. On failure the session's token state is left unchanged.
    pub async fn login(&mut self, password: Option<&str>) -> Result<TokenPair, AuthError> {
        let password = match password {
            Some(password) => password.to_string(),
            None => match config::env_var("PASSWORD") {
                Some(password) => password,
                None => self.prompt.read_secret("Enter your Cognito password: ")?,
            },
        };

        info!(username = self.config.username.as_str(); "Initiating authentication");

        let attempt = match self
            .provider
            .initiate_auth(&self.config.client_id, &self.config.username, &password)
            .await
        {
            Err(AuthError::PasswordResetRequired) if self.config.resolve_challenges => {
                info!("Password reset required. Check your email for a confirmation code.");
                return self.password_reset(None, None).await;
            }
            other => other?,
        };

        let attempt = match attempt.challenge {
            Some(challenge) if self.config.resolve_challenges => {
                self.resolve_challenge(challenge.kind, challenge.session)
                    .await?
            }
            Some(challenge) => {
                return Err(AuthError::Failure(format!(
                    "received auth challenge '{}'; aborting",
                    challenge.kind
                )));
            }
            None => attempt,
        };

        self.store_tokens(attempt)
    }

    /// Gather the user input a challenge asks for and submit the response.
    ///
    /// Only [`ChallengeKind::NewPasswordRequired`] and
    /// [`ChallengeKind::SmsMfa`] can be answered interactively; any other
    /// kind fails without a request being made. The returned attempt is the
    /// provider's response as-is; it may itself carry a further challenge,
    /// which this client does not loop on.
    pub async fn resolve_challenge(
        &mut self,
        kind: ChallengeKind,
        session: Option<String>,
    ) -> Result<AuthAttempt, AuthError> {
        let mut responses = HashMap::new();
        responses.insert("USERNAME".to_string(), self.config.username.clone());

        match kind {
            ChallengeKind::NewPasswordRequired => {
                let new_password = self
                    .prompt
                    .read_secret("A new password is required. Please provide a new password: ")?;
                responses.insert("NEW_PASSWORD".to_string(), new_password);
            }
            ChallengeKind::SmsMfa => {
                let code = self
                    .prompt
                    .read_line("Please provide the code sent to you via SMS: ")?;
                responses.insert("SMS_MFA_CODE".to_string(), code);
            }
            other => {
                return Err(AuthError::Failure(format!(
                    "unexpected auth challenge '{other}'; unable to resolve automatically"
                )));
            }
        }

        self.provider
            .respond_to_challenge(&self.config.client_id, kind, session, responses)
            .await
    }

    /// Complete a forced password reset, then log in with the new password.
    ///
    /// The confirmation code and new password are prompted for when not
    /// provided. A failed confirmation aborts before any login attempt is
    /// made.
    pub async fn password_reset(
        &mut self,
        confirmation_code: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let confirmation_code = match confirmation_code {
            Some(code) => code.to_string(),
            None => self.prompt.read_line("Confirmation code: ")?,
        };
        let new_password = match new_password {
            Some(password) => password.to_string(),
            None => self.prompt.read_secret("New password: ")?,
        };

        self.provider
            .confirm_forgot_password(
                &self.config.client_id,
                &self.config.username,
                &confirmation_code,
                &new_password,
            )
            .await?;

        info!("Successfully set password.");

        // login and password_reset call each other; box this edge of the
        // cycle so the future type stays finite.
        Box::pin(self.login(Some(&new_password))).await
    }

    /// Ask the provider to (re)send a confirmation code to the user,
    /// starting a password reset the user can complete with
    /// [`password_reset`](Self::password_reset).
    pub async fn request_password_reset(&self) -> Result<(), AuthError> {
        self.provider
            .resend_confirmation_code(&self.config.client_id, &self.config.username)
            .await
    }

    fn store_tokens(&mut self, attempt: AuthAttempt) -> Result<TokenPair, AuthError> {
        let Some(tokens) = attempt.tokens else {
            return Err(AuthError::Failure(format!(
                "failed to authenticate; response: {}",
                attempt.raw
            )));
        };

        self.tokens = Some(tokens.clone());
        Ok(tokens)
    }
}
