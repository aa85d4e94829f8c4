use crate::config::SessionConfig;
use crate::prompt::{Prompt, TerminalPrompt};
use crate::provider::{
    self, FederatedIdentity, IdentityPoolClient, IdentityProvider, TokenPair, UserPoolClient,
};

mod federation;
mod login;

/// An interactive authentication session against a Cognito user pool and its
/// paired identity pool.
///
/// The session holds the resolved configuration and the tokens issued by the
/// most recent successful login. The two tokens always move together: both
/// are unset until a login succeeds, and a failed operation never touches
/// them.
///
/// The flow is strictly sequential; a session performs one request at a time
/// and blocks on interactive prompts where the flow calls for them.
pub struct AuthSession<P = UserPoolClient, F = IdentityPoolClient> {
    config: SessionConfig,
    provider: P,
    federation: F,
    prompt: Box<dyn Prompt>,
    tokens: Option<TokenPair>,
}

impl AuthSession<UserPoolClient, IdentityPoolClient> {
    /// Connect to AWS Cognito in the configured region, prompting on the
    /// controlling terminal where the flow needs interactive input.
    pub async fn connect(config: SessionConfig) -> Self {
        let sdk = provider::sdk_config(&config.client_region).await;

        Self::with_parts(
            config,
            UserPoolClient::new(&sdk),
            IdentityPoolClient::new(&sdk),
            Box::new(TerminalPrompt),
        )
    }
}

impl<P, F> AuthSession<P, F>
where
    P: IdentityProvider,
    F: FederatedIdentity,
{
    /// Assemble a session from its collaborating parts.
    ///
    /// Tokens pre-seeded in the configuration are honored here, allowing
    /// [`login`](Self::login) to be skipped entirely.
    pub fn with_parts(
        config: SessionConfig,
        provider: P,
        federation: F,
        prompt: Box<dyn Prompt>,
    ) -> Self {
        let tokens = match (&config.access_token, &config.id_token) {
            (Some(access_token), Some(id_token)) => Some(TokenPair {
                access_token: access_token.clone(),
                id_token: id_token.clone(),
            }),
            _ => None,
        };

        Self {
            config,
            provider,
            federation,
            prompt,
            tokens,
        }
    }

    /// The resolved configuration this session was built from.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The tokens issued by the most recent successful login, if any.
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }
}
