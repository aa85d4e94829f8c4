//! AWS-backed implementations of the provider traits, built on the same SDK
//! clients the services themselves document:
//! [InitiateAuth](https://docs.aws.amazon.com/cognito-user-identity-pools/latest/APIReference/API_InitiateAuth.html),
//! [RespondToAuthChallenge](https://docs.aws.amazon.com/cognito-user-identity-pools/latest/APIReference/API_RespondToAuthChallenge.html),
//! and [GetCredentialsForIdentity](https://docs.aws.amazon.com/cognitoidentity/latest/APIReference/API_GetCredentialsForIdentity.html).

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cognitoidentityprovider::error::ProvideErrorMetadata;
use aws_sdk_cognitoidentityprovider::types::{
    AuthFlowType, AuthenticationResultType, ChallengeNameType,
};
use chrono::DateTime;
use log::debug;

use crate::challenge::ChallengeKind;
use crate::error::AuthError;

use super::{
    AuthAttempt, FederatedCredentials, FederatedIdentity, IdentityProvider, PendingChallenge,
    TokenPair, UserProfile,
};

/// Load the shared AWS SDK configuration for `region`.
pub async fn sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// [`IdentityProvider`] backed by the Cognito user pools API.
#[derive(Debug, Clone)]
pub struct UserPoolClient {
    client: aws_sdk_cognitoidentityprovider::Client,
}

impl UserPoolClient {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_cognitoidentityprovider::Client::new(config),
        }
    }
}

#[async_trait]
impl IdentityProvider for UserPoolClient {
    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthAttempt, AuthError> {
        let result = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .client_id(client_id)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password)
            .send()
            .await;

        match result {
            Ok(output) => {
                let raw = format!("{output:?}");
                attempt_from_parts(
                    output.challenge_name,
                    output.session,
                    output.authentication_result,
                    raw,
                )
            }
            Err(err) => {
                let err = err.into_service_error();
                if err.is_password_reset_required_exception() {
                    Err(AuthError::PasswordResetRequired)
                } else {
                    Err(service_error(&err))
                }
            }
        }
    }

    async fn respond_to_challenge(
        &self,
        client_id: &str,
        challenge: ChallengeKind,
        session: Option<String>,
        responses: HashMap<String, String>,
    ) -> Result<AuthAttempt, AuthError> {
        let mut builder = self
            .client
            .respond_to_auth_challenge()
            .client_id(client_id)
            .challenge_name(ChallengeNameType::from(challenge.as_str()))
            .set_session(session);

        for (key, value) in responses {
            builder = builder.challenge_responses(key, value);
        }

        let output = builder
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        let raw = format!("{output:?}");
        attempt_from_parts(
            output.challenge_name,
            output.session,
            output.authentication_result,
            raw,
        )
    }

    async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &str,
        confirmation_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.client
            .confirm_forgot_password()
            .client_id(client_id)
            .username(username)
            .confirmation_code(confirmation_code)
            .password(new_password)
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        Ok(())
    }

    async fn resend_confirmation_code(
        &self,
        client_id: &str,
        username: &str,
    ) -> Result<(), AuthError> {
        self.client
            .resend_confirmation_code()
            .client_id(client_id)
            .username(username)
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let output = self
            .client
            .get_user()
            .access_token(access_token)
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        Ok(UserProfile {
            username: output.username,
            attributes: output
                .user_attributes
                .into_iter()
                .map(|attribute| (attribute.name, attribute.value.unwrap_or_default()))
                .collect(),
        })
    }
}

/// [`FederatedIdentity`] backed by the Cognito identity pools API.
#[derive(Debug, Clone)]
pub struct IdentityPoolClient {
    client: aws_sdk_cognitoidentity::Client,
}

impl IdentityPoolClient {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_cognitoidentity::Client::new(config),
        }
    }
}

#[async_trait]
impl FederatedIdentity for IdentityPoolClient {
    async fn get_id(
        &self,
        identity_pool_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<String, AuthError> {
        let mut builder = self.client.get_id().identity_pool_id(identity_pool_id);
        for (key, value) in logins {
            builder = builder.logins(key, value);
        }

        let output = builder
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        output.identity_id.ok_or_else(|| {
            AuthError::Failure("identity pool returned no identity id".to_string())
        })
    }

    async fn get_credentials_for_identity(
        &self,
        identity_id: &str,
        logins: &HashMap<String, String>,
    ) -> Result<FederatedCredentials, AuthError> {
        let mut builder = self
            .client
            .get_credentials_for_identity()
            .identity_id(identity_id);
        for (key, value) in logins {
            builder = builder.logins(key, value);
        }

        let output = builder
            .send()
            .await
            .map_err(|err| service_error(&err.into_service_error()))?;

        debug!(identity_id = identity_id; "Issued federated credentials for identity");

        let raw = format!("{output:?}");
        let missing = || AuthError::Failure(format!("credentials missing from response: {raw}"));

        let credentials = output.credentials.ok_or_else(missing)?;
        Ok(FederatedCredentials {
            expiration: credentials
                .expiration
                .and_then(|when| DateTime::from_timestamp(when.secs(), when.subsec_nanos())),
            access_key_id: credentials.access_key_id.ok_or_else(missing)?,
            secret_key: credentials.secret_key.ok_or_else(missing)?,
            session_token: credentials.session_token.ok_or_else(missing)?,
        })
    }
}

/// Project a user pool response into an [`AuthAttempt`].
///
/// Tokens only count when both halves of the pair are present; a response
/// carrying a challenge name this client does not know is an error.
fn attempt_from_parts(
    challenge_name: Option<ChallengeNameType>,
    session: Option<String>,
    result: Option<AuthenticationResultType>,
    raw: String,
) -> Result<AuthAttempt, AuthError> {
    let challenge = challenge_name
        .map(|name| {
            let kind = name.as_str().parse::<ChallengeKind>()?;
            Ok::<_, AuthError>(PendingChallenge { kind, session })
        })
        .transpose()?;

    let tokens = result.and_then(|result| match (result.access_token, result.id_token) {
        (Some(access_token), Some(id_token)) => Some(TokenPair {
            access_token,
            id_token,
        }),
        _ => None,
    });

    Ok(AuthAttempt {
        challenge,
        tokens,
        raw,
    })
}

fn service_error<E>(err: &E) -> AuthError
where
    E: ProvideErrorMetadata,
{
    AuthError::Provider {
        code: err.code().unwrap_or("Unknown").to_string(),
        message: err
            .message()
            .unwrap_or("no message returned by the service")
            .to_string(),
    }
}
