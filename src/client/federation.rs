use std::collections::HashMap;

use log::debug;

use crate::error::AuthError;
use crate::provider::{FederatedCredentials, FederatedIdentity, IdentityProvider, UserProfile};

use super::AuthSession;

impl<P, F> AuthSession<P, F>
where
    P: IdentityProvider,
    F: FederatedIdentity,
{
    /// Exchange the held identity token for short-lived federated AWS
    /// credentials.
    ///
    /// Nothing is cached: every call re-derives the login map and performs
    /// the two-step exchange again. Credentials are handed to the caller and
    /// never retained by the session.
    ///
    /// ## Errors
    ///
    /// Fails when no login has succeeded yet; in that case the federated
    /// service is never called.
    pub async fn get_federated_credentials(&self) -> Result<FederatedCredentials, AuthError> {
        let tokens = self.tokens.as_ref().ok_or_else(|| {
            AuthError::Failure(
                "must authenticate first before requesting federated credentials".to_string(),
            )
        })?;

        let logins = self.login_map(&tokens.id_token);

        let identity_id = self
            .federation
            .get_id(&self.config.identity_pool_id, &logins)
            .await?;

        debug!(identity_id = identity_id.as_str(); "Resolved federated identity");

        self.federation
            .get_credentials_for_identity(&identity_id, &logins)
            .await
    }

    /// Fetch the user pool record for the authenticated user.
    ///
    /// ## Errors
    ///
    /// Fails when no login has succeeded yet; the provider is never called
    /// in that case.
    pub async fn get_user(&self) -> Result<UserProfile, AuthError> {
        let tokens = self.tokens.as_ref().ok_or_else(|| {
            AuthError::Failure("must authenticate first before fetching the user profile".to_string())
        })?;

        self.provider.get_user(&tokens.access_token).await
    }

    /// Build the logins map keying the identity token by the user pool it
    /// was issued from. The identity pool's region is the prefix of its id,
    /// before the `:`.
    fn login_map(&self, id_token: &str) -> HashMap<String, String> {
        let region = self
            .config
            .identity_pool_id
            .split(':')
            .next()
            .unwrap_or_default();

        HashMap::from([(
            format!(
                "cognito-idp.{region}.amazonaws.com/{}",
                self.config.user_pool_id
            ),
            id_token.to_string(),
        )])
    }
}
