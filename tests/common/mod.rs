use cognito_client::{AuthSession, SessionConfig};

pub mod fakes;

pub const ACCESS_TOKEN: &str = "access-token-fixture";
pub const ID_TOKEN: &str = "id-token-fixture";
pub const SESSION_HANDLE: &str = "session-handle-fixture";

/// A fully resolved configuration, bypassing environment and prompts.
pub fn config() -> SessionConfig {
    SessionConfig {
        username: "ferris".to_string(),
        client_id: "client-id-fixture".to_string(),
        client_region: "us-west-2".to_string(),
        user_pool_id: "us-west-2_TestPool".to_string(),
        identity_pool_id: "us-west-2:00000000-1111-2222-3333-444444444444".to_string(),
        access_token: None,
        id_token: None,
        resolve_challenges: true,
    }
}

/// A configuration pre-seeded with a token pair, so the session starts out
/// authenticated.
pub fn authenticated_config() -> SessionConfig {
    let mut seeded = config();
    seeded.access_token = Some(ACCESS_TOKEN.to_string());
    seeded.id_token = Some(ID_TOKEN.to_string());
    seeded
}

pub fn session(
    config: SessionConfig,
    pool: &fakes::FakeUserPool,
    identity: &fakes::FakeIdentityPool,
    prompt: &fakes::ScriptedPrompt,
) -> AuthSession<fakes::FakeUserPool, fakes::FakeIdentityPool> {
    AuthSession::with_parts(config, pool.clone(), identity.clone(), Box::new(prompt.clone()))
}
