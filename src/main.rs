//! Interactive login: resolves configuration, authenticates the user, and
//! prints the resulting access token to standard output.

use anyhow::Result;

use cognito_client::{AuthSession, SessionConfig, TerminalPrompt};

#[tokio::main]
async fn main() -> Result<()> {
    // The process-wide diagnostic sink; RUST_LOG overrides the default
    // level.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = SessionConfig::builder().resolve(&TerminalPrompt)?;
    let mut session = AuthSession::connect(config).await;

    let tokens = match session.tokens() {
        Some(tokens) => tokens.clone(),
        None => session.login(None).await?,
    };

    println!("{}", tokens.access_token);

    Ok(())
}
