use thiserror::Error;

/// An error occurred while driving the interactive authentication flow, or
/// while exchanging an identity token for federated credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authentication flow could not be completed with the input
    /// available to the client.
    #[error("{0}")]
    Failure(String),

    /// Cognito rejected the login because the user's password must be reset
    /// before authentication can continue.
    ///
    /// When challenge resolution is enabled the session catches this and runs
    /// the password reset flow; it only surfaces to callers when resolution
    /// is disabled.
    #[error("password reset required before authentication can continue")]
    PasswordResetRequired,

    /// A required configuration value could not be resolved from an explicit
    /// argument, the environment, or a default.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service reported an error this client does not handle. The code
    /// and message are carried through unmodified.
    #[error("{code}: {message}")]
    Provider {
        /// The service's error code, e.g. `NotAuthorizedException`.
        code: String,
        /// The human-readable message returned by the service.
        message: String,
    },

    /// Reading interactive input failed.
    #[error("prompt error: {0}")]
    Io(#[from] std::io::Error),
}
