use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// A challenge issued by Cognito part-way through an authentication flow,
/// requiring additional user input before tokens are released.
///
/// The full set of challenges is described in the
/// [RespondToAuthChallenge](https://docs.aws.amazon.com/cognito-user-identity-pools/latest/APIReference/API_RespondToAuthChallenge.html)
/// documentation. Only [`NewPasswordRequired`](Self::NewPasswordRequired) and
/// [`SmsMfa`](Self::SmsMfa) can be resolved with interactive input; every
/// other kind is a terminal failure for this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeKind {
    /// The user must choose a new password before logging in.
    NewPasswordRequired,
    /// A code was sent to the user via SMS.
    SmsMfa,
    SoftwareTokenMfa,
    SelectMfaType,
    MfaSetup,
    PasswordVerifier,
    CustomChallenge,
    DeviceSrpAuth,
    DevicePasswordVerifier,
    AdminNoSrpAuth,
}

impl ChallengeKind {
    /// The wire name Cognito uses for this challenge.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewPasswordRequired => "NEW_PASSWORD_REQUIRED",
            Self::SmsMfa => "SMS_MFA",
            Self::SoftwareTokenMfa => "SOFTWARE_TOKEN_MFA",
            Self::SelectMfaType => "SELECT_MFA_TYPE",
            Self::MfaSetup => "MFA_SETUP",
            Self::PasswordVerifier => "PASSWORD_VERIFIER",
            Self::CustomChallenge => "CUSTOM_CHALLENGE",
            Self::DeviceSrpAuth => "DEVICE_SRP_AUTH",
            Self::DevicePasswordVerifier => "DEVICE_PASSWORD_VERIFIER",
            Self::AdminNoSrpAuth => "ADMIN_NO_SRP_AUTH",
        }
    }

    /// Whether the client can gather the response to this challenge through
    /// an interactive prompt.
    #[must_use]
    pub fn is_resolvable(self) -> bool {
        matches!(self, Self::NewPasswordRequired | Self::SmsMfa)
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW_PASSWORD_REQUIRED" => Ok(Self::NewPasswordRequired),
            "SMS_MFA" => Ok(Self::SmsMfa),
            "SOFTWARE_TOKEN_MFA" => Ok(Self::SoftwareTokenMfa),
            "SELECT_MFA_TYPE" => Ok(Self::SelectMfaType),
            "MFA_SETUP" => Ok(Self::MfaSetup),
            "PASSWORD_VERIFIER" => Ok(Self::PasswordVerifier),
            "CUSTOM_CHALLENGE" => Ok(Self::CustomChallenge),
            "DEVICE_SRP_AUTH" => Ok(Self::DeviceSrpAuth),
            "DEVICE_PASSWORD_VERIFIER" => Ok(Self::DevicePasswordVerifier),
            "ADMIN_NO_SRP_AUTH" => Ok(Self::AdminNoSrpAuth),
            other => Err(AuthError::Failure(format!(
                "unknown auth challenge '{other}'"
            ))),
        }
    }
}
