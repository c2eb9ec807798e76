//! Command error taxonomy
//!
//! Every failure raised while executing a command is one of these kinds. The
//! dispatcher consults [`CommandError::disposition`] to decide what the
//! invoking user sees and whether the failure is re-raised for operator
//! visibility; no command handler formats its own error text.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use thiserror::Error;

use crate::gateway::GatewayError;

/// Text shown for failures that have no recognized kind.
const UNEXPECTED_TEXT: &str = "There was an unknown error!\n\
    Please try again, or report it on the support server if it keeps happening.";

/// A classified command failure.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The invoking member lacks the configured manage role.
    #[error("You do not have the role required to manage messages in this server.")]
    MissingPermission,

    /// Required content was missing or invalid, or the platform refused an
    /// action (e.g. a forbidden delete).
    #[error("{0}")]
    Content(String),

    /// A resolved channel belongs to a different server than the invocation.
    #[error("That channel is not in this server, please re-do the command.")]
    DifferentServer,

    /// Required configuration is absent for this server.
    #[error("{0}")]
    ConfigNotSet(String),

    /// An interactive wait (confirmation or content prompt) expired.
    #[error("Timed out, please re-do the command.")]
    Timeout,

    /// A channel or message lookup found nothing.
    #[error("{0}")]
    NotFound(String),

    /// Anything else. Shown a generic message and re-raised.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// How a classified failure is handled: the message shown to the invoking
/// user, and whether the failure propagates past the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    pub user_message: String,
    pub escalate: bool,
}

impl CommandError {
    /// Short kind tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingPermission => "missing_permission",
            Self::Content(_) => "content",
            Self::DifferentServer => "different_server",
            Self::ConfigNotSet(_) => "config_not_set",
            Self::Timeout => "timeout",
            Self::NotFound(_) => "not_found",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// The single point where kinds map to user-facing behavior.
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::Unexpected(_) => Disposition {
                user_message: UNEXPECTED_TEXT.to_string(),
                escalate: true,
            },
            recognized => Disposition {
                user_message: recognized.to_string(),
                escalate: false,
            },
        }
    }
}

impl From<GatewayError> for CommandError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Forbidden => Self::Content(
                "The platform refused that action, check my permissions and try again."
                    .to_string(),
            ),
            GatewayError::NotFound => {
                Self::NotFound("The requested channel or message could not be found.".to_string())
            }
            GatewayError::Platform(inner) => Self::Unexpected(inner),
        }
    }
}
