//! Error types shared by the API client and the controllers.
//!
//! Every failure a user action can hit is tagged with the [`Operation`] that was
//! attempted. The `Display` output of a [`ClientError`] is the operation's
//! user-facing message, so network failures and server rejections read the same
//! in an alert.

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::StorageError;

/// A remote operation the client can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
    FetchProfile,
    CreateProfile,
    SaveProfile,
    ListPosts,
    ListComments,
    CreatePost,
    DeletePost,
    CreateComment,
    DeleteComment,
}

impl Operation {
    /// The message shown to the user when this operation fails.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::Login => "Invalid Login",
            Self::Signup => "Sign up rejected.",
            Self::FetchProfile => "Unable to get profile. Are you still logged in?",
            Self::CreateProfile => "Could not create user.",
            Self::SaveProfile => "Unable to update Profile. Are you still logged in?",
            Self::ListPosts => "Unable to retrieve posts",
            Self::ListComments => "Unable to retrieve posts",
            Self::CreatePost => "Unable to post. Are you still logged in?",
            Self::DeletePost => {
                "Unable to delete. Are you still logged in and the author of the post?"
            }
            Self::CreateComment => "Unable to comment. Are you still logged in?",
            Self::DeleteComment => {
                "Unable to delete. Are you still logged in and the author of the comment?"
            }
        }
    }

    /// Whether a response status counts as success for this operation.
    ///
    /// Registration accepts any 2xx; every other call requires exactly 200.
    #[must_use]
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Self::Signup => status.is_success(),
            _ => status == StatusCode::OK,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{}", .operation.failure_message())]
    RequestFailed {
        operation: Operation,
        status: StatusCode,
    },
    /// No response was received.
    #[error("{}", .operation.failure_message())]
    NetworkUnavailable {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// A success response carried a body that could not be parsed.
    #[error("{}", .operation.failure_message())]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// An authenticated operation was attempted without a stored token.
    #[error("{}", .operation.failure_message())]
    NotSignedIn { operation: Operation },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// The operation that failed, if the error came from a remote call.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::RequestFailed { operation, .. }
            | Self::NetworkUnavailable { operation, .. }
            | Self::Decode { operation, .. }
            | Self::NotSignedIn { operation } => Some(*operation),
            Self::Build(_) | Self::Storage(_) => None,
        }
    }

    /// HTTP status of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server refused the credentials (401 or 403).
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_operation_message() {
        let err = ClientError::RequestFailed {
            operation: Operation::CreateComment,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.to_string(), "Unable to comment. Are you still logged in?");

        let err = ClientError::NotSignedIn {
            operation: Operation::CreateComment,
        };
        assert_eq!(err.to_string(), "Unable to comment. Are you still logged in?");
    }

    #[test]
    fn test_accepts() {
        assert!(Operation::Login.accepts(StatusCode::OK));
        assert!(!Operation::Login.accepts(StatusCode::CREATED));
        assert!(Operation::Signup.accepts(StatusCode::CREATED));
        assert!(!Operation::Signup.accepts(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_auth_rejection() {
        let unauthorized = ClientError::RequestFailed {
            operation: Operation::FetchProfile,
            status: StatusCode::UNAUTHORIZED,
        };
        let forbidden = ClientError::RequestFailed {
            operation: Operation::FetchProfile,
            status: StatusCode::FORBIDDEN,
        };
        let server_error = ClientError::RequestFailed {
            operation: Operation::FetchProfile,
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(unauthorized.is_auth_rejection());
        assert!(forbidden.is_auth_rejection());
        assert!(!server_error.is_auth_rejection());
        assert_eq!(server_error.operation(), Some(Operation::FetchProfile));
    }
}
