//! Error types for the Review Manager client

use thiserror::Error;

use crate::form::FormError;

/// Result type alias for Review Manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Review Manager operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend rejected or failed a request
    #[error("{message}")]
    Backend {
        /// HTTP status, when the request reached the server
        status: Option<u16>,
        /// Human readable message (the backend `detail` when present)
        message: String,
    },

    /// No valid session cookie
    #[error("Not logged in")]
    Unauthorized,

    /// Creation form rejected the input
    #[error(transparent)]
    Form(#[from] FormError),

    /// Card action not offered for the current tab and view
    #[error("Action '{action}' is not available on the {tab} tab")]
    ActionNotAvailable {
        /// Action label
        action: &'static str,
        /// Active tab label
        tab: String,
    },

    /// Tab index out of range
    #[error("No tab at index {0}")]
    NoSuchTab(usize),

    /// Development login requested while the flag is off
    #[error("Development login is disabled")]
    DevLoginDisabled,
}

impl Error {
    /// Build a backend error without a status code (transport failures)
    pub fn backend(message: impl Into<String>) -> Self {
        Error::Backend {
            status: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant reads as a sentence a user can act on
    fn message(err: &Error) -> String {
        match err {
            Error::Io(_)
            | Error::Config(_)
            | Error::Backend { .. }
            | Error::Unauthorized
            | Error::Form(_)
            | Error::ActionNotAvailable { .. }
            | Error::NoSuchTab(_)
            | Error::DevLoginDisabled => err.to_string(),
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(message(&Error::backend("Task not found.")), "Task not found.");
        assert_eq!(message(&Error::Unauthorized), "Not logged in");
        assert_eq!(message(&Error::NoSuchTab(3)), "No tab at index 3");
        assert_eq!(
            message(&Error::ActionNotAvailable {
                action: "approve",
                tab: "Approved".to_string(),
            }),
            "Action 'approve' is not available on the Approved tab"
        );
    }
}
