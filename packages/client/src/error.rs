//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the join request and no retry name was given
    #[error("Join rejected: {0}")]
    JoinRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
