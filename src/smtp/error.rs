//! Error types for the SMTP session engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmtpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed command: no verb")]
    MalformedCommand,

    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Unknown command: {verb} {arguments:?}")]
    UnknownVerb {
        verb: String,
        arguments: Vec<String>,
    },

    #[error("Too much mail data (max {max} bytes)")]
    SizeLimitExceeded { max: usize },
}

/// Protocol limits enforced by a session
pub struct SmtpLimits;

impl SmtpLimits {
    /// Maximum number of bytes stored in a message body
    pub const MAX_DATA_SIZE: usize = 10_240_000;
}

impl SmtpError {
    /// Whether the error came from the underlying stream rather than the peer's input
    pub fn is_io(&self) -> bool {
        matches!(self, SmtpError::Io(_))
    }
}
