//! Error type shared by the collaborators, the controller, and config loading.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The collaborator could not be reached (DNS, refused, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The collaborator answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded or lacked a required field.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The publisher answered `ok: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("hostname is required and must be a valid string")]
    InvalidHostname(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Text shown to the user in a notice. Publisher rejections carry their own message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Error::Rejected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
