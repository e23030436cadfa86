use thiserror::Error;

use crate::transport::TransportError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Required input was missing; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// The service rejected the call with an explicit `error` message.
    #[error("{0}")]
    Domain(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Well-formed reply whose status this verb does not accept.
    #[error("unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl ClientError {
    /// Message the service wants shown to the user verbatim, if any.
    pub fn domain_message(&self) -> Option<&str> {
        match self {
            Self::Domain(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
