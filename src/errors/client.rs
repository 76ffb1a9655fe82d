use core::fmt::{Display, Formatter};
use std::io;

use reqwest::StatusCode;

use super::ReadError;

/// Error from a [`GatewayClient`][crate::client::GatewayClient] or [`AsyncGatewayClient`][crate::client::AsyncGatewayClient] call
#[derive(Debug)]
pub enum ClientError {
    /// The request could not be sent or the response could not be received
    Transport(reqwest::Error),
    /// The gateway answered with a status other than the one the operation expects
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },
    /// Reading the event stream failed
    Read(ReadError<io::Error>),
    /// A JSON response body did not have the expected shape
    Decode(serde_json::Error),
}

impl ClientError {
    /// Status code of an [`UnexpectedStatus`][ClientError::UnexpectedStatus] error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::Read(_) | ClientError::Decode(_) => None,
        }
    }

    /// True if the subscription ended before any event arrived
    pub fn is_stream_closed(&self) -> bool {
        matches!(self, ClientError::Read(e) if e.is_stream_closed())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<ReadError<io::Error>> for ClientError {
    fn from(value: ReadError<io::Error>) -> Self {
        Self::Read(value)
    }
}

impl From<ReadError<reqwest::Error>> for ClientError {
    fn from(value: ReadError<reqwest::Error>) -> Self {
        match value {
            ReadError::Transport(e) => Self::Transport(e),
            ReadError::Utf8Error(e) => Self::Read(ReadError::Utf8Error(e)),
            ReadError::StreamClosed => Self::Read(ReadError::StreamClosed),
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "request failed: {e}"),
            ClientError::UnexpectedStatus {
                operation,
                status,
                body,
            } => {
                write!(f, "{operation} failed: {}", status.as_u16())?;
                if !body.is_empty() {
                    write!(f, " {body}")?;
                }
                Ok(())
            }
            ClientError::Read(e) => e.fmt(f),
            ClientError::Decode(e) => write!(f, "unexpected response body: {e}"),
        }
    }
}

impl core::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::UnexpectedStatus { .. } => None,
            ClientError::Read(e) => Some(e),
            ClientError::Decode(e) => Some(e),
        }
    }
}
