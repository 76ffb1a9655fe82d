//! [`Error`][core::error::Error] implementations used across the crate

use core::{
    fmt::{Display, Formatter},
    str::Utf8Error,
};

#[cfg(feature = "reqwest")]
pub mod client;
#[cfg(feature = "reqwest")]
pub use client::ClientError;

/// Failure while reading SSE frames out of a byte source
#[derive(Debug, PartialEq)]
pub enum ReadError<E> {
    /// Something went wrong with the underlying reader or stream
    Transport(E),
    /// A line of the stream was not valid utf8
    Utf8Error(Utf8Error),
    /// The stream ended before a complete event arrived
    StreamClosed,
}

impl<E> ReadError<E> {
    /// True if the source ran dry rather than failing
    pub fn is_stream_closed(&self) -> bool {
        matches!(self, Self::StreamClosed)
    }

    /// Swap the transport error type, leaving the other variants alone
    pub fn map_transport<E2>(self, f: impl FnOnce(E) -> E2) -> ReadError<E2> {
        match self {
            ReadError::Transport(e) => ReadError::Transport(f(e)),
            ReadError::Utf8Error(e) => ReadError::Utf8Error(e),
            ReadError::StreamClosed => ReadError::StreamClosed,
        }
    }
}

impl<E> From<Utf8Error> for ReadError<E> {
    fn from(value: Utf8Error) -> Self {
        Self::Utf8Error(value)
    }
}

impl<E> Display for ReadError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Transport(e) => write!(f, "failed to read stream: {e}"),
            ReadError::Utf8Error(e) => write!(f, "stream line was not valid utf8: {e}"),
            ReadError::StreamClosed => "stream closed without receiving event".fmt(f),
        }
    }
}

impl<E> core::error::Error for ReadError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ReadError::Transport(e) => Some(e),
            ReadError::Utf8Error(e) => Some(e),
            ReadError::StreamClosed => None,
        }
    }
}

/// Invalid `x-sse-topic` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicError {
    /// No topics at all
    Empty,
    /// One of the comma separated entries was blank, e.g. `alerts,,news`
    EmptyTopic,
}

impl Display for TopicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TopicError::Empty => "x-sse-topic header is required".fmt(f),
            TopicError::EmptyTopic => "x-sse-topic contains empty topic value".fmt(f),
        }
    }
}

impl core::error::Error for TopicError {}

/// Configuration could not be assembled from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The topic variable did not hold a usable topic list
    Topic {
        var: &'static str,
        source: TopicError,
    },
    /// A variable that must not be blank was set to whitespace only
    Blank { var: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Topic { var, source } => write!(f, "invalid {var}: {source}"),
            ConfigError::Blank { var } => write!(f, "{var} must not be blank"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConfigError::Topic { source, .. } => Some(source),
            ConfigError::Blank { .. } => None,
        }
    }
}
