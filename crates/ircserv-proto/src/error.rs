//! Error types for the protocol crate.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised by the line codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    #[error("line too long: {actual} bytes (limit {limit})")]
    MessageTooLong {
        /// Length seen so far.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Errors raised while parsing a line into a [`crate::Message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageParseError {
    /// The line was empty after trimming.
    #[error("empty message")]
    EmptyMessage,

    /// A prefix was given without a command.
    #[error("missing command")]
    MissingCommand,
}
