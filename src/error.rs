//! Failure modes of the conversion pipeline.
//!
//! Only hard failures live here: an unknown dialect id, or a parse or
//! serialize step that cannot produce output at all. Anything lossy but
//! recoverable is reported through
//! [`crate::warnings::ConversionWarning`] on a successful result.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No dialect registered under the given id.
    FormatNotFound(String),
    /// The source text could not be parsed into a tree.
    ParseError(String),
    /// The tree could not be rendered to output text.
    SerializationError(String),
    /// The dialect does not implement the requested direction.
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
