//! Error types for the storage engine and command interpreter.

use crate::types::PageId;
use thiserror::Error;

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, DbError>;

/// Errors that can occur while parsing or executing commands
#[derive(Error, Debug)]
pub enum DbError {
    /// I/O error from the underlying file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key already exists in the table
    #[error("duplicate key {0}")]
    DuplicateKey(u32),

    /// The root leaf has no room for another cell
    #[error("table full")]
    TableFull,

    /// A row field exceeds its fixed column width
    #[error("{field} too long: {size} bytes (max: {max})")]
    FieldTooLong {
        field: &'static str,
        size: usize,
        max: usize,
    },

    /// The row identifier literal was negative
    #[error("id cannot be negative")]
    NegativeId,

    /// The statement keyword was recognized but the arguments were not
    #[error("syntax error")]
    SyntaxError,

    /// The line did not start with a recognized statement keyword
    #[error("unrecognized statement: {0}")]
    UnrecognizedStatement(String),

    /// The line started with `.` but named no known meta command
    #[error("unrecognized meta command: {0}")]
    UnrecognizedMeta(String),

    /// Requested page number beyond the pager's fixed capacity
    #[error("page {0} out of bounds")]
    PageOutOfBounds(PageId),

    /// The backing file or a page header is not interpretable
    #[error("corruption detected: {0}")]
    Corruption(String),
}

impl DbError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    /// Whether this error ends the process rather than the current command.
    ///
    /// Recoverable errors are reported as a single line and the command loop
    /// continues; fatal errors mean the backing file can no longer be
    /// trusted or reached.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::PageOutOfBounds(_) | Self::Corruption(_)
        )
    }
}
