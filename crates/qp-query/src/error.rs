//! Error types for query translation.
//!
//! Every failure aborts the translation. The error keeps the query text so that it can point at
//! the offending position.

use std::{error, fmt};

use thiserror::Error;

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryErrorKind {
    /// No searchable term remains after punctuation stripping.
    #[error("query contains no searchable terms")]
    Empty,

    /// Parenthesis depth went negative or did not return to zero.
    #[error("{message}")]
    UnbalancedBraces {
        /// Error message.
        message: String,
        /// Byte position of the offending parenthesis.
        position: Option<usize>,
    },

    /// An operator without a valid operand, or another structural illegality.
    #[error("{message}")]
    Malformed {
        /// Error message.
        message: String,
        /// Approximate byte position in input (if available).
        position: Option<usize>,
    },
}

/// A query translation error.
///
/// This type provides detailed error messages with context, including
/// the original query string and position indicators where applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// The original query string (if available).
    pub query: Option<String>,
}

impl QueryError {
    /// Creates an empty-query error.
    pub fn empty() -> Self {
        Self {
            kind: QueryErrorKind::Empty,
            query: None,
        }
    }

    /// Creates an unbalanced-parentheses error.
    pub fn unbalanced(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind: QueryErrorKind::UnbalancedBraces {
                message: message.into(),
                position,
            },
            query: None,
        }
    }

    /// Creates a malformed-query error.
    pub fn malformed(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind: QueryErrorKind::Malformed {
                message: message.into(),
                position,
            },
            query: None,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns the byte position the error points at, if known.
    pub fn position(&self) -> Option<usize> {
        match &self.kind {
            QueryErrorKind::Empty => None,
            QueryErrorKind::UnbalancedBraces { position, .. }
            | QueryErrorKind::Malformed { position, .. } => *position,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::Empty => {
                Some("Add at least one word to search for; and, or, not and punctuation are ignored")
            }
            QueryErrorKind::UnbalancedBraces { message, .. } if message.contains("unclosed") => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            QueryErrorKind::UnbalancedBraces { .. } => {
                Some("Remove the extra ) or add the matching ( before it")
            }
            QueryErrorKind::Malformed { message, .. } if message.contains("not") => {
                Some("not must be followed by a term or group, e.g., 'apple not banana'")
            }
            QueryErrorKind::Malformed { message, .. }
                if message.contains("and") || message.contains("or") =>
            {
                Some("and/or require expressions on both sides, e.g., 'apple or banana'")
            }
            QueryErrorKind::Malformed { message, .. } if message.contains("group") => {
                Some("Remove the empty parentheses ()")
            }
            QueryErrorKind::Malformed { .. } => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query syntax error: {}", self.message())?;

        if let Some(query) = &self.query {
            writeln!(f, "  {query}")?;
            if let Some(pos) = self.position() {
                let clamped = pos.min(query.len());
                writeln!(f, "  {}^", " ".repeat(clamped))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }

        Ok(())
    }
}

impl error::Error for QueryError {}
