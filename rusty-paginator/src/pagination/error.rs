//! Error taxonomy for the pagination core.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Any failure surfaced by a navigator operation.
#[derive(Debug, Error)]
pub enum PaginationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    PageResolution(#[from] PageResolutionError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Malformed action registration. The registry is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("action identifier must not be empty")]
    EmptyIdentifier,
    #[error("action identifier `{id}` exceeds {max} characters")]
    IdentifierTooLong { id: String, max: usize },
    #[error("{count} button actions registered, the layout holds at most {max}")]
    TooManyButtons { count: usize, max: usize },
    #[error("{count} select actions registered, the layout holds at most {max}")]
    TooManySelects { count: usize, max: usize },
}

/// The current page could not be produced.
#[derive(Debug, Error)]
pub enum PageResolutionError {
    #[error("navigator has no pages to render")]
    NoPages,
    #[error("page {index} failed to resolve")]
    Producer {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("page {index} resolved to an empty payload")]
    EmptyPayload { index: usize },
    #[error("select option label for page {page_number} failed to resolve")]
    Label {
        page_number: usize,
        #[source]
        source: anyhow::Error,
    },
}

/// Transport call that a dispatch attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOperation {
    Send,
    Edit,
    Reply,
    /// Fetching the message of a reply that was already posted.
    FetchReply,
    EditReply,
}

impl fmt::Display for DispatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Send => "send",
            Self::Edit => "edit",
            Self::Reply => "reply",
            Self::FetchReply => "fetch the reply of",
            Self::EditReply => "edit reply",
        };
        f.write_str(name)
    }
}

/// The underlying transport rejected a send or edit.
#[derive(Debug, Error)]
#[error("failed to {operation} paginated message")]
pub struct DispatchError {
    pub operation: DispatchOperation,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl DispatchError {
    pub fn new(
        operation: DispatchOperation,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Whether the interaction was answered even though the call failed.
    pub fn acknowledged_interaction(&self) -> bool {
        self.operation == DispatchOperation::FetchReply
    }
}
