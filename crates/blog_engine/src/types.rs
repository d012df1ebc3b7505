use std::fmt;

use blog_core::{DateFormatError, PostSummaryPage};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MissingMasterRef,
    NotFound,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MissingMasterRef => write!(f, "repository has no master ref"),
            FailureKind::NotFound => write!(f, "document not found"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// A raw payload did not have the shape the reader relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed record {context}: {message}")]
pub struct MalformedRecordError {
    /// Which record or payload, e.g. `results[2]` or `uid "hello"`.
    pub context: String,
    pub message: String,
}

impl MalformedRecordError {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(context: impl Into<String>, field: &str) -> Self {
        Self::new(context, format!("missing required field `{field}`"))
    }

    pub(crate) fn from_date(context: impl Into<String>, err: DateFormatError) -> Self {
        Self::new(context, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
}

/// Result of [`crate::load_next_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Appended { count: usize },
    /// No next page was pending; nothing was fetched.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageLoaded {
        locator: String,
        result: Result<PostSummaryPage, ContentError>,
    },
}
