use brids_ids::IdError;
use thiserror::Error;

/// Broad category of a [`RangeError`], for callers that only need to branch
/// on what went wrong rather than on the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed identifier supplied by the caller
    Format,
    /// State or location outside the known sets
    InvalidArgument,
    /// The Correios site failed or answered with unexpected markup
    Upstream,
}

#[derive(Debug, Error)]
pub enum RangeError {
    #[error("the state '{0}' is not valid")]
    UnknownState(String),

    #[error("the location '{location}' is not known for state {state}")]
    UnknownLocation { state: String, location: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} answered HTTP {http_status}")]
    Status { url: String, http_status: u16 },

    #[error("unexpected markup in {page}: {reason}")]
    Markup { page: &'static str, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP client was closed after an earlier failure")]
    ClientClosed,

    #[error("invalid CEP: {0}")]
    Id(#[from] IdError),
}

impl RangeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Id(_) => ErrorKind::Format,
            Self::UnknownState(_) | Self::UnknownLocation { .. } => ErrorKind::InvalidArgument,
            Self::Request { .. }
            | Self::Status { .. }
            | Self::Markup { .. }
            | Self::ClientBuild(_)
            | Self::ClientClosed => ErrorKind::Upstream,
        }
    }

    pub(crate) fn markup(page: &'static str, reason: impl Into<String>) -> Self {
        Self::Markup {
            page,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RangeError>;
