//! Error types for documentation fetching, indexing and search.

use reqwest::StatusCode;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Failure to retrieve one remote document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure: connect error, timeout, truncated body.
    #[error("request to {url} failed: {source}")]
    Request {
        /// URL that was requested.
        url: String,
        /// Underlying client error.
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// URL that was requested.
        url: String,
        /// Status code of the last attempt.
        status: StatusCode,
    },

    /// The server answered 2xx with nothing in the body.
    #[error("{url} returned an empty body")]
    EmptyBody {
        /// URL that was requested.
        url: String,
    },
}

impl FetchError {
    /// Whether another attempt of the same request may succeed.
    ///
    /// Transport failures, `429 Too Many Requests` and every 5xx are
    /// transient. Other statuses, empty bodies and client construction
    /// failures are final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request { source, .. } => !source.is_builder(),
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Client(_) | Self::EmptyBody { .. } => false,
        }
    }
}

/// Errors surfaced by [`crate::DocsIndex`] and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// The manifest itself could not be fetched, so there is no catalog.
    #[error("failed to fetch documentation manifest {url}: {source}")]
    Manifest {
        /// Manifest URL.
        url: String,
        /// Fetch failure.
        source: FetchError,
    },

    /// A standalone fetch (outside an index build) failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The search library rejected an operation.
    #[error("search index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    Config {
        /// Name of the offending setting.
        key: &'static str,
        /// Raw value as provided.
        value: String,
    },
}
