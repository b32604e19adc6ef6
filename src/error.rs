// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::domain::filter::FilterError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Fetch(FetchError),
    Filter(FilterError),
    /// A thread panicked while holding shared state; the write was not made.
    Poisoned(String),
}

/// Reasons a page source can fail to deliver a page.
/// Hosts surface these to the user; the lightbox controller only reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure (offline, timeout, connection reset).
    Network(String),

    /// The requested offset lies past the end of the dataset.
    NotFound { offset: usize },

    /// The backend answered but refused the request.
    Rejected(String),

    /// The host dropped the request before it completed.
    Cancelled,
}

impl FetchError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "error-fetch-page-network",
            FetchError::NotFound { .. } => "error-fetch-page-not-found",
            FetchError::Rejected(_) => "error-fetch-page-rejected",
            FetchError::Cancelled => "error-fetch-page-cancelled",
        }
    }

    /// Whether asking again may succeed. The controller never retries on
    /// its own; this only informs the host's error display.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::NotFound { offset } => write!(f, "No page at offset {}", offset),
            FetchError::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            FetchError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Filter(e) => write!(f, "Filter Error: {}", e),
            Error::Poisoned(what) => write!(f, "Lock poisoned: {}", what),
        }
    }
}

impl std::error::Error for Error {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        Error::Filter(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
