use std::fmt;

use scout_core::ResultEntry;

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

    /// A missing upstream resource. The scrape loop skips these instead of aborting.
    pub fn is_not_found(&self) -> bool {
        self.kind == FailureKind::NotFound
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    NotFound,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why the scrape loop stopped early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to load contact directory: {0}")]
    Directory(FetchError),
    #[error("failed to load post links: {0}")]
    PostLinks(FetchError),
    /// `index` is 1-based.
    #[error("candidate {index} ({uri}) failed: {source}")]
    Candidate {
        index: usize,
        uri: String,
        source: FetchError,
    },
}

impl ScrapeError {
    pub fn fetch_error(&self) -> &FetchError {
        match self {
            ScrapeError::Directory(err) | ScrapeError::PostLinks(err) => err,
            ScrapeError::Candidate { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    Accepted,
    NoPhoneNumber,
    Blacklisted,
    Duplicate,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    /// Emitted once the candidate list is known.
    Started { total: usize },
    /// Emitted after every candidate, whatever the outcome.
    CandidateProcessed {
        processed: usize,
        total: usize,
        outcome: CandidateOutcome,
        entry: Option<ResultEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeSummary {
    pub total: usize,
    pub accepted: Vec<ResultEntry>,
    pub skipped: usize,
    pub rejected: usize,
}
