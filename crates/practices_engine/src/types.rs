use std::fmt;
use std::time::Duration;

use practices_core::StopReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    /// The HTTP client could not be built from the settings.
    Client,
}

impl FailureKind {
    /// Whether another attempt at the same URL may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::RedirectLimitExceeded
                | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Client => write!(f, "http client error"),
        }
    }
}

/// Observable steps of a crawl, delivered to an [`crate::EventSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    FetchAttempt {
        url: String,
        attempt: u32,
        max_attempts: u32,
    },
    FetchSucceeded {
        url: String,
        byte_len: u64,
    },
    FetchFailed {
        url: String,
        attempt: u32,
        error: FetchError,
    },
    RetryScheduled {
        url: String,
        delay: Duration,
    },
    FetchGaveUp {
        url: String,
        attempts: u32,
    },
    DecodedWithErrors {
        url: String,
        encoding: String,
    },
    CardsExtracted {
        page: u32,
        count: usize,
    },
    PageSkipped {
        page: u32,
    },
    PageScraped {
        page: u32,
        added: usize,
        total: usize,
    },
    CrawlStopped {
        page: u32,
        reason: StopReason,
    },
}
