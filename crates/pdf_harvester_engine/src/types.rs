use std::fmt;

use pdf_harvester_core::FailureReason;

/// What a fetched resource is for; selects size cap and accepted content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ListingPage,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

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

    /// Transient failures worth another attempt: timeouts, connection
    /// problems, throttling and server errors.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            FailureKind::Timeout | FailureKind::Network => true,
            FailureKind::HttpStatus(code) => code == 429 || (500..600).contains(&code),
            _ => false,
        }
    }
}

impl From<&FetchError> for FailureReason {
    fn from(err: &FetchError) -> Self {
        match err.kind {
            FailureKind::Timeout => FailureReason::Timeout,
            FailureKind::HttpStatus(code) => FailureReason::HttpStatus(code),
            FailureKind::Cancelled => FailureReason::Cancelled,
            _ => FailureReason::Fetch(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(FetchError::new(FailureKind::Timeout, "t").is_retryable());
        assert!(FetchError::new(FailureKind::HttpStatus(503), "s").is_retryable());
        assert!(FetchError::new(FailureKind::HttpStatus(429), "s").is_retryable());
        assert!(!FetchError::new(FailureKind::HttpStatus(404), "s").is_retryable());
        assert!(!FetchError::new(FailureKind::InvalidUrl, "u").is_retryable());
    }

    #[test]
    fn maps_to_report_reasons() {
        let timeout = FetchError::new(FailureKind::Timeout, "operation timed out");
        assert_eq!(FailureReason::from(&timeout), FailureReason::Timeout);
        let status = FetchError::new(FailureKind::HttpStatus(404), "404 Not Found");
        assert_eq!(FailureReason::from(&status), FailureReason::HttpStatus(404));
        let other = FetchError::new(FailureKind::Network, "connection refused");
        assert_eq!(
            FailureReason::from(&other),
            FailureReason::Fetch("network error: connection refused".into())
        );
    }
}
