//! Registry error taxonomy.
//!
//! Every failure that crosses the registry client boundary is reduced to an
//! [`ErrorKind`] plus the original HTTP status when one was received. The
//! reduction is the pure function [`classify`], which works on a
//! transport-independent [`RawFailure`] so it can be tested without a network.

use serde::Serialize;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Category of a registry failure, used to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A caller-side precondition was violated before any network call.
    InvalidArgument,
    /// The registry confirmed the resource does not exist.
    NotFound,
    /// The registry answered with a 5xx status.
    ServerUnavailable,
    /// No response reached the caller (DNS, refused connection, timeout).
    NetworkFailure,
    /// A response arrived but its body did not have the expected shape.
    MalformedResponse,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Whether a manual retry of the same request can reasonably succeed.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ErrorKind::ServerUnavailable | ErrorKind::NetworkFailure | ErrorKind::Unknown
        )
    }

    /// Stable machine-readable code, e.g. `"NOT_FOUND"`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ServerUnavailable => "SERVER_UNAVAILABLE",
            ErrorKind::NetworkFailure => "NETWORK_FAILURE",
            ErrorKind::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// RawFailure + classify
// ---------------------------------------------------------------------------

/// What actually went wrong, stripped of transport types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFailure {
    /// The registry answered with a non-2xx status code.
    Status(u16),
    /// The request never produced a response.
    NoResponse,
    /// A 2xx response whose body could not be decoded into the expected shape.
    BadBody,
    /// Input rejected before sending.
    InvalidInput,
    /// Failure that fits none of the above.
    Other,
}

/// Map a raw failure onto the error taxonomy.
///
/// - `404` maps to [`ErrorKind::NotFound`].
/// - `5xx` maps to [`ErrorKind::ServerUnavailable`].
/// - Any other status maps to [`ErrorKind::Unknown`].
///
/// # Examples
///
/// ```
/// use locator_core::error::{classify, ErrorKind, RawFailure};
/// assert_eq!(classify(&RawFailure::Status(404)), ErrorKind::NotFound);
/// assert_eq!(classify(&RawFailure::Status(503)), ErrorKind::ServerUnavailable);
/// assert_eq!(classify(&RawFailure::NoResponse), ErrorKind::NetworkFailure);
/// ```
pub fn classify(raw: &RawFailure) -> ErrorKind {
    match *raw {
        RawFailure::Status(404) => ErrorKind::NotFound,
        RawFailure::Status(code) if (500..600).contains(&code) => ErrorKind::ServerUnavailable,
        RawFailure::Status(_) => ErrorKind::Unknown,
        RawFailure::NoResponse => ErrorKind::NetworkFailure,
        RawFailure::BadBody => ErrorKind::MalformedResponse,
        RawFailure::InvalidInput => ErrorKind::InvalidArgument,
        RawFailure::Other => ErrorKind::Unknown,
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// A classified registry failure.
///
/// `message` is diagnostic text for logs; it is never shown to users as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RegistryError {
    pub kind: ErrorKind,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    pub message: String,
}

impl RegistryError {
    /// Classify `raw` and attach a diagnostic message.
    pub fn from_raw(raw: RawFailure, message: impl Into<String>) -> Self {
        let status = match raw {
            RawFailure::Status(code) => Some(code),
            _ => None,
        };
        Self {
            kind: classify(&raw),
            status,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::from_raw(RawFailure::InvalidInput, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::from_raw(RawFailure::BadBody, message)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
