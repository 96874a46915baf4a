//! Typed error taxonomy for the weather client.
//!
//! Every failure in the client core is classified exactly once, at the point
//! of occurrence, into one of the five kinds below and never re-classified
//! downstream. Retryability is a pure function of the kind and, for API
//! errors, of the status code.

use thiserror::Error;

/// The closed set of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Payload failed structural validation.
    Validation,
    /// Upstream returned a completed but failing response.
    Api,
    /// Transport failure, or the retry budget was exhausted.
    Network,
    /// A request exceeded its timeout.
    Timeout,
    /// A failure that carries no HTTP meaning of its own.
    Unknown,
}

/// A single field-level constraint violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `properties.gridX`.
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("{message}")]
    Network {
        message: String,
        details: Option<String>,
    },

    #[error("{message}")]
    Timeout { message: String },

    #[error("{message}")]
    Unknown {
        message: String,
        details: Option<String>,
    },
}

impl WeatherError {
    pub fn validation(message: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self::Validation {
            message: message.into(),
            issues,
        }
    }

    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Api {
            message: message.into(),
            status,
        }
    }

    pub fn network(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Network {
            message: message.into(),
            details,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            details,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Api { .. } => ErrorKind::Api,
            Self::Network { .. } => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Whether re-issuing the failed operation could plausibly succeed.
    ///
    /// Client errors (4xx) are not retryable except for 429; server errors
    /// (5xx) are. An API error with no status code is treated as retryable.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::Unknown { .. } => false,
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => match status {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
        }
    }

    /// The HTTP status carried by an API error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// The result shape handed to consumers of the client core.
///
/// On success `data` is populated and `error` is absent; on failure `data`
/// is `None` and `error` carries the typed failure. Consumers never see a
/// panic or an unclassified error.
#[derive(Debug, Clone)]
pub struct LoaderResult<T> {
    pub data: Option<T>,
    pub error: Option<WeatherError>,
}

impl<T> LoaderResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: WeatherError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    /// Convert back into an ordinary `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<T, WeatherError> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(WeatherError::unknown("loader produced neither data nor error", None)),
        }
    }
}
