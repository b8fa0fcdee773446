// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and carries the offending identifier
//! or URL, so callers can decide whether to skip an item or abort.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"object_not_found"`,
/// the codes reported by the API are encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The kind of entity a [`AppError::FetchFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Page,
    Database,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Database => write!(f, "database"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Could not extract a Notion ID from URL: {url}")]
    InvalidReference { url: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}) for {url}: {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to fetch {kind} {id}: {source}")]
    FetchFailed {
        kind: EntityKind,
        id: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Output delivery failed: {}", failures.join("; "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Tags an error with the entity whose fetch it interrupted.
    pub fn fetch_failed(kind: EntityKind, id: impl fmt::Display, source: AppError) -> Self {
        AppError::FetchFailed {
            kind,
            id: id.to_string(),
            source: Box::new(source),
        }
    }

    /// Whether the caller supplied bad input, as opposed to an upstream failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            AppError::InvalidReference { .. } | AppError::ValidationError(_) => true,
            AppError::FetchFailed { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Domain vocabulary for why a database fetch failed.
///
/// This is not an error type. It classifies the failure reason so the
/// ingestion log can say something clearer than the raw error text.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseFetchFailure {
    /// The database is a linked database (Notion API limitation).
    LinkedDatabase,
    /// The integration lacks permission to access this database.
    PermissionDenied { reason: String },
    /// The database was not found.
    NotFound,
    /// Some other failure occurred.
    Other { cause: String },
}

impl fmt::Display for DatabaseFetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkedDatabase => write!(
                f,
                "linked database (Notion API does not support retrieving linked databases)"
            ),
            Self::PermissionDenied { reason } => write!(f, "permission denied: {}", reason),
            Self::NotFound => write!(f, "database not found"),
            Self::Other { cause } => write!(f, "{}", cause),
        }
    }
}

/// Classifies a database fetch error into a domain-specific failure reason.
pub fn classify_database_fetch_failure(error: &AppError) -> DatabaseFetchFailure {
    match error {
        AppError::FetchFailed { source, .. } => classify_database_fetch_failure(source),
        AppError::NotionService { code, message, .. } => {
            if message.contains("linked database") {
                DatabaseFetchFailure::LinkedDatabase
            } else if code.is_not_found() {
                DatabaseFetchFailure::NotFound
            } else if matches!(
                code,
                NotionErrorCode::RestrictedResource | NotionErrorCode::Unauthorized
            ) {
                DatabaseFetchFailure::PermissionDenied {
                    reason: message.clone(),
                }
            } else {
                DatabaseFetchFailure::Other {
                    cause: error.to_string(),
                }
            }
        }
        _ => DatabaseFetchFailure::Other {
            cause: error.to_string(),
        },
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
