use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(LoopId);
define_id!(UserId);
define_id!(CheckInId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    LoopNotFound = 2001,
    RecordNotFound = 2002,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DuplicateRecord = 4002,
    DataIntegrityError = 4003,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    TimeoutError = 5003,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::LoopNotFound | ErrorCode::RecordNotFound | ErrorCode::ValidationError => {
                ErrorSeverity::Info
            }

            ErrorCode::DuplicateRecord | ErrorCode::TimeoutError => ErrorSeverity::Warning,

            ErrorCode::RepositoryError
            | ErrorCode::DataIntegrityError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::TimeoutError | ErrorCode::DuplicateRecord | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Loop not found: {0}")]
    LoopNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A write collided with a uniqueness constraint.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::LoopNotFound(_) => ErrorCode::LoopNotFound,
            DomainError::NotFound(_) => ErrorCode::RecordNotFound,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::Conflict(_) => ErrorCode::DuplicateRecord,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::LoopNotFound(msg)
            | DomainError::NotFound(msg)
            | DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Timeout(msg)
            | DomainError::DataIntegrity(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(_))
    }

    /// Ledger or loop store unavailable, failing or too slow.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Repository(_) | DomainError::Infrastructure(_) | DomainError::Timeout(_)
        )
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
