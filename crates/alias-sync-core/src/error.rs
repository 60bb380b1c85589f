//! Sync error types
//!
//! Error definitions with transient/permanent classification for callers
//! that want to wrap the boundaries with retry logic.

use thiserror::Error;

/// Error that can occur during an identity sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The directory connection or bind could not be established.
    #[error("directory unavailable: {message}")]
    DirectoryUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The directory rejected the search (malformed filter, permission denial).
    #[error("directory query failed: {message}")]
    QueryError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The identity store failed a list/insert/delete call.
    #[error("identity store error: {message}")]
    StoreError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Sync configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl SyncError {
    /// Check if this error is transient and the run may succeed if repeated.
    ///
    /// Transient errors are caused by temporary conditions such as an
    /// unreachable directory server or a store hiccup. The core itself never
    /// retries; classification exists for callers wrapping the boundaries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SyncError::DirectoryUnavailable { .. } | SyncError::StoreError { .. }
        )
    }

    /// Check if this error is permanent and a retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::DirectoryUnavailable { .. } => "DIRECTORY_UNAVAILABLE",
            SyncError::QueryError { .. } => "QUERY_ERROR",
            SyncError::StoreError { .. } => "STORE_ERROR",
            SyncError::InvalidConfiguration { .. } => "INVALID_CONFIG",
        }
    }

    // Convenience constructors

    /// Create a directory unavailable error.
    pub fn directory_unavailable(message: impl Into<String>) -> Self {
        SyncError::DirectoryUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a directory unavailable error with source.
    pub fn directory_unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::DirectoryUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        SyncError::QueryError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a query error with source.
    pub fn query_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::QueryError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        SyncError::StoreError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::StoreError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        SyncError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
