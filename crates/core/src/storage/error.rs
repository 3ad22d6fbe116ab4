use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Lookups that find nothing are not errors: they are reported as `None`,
/// `false` or an empty collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = RepositoryError::InvalidArgument("max_cache_size must be > 0".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid argument: max_cache_size must be > 0"
        );
    }

    #[test]
    fn test_operation_failed_display() {
        let error = RepositoryError::OperationFailed("backend unavailable".to_string());
        assert_eq!(error.to_string(), "Operation failed: backend unavailable");
    }
}
