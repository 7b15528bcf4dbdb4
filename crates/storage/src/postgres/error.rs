//! Postgres error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `petadoptions_core::storage`.

use petadoptions_core::storage::RepositoryError;

/// Maps an sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - Unique violations → `RepositoryError::AlreadyExists`
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - Decode errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::AlreadyExists {
                entity_type,
                id: db_err.constraint().unwrap_or("unknown").to_string(),
            }
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: "unknown".to_string(),
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RepositoryError::ConnectionFailed(err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_connection_failure() {
        let mapped = map_sqlx_error(sqlx::Error::PoolTimedOut, "Transaction");
        assert!(matches!(mapped, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_row_not_found() {
        let mapped = map_sqlx_error(sqlx::Error::RowNotFound, "Transaction");
        assert_eq!(
            mapped,
            RepositoryError::NotFound {
                entity_type: "Transaction",
                id: "unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_other_errors_are_query_failures() {
        let mapped = map_sqlx_error(
            sqlx::Error::Protocol("unexpected message".to_string()),
            "Transaction",
        );
        assert!(matches!(mapped, RepositoryError::QueryFailed(_)));
    }
}
