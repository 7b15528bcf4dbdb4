//! Row conversion functions.

use chrono::{DateTime, Utc};
use petadoptions_core::adoption::Transaction;
use petadoptions_core::storage::RepositoryError;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use super::error::map_sqlx_error;

/// Builds a transaction from column values.
pub fn transaction_from_columns(
    pet_id: String,
    adoption_date: DateTime<Utc>,
    transaction_id: &str,
    user_id: Option<String>,
) -> Result<Transaction, RepositoryError> {
    let transaction_id = Uuid::parse_str(transaction_id).map_err(|e| {
        RepositoryError::Serialization(format!("Invalid transaction id {transaction_id}: {e}"))
    })?;

    Ok(Transaction {
        pet_id,
        transaction_id,
        adoption_date,
        user_id: user_id.filter(|u| !u.is_empty()),
    })
}

/// Reads a `(pet_id, adoption_date, transaction_id, user_id)` row.
pub fn row_to_transaction(row: &PgRow) -> Result<Transaction, RepositoryError> {
    let get_err = |e| map_sqlx_error(e, "Transaction");

    let pet_id: String = row.try_get("pet_id").map_err(get_err)?;
    let adoption_date: DateTime<Utc> = row.try_get("adoption_date").map_err(get_err)?;
    let transaction_id: String = row.try_get("transaction_id").map_err(get_err)?;
    let user_id: Option<String> = row.try_get("user_id").map_err(get_err)?;

    transaction_from_columns(pet_id, adoption_date, &transaction_id, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_from_columns() {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let transaction =
            transaction_from_columns("001".to_string(), now, &id.to_string(), None).unwrap();

        assert_eq!(transaction.transaction_id, id);
        assert_eq!(transaction.adoption_date, now);
        assert_eq!(transaction.user_id, None);
    }

    #[test]
    fn test_empty_user_id_is_none() {
        let transaction = transaction_from_columns(
            "001".to_string(),
            Utc::now(),
            &Uuid::new_v4().to_string(),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(transaction.user_id, None);
    }

    #[test]
    fn test_invalid_transaction_id() {
        let result = transaction_from_columns("001".to_string(), Utc::now(), "not-a-uuid", None);
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }
}
