//! Postgres transactions and history repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use petadoptions_core::adoption::Transaction;
use petadoptions_core::storage::{HistoryRepository, Result, TransactionRepository};

use super::conversions::row_to_transaction;
use super::error::map_sqlx_error;
use super::schema::{
    ARCHIVE_TRANSACTIONS, COUNT_HISTORY, CREATE_TRANSACTIONS, CREATE_TRANSACTIONS_HISTORY,
    DELETE_HISTORY, DELETE_TRANSACTIONS, INSERT_HISTORY, INSERT_TRANSACTION, SELECT_HISTORY,
    SELECT_LATEST_TRANSACTIONS,
};

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Postgres-backed transactions and history tables.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Wraps an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url`.
    ///
    /// The connection is lazy: the first query opens it, so a service can
    /// start while the database is still unreachable.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(url)
            .map_err(|e| map_sqlx_error(e, "Connection"))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl TransactionRepository for PostgresRepository {
    async fn create_tables(&self) -> Result<()> {
        for statement in [CREATE_TRANSACTIONS, CREATE_TRANSACTIONS_HISTORY] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, "Table"))?;
        }

        tracing::info!("Transactions tables ready");
        Ok(())
    }

    async fn create_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(INSERT_TRANSACTION)
            .bind(&transaction.pet_id)
            .bind(transaction.adoption_date)
            .bind(transaction.transaction_id.to_string())
            .bind(transaction.user_id.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?;

        Ok(())
    }

    async fn latest_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(SELECT_LATEST_TRANSACTIONS)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?;

        rows.iter().map(row_to_transaction).collect()
    }

    async fn archive_transactions(&self) -> Result<u64> {
        let map_err = |e| map_sqlx_error(e, "Transaction");

        let mut tx = self.pool.begin().await.map_err(map_err)?;

        let archived = sqlx::query(ARCHIVE_TRANSACTIONS)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?
            .rows_affected();

        sqlx::query(DELETE_TRANSACTIONS)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;

        tx.commit().await.map_err(map_err)?;

        tracing::info!(archived, "Transactions archived");
        Ok(archived)
    }
}

#[async_trait]
impl HistoryRepository for PostgresRepository {
    async fn list_history(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(SELECT_HISTORY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?;

        rows.iter().map(row_to_transaction).collect()
    }

    async fn clear_history(&self) -> Result<u64> {
        let deleted = sqlx::query(DELETE_HISTORY)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?
            .rows_affected();

        tracing::info!(deleted, "Transaction history cleared");
        Ok(deleted)
    }

    async fn count_history(&self) -> Result<i64> {
        let row = sqlx::query(COUNT_HISTORY)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?;

        row.try_get::<i64, _>(0)
            .map_err(|e| map_sqlx_error(e, "Transaction"))
    }

    async fn record_history(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(INSERT_HISTORY)
            .bind(&transaction.pet_id)
            .bind(transaction.adoption_date)
            .bind(transaction.transaction_id.to_string())
            .bind(transaction.user_id.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?;

        Ok(())
    }
}
