//! Postgres schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// Creates the transactions table.
pub const CREATE_TRANSACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id SERIAL PRIMARY KEY,
    pet_id VARCHAR NOT NULL,
    adoption_date TIMESTAMPTZ NOT NULL,
    transaction_id VARCHAR NOT NULL,
    user_id VARCHAR
)
"#;

/// Creates the transactions history table.
pub const CREATE_TRANSACTIONS_HISTORY: &str = r#"
CREATE TABLE IF NOT EXISTS transactions_history (
    id SERIAL PRIMARY KEY,
    pet_id VARCHAR NOT NULL,
    adoption_date TIMESTAMPTZ NOT NULL,
    transaction_id VARCHAR NOT NULL,
    user_id VARCHAR
)
"#;

pub const INSERT_TRANSACTION: &str = r#"
INSERT INTO transactions (pet_id, adoption_date, transaction_id, user_id)
VALUES ($1, $2, $3, $4)
"#;

pub const SELECT_LATEST_TRANSACTIONS: &str = r#"
SELECT pet_id, adoption_date, transaction_id, user_id
FROM transactions
ORDER BY id DESC
LIMIT $1
"#;

pub const ARCHIVE_TRANSACTIONS: &str = r#"
INSERT INTO transactions_history (pet_id, adoption_date, transaction_id, user_id)
SELECT pet_id, adoption_date, transaction_id, user_id
FROM transactions
ORDER BY id
"#;

pub const DELETE_TRANSACTIONS: &str = "DELETE FROM transactions";

pub const INSERT_HISTORY: &str = r#"
INSERT INTO transactions_history (pet_id, adoption_date, transaction_id, user_id)
VALUES ($1, $2, $3, $4)
"#;

pub const SELECT_HISTORY: &str = r#"
SELECT pet_id, adoption_date, transaction_id, user_id
FROM transactions_history
ORDER BY id
"#;

pub const DELETE_HISTORY: &str = "DELETE FROM transactions_history";

pub const COUNT_HISTORY: &str = "SELECT count(*) FROM transactions_history";
