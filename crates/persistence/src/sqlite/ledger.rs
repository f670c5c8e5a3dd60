//! Coin transaction ledger (append-only)

use qrcade_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

/// Ledger row stored in database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CoinTransactionRow {
    pub id: i64,
    pub user_id: i64,
    pub direction: String,
    pub category: String,
    pub amount: i64,
    pub description: String,
    pub metadata: String,
    pub reference_id: Option<i64>,
    pub reference_type: Option<String>,
    pub created_at: Option<String>,
}

/// A ledger entry to append
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub user_id: i64,
    pub category: String,
    pub amount: i64,
    pub description: String,
    pub metadata: serde_json::Value,
    pub reference_id: Option<i64>,
    pub reference_type: Option<String>,
}

impl LedgerEntry {
    pub fn new(user_id: i64, category: &str, amount: i64) -> Self {
        Self {
            user_id,
            category: category.to_string(),
            amount,
            description: String::new(),
            metadata: serde_json::json!({}),
            reference_id: None,
            reference_type: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_reference(mut self, reference_id: i64, reference_type: &str) -> Self {
        self.reference_id = Some(reference_id);
        self.reference_type = Some(reference_type.to_string());
        self
    }
}

async fn record(conn: &mut SqliteConnection, direction: &str, entry: &LedgerEntry) -> Result<i64> {
    let metadata = serde_json::to_string(&entry.metadata)?;
    let result = sqlx::query(
        r#"
        INSERT INTO coin_transactions
            (user_id, direction, category, amount, description, metadata, reference_id, reference_type)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.user_id)
    .bind(direction)
    .bind(&entry.category)
    .bind(entry.amount)
    .bind(&entry.description)
    .bind(metadata)
    .bind(entry.reference_id)
    .bind(entry.reference_type.as_deref())
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Append a credit entry; composes with an open transaction
pub async fn credit_coins_on(conn: &mut SqliteConnection, entry: &LedgerEntry) -> Result<i64> {
    record(conn, "credit", entry).await
}

/// Append a debit entry; composes with an open transaction
pub async fn debit_coins_on(conn: &mut SqliteConnection, entry: &LedgerEntry) -> Result<i64> {
    record(conn, "debit", entry).await
}

/// Append a credit entry using the pool
pub async fn credit_coins(pool: &SqlitePool, entry: &LedgerEntry) -> Result<i64> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;
    credit_coins_on(&mut conn, entry).await
}

/// Append a debit entry using the pool
pub async fn debit_coins(pool: &SqlitePool, entry: &LedgerEntry) -> Result<i64> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;
    debit_coins_on(&mut conn, entry).await
}

/// Fold the ledger into a current balance (credits minus debits)
pub async fn coin_balance(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let row: (Option<i64>,) = sqlx::query_as(
        r#"
        SELECT SUM(CASE WHEN direction = 'credit' THEN amount ELSE -amount END)
        FROM coin_transactions
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.0.unwrap_or(0))
}

/// Most recent ledger rows for a user, newest first
pub async fn recent_transactions(
    pool: &SqlitePool,
    user_id: i64,
    limit: u32,
) -> Result<Vec<CoinTransactionRow>> {
    let rows = sqlx::query_as::<_, CoinTransactionRow>(
        r#"
        SELECT id, user_id, direction, category, amount, description, metadata,
               reference_id, reference_type, created_at
        FROM coin_transactions
        WHERE user_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows)
}
