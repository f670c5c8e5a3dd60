//! Loot box opening audit records (append-only)

use qrcade_core::{Error, LootBoxReward, Result};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

/// Audit row for one opened loot box
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LootBoxOpeningRow {
    pub id: i64,
    pub user_id: i64,
    pub purchase_id: i64,
    pub item_id: i64,
    pub rewards: String,
    pub total_rewards: i64,
    pub opened_at: Option<String>,
}

impl LootBoxOpeningRow {
    /// Deserialize the recorded reward list
    pub fn reward_list(&self) -> Result<Vec<LootBoxReward>> {
        Ok(serde_json::from_str(&self.rewards)?)
    }
}

/// Whether an opening record already exists for a purchase
pub async fn opening_exists(conn: &mut SqliteConnection, purchase_id: i64) -> Result<bool> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM loot_box_openings WHERE purchase_id = ?")
            .bind(purchase_id)
            .fetch_one(conn)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.0 > 0)
}

/// Record an opening with its full reward list. The UNIQUE constraint on
/// purchase_id backs up the pre-check under concurrent opens.
pub async fn insert_opening(
    conn: &mut SqliteConnection,
    user_id: i64,
    purchase_id: i64,
    item_id: i64,
    rewards: &[LootBoxReward],
) -> Result<i64> {
    let serialized = serde_json::to_string(rewards)?;
    let result = sqlx::query(
        r#"
        INSERT INTO loot_box_openings (user_id, purchase_id, item_id, rewards, total_rewards)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(purchase_id)
    .bind(item_id)
    .bind(serialized)
    .bind(rewards.len() as i64)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Fetch the audit record for a purchase, if it was opened
pub async fn get_opening(pool: &SqlitePool, purchase_id: i64) -> Result<Option<LootBoxOpeningRow>> {
    let row = sqlx::query_as::<_, LootBoxOpeningRow>(
        r#"
        SELECT id, user_id, purchase_id, item_id, rewards, total_rewards, opened_at
        FROM loot_box_openings
        WHERE purchase_id = ?
        "#,
    )
    .bind(purchase_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::purchases::{create_purchase, insert_store_item, StoreItemRow};
    use crate::sqlite::users::create_user;
    use crate::Database;
    use qrcade_core::{Rarity, Reward};

    #[tokio::test]
    async fn test_opening_round_trip_and_uniqueness() {
        let db = Database::connect_in_memory().await.unwrap();
        create_user(db.pool(), 1, "opener").await.unwrap();
        insert_store_item(
            db.pool(),
            &StoreItemRow {
                id: 10,
                name: "Rare Loot Box".to_string(),
                item_type: "loot_box".to_string(),
                rarity: "rare".to_string(),
                min_rewards: 3,
                max_rewards: 5,
                price_coins: 500,
            },
        )
        .await
        .unwrap();
        let purchase_id = create_purchase(db.pool(), 1, 10).await.unwrap();

        let rewards = vec![
            LootBoxReward::drawn(Reward::QrCoins { amount: 250 }, Rarity::Rare),
            LootBoxReward::drawn(Reward::Votes { amount: 4 }, Rarity::Rare),
        ];

        let mut conn = db.pool().acquire().await.unwrap();
        assert!(!opening_exists(&mut conn, purchase_id).await.unwrap());
        insert_opening(&mut conn, 1, purchase_id, 10, &rewards)
            .await
            .unwrap();
        assert!(opening_exists(&mut conn, purchase_id).await.unwrap());

        // UNIQUE(purchase_id) rejects a second audit row outright
        let dup = insert_opening(&mut conn, 1, purchase_id, 10, &rewards).await;
        assert!(dup.is_err());
        drop(conn);

        let row = get_opening(db.pool(), purchase_id).await.unwrap().unwrap();
        assert_eq!(row.total_rewards, 2);
        assert_eq!(row.reward_list().unwrap(), rewards);
    }
}
