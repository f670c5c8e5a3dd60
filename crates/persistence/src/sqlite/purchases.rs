//! Store catalog and purchase persistence

use qrcade_core::{Error, LootBoxSpec, Rarity, Result};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

pub const ITEM_TYPE_LOOT_BOX: &str = "loot_box";

pub const PURCHASE_STATUS_ACTIVE: &str = "active";
pub const PURCHASE_STATUS_USED: &str = "used";

/// Store catalog item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoreItemRow {
    pub id: i64,
    pub name: String,
    pub item_type: String,
    pub rarity: String,
    pub min_rewards: i64,
    pub max_rewards: i64,
    pub price_coins: i64,
}

impl StoreItemRow {
    /// Parse the loot box draw configuration out of the catalog row
    pub fn loot_box_spec(&self) -> Result<LootBoxSpec> {
        let rarity: Rarity = self.rarity.parse()?;
        Ok(LootBoxSpec {
            name: self.name.clone(),
            rarity,
            min_rewards: self.min_rewards.max(1) as u32,
            max_rewards: self.max_rewards.max(self.min_rewards.max(1)) as u32,
        })
    }
}

/// A purchase joined with its catalog item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PurchaseWithItem {
    pub purchase_id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub status: String,
    pub name: String,
    pub item_type: String,
    pub rarity: String,
    pub min_rewards: i64,
    pub max_rewards: i64,
}

impl PurchaseWithItem {
    pub fn loot_box_spec(&self) -> Result<LootBoxSpec> {
        let rarity: Rarity = self.rarity.parse()?;
        Ok(LootBoxSpec {
            name: self.name.clone(),
            rarity,
            min_rewards: self.min_rewards.max(1) as u32,
            max_rewards: self.max_rewards.max(self.min_rewards.max(1)) as u32,
        })
    }
}

/// Insert a catalog item (admin/seed path)
pub async fn insert_store_item(pool: &SqlitePool, item: &StoreItemRow) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO store_items (id, name, item_type, rarity, min_rewards, max_rewards, price_coins)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id)
    .bind(&item.name)
    .bind(&item.item_type)
    .bind(&item.rarity)
    .bind(item.min_rewards)
    .bind(item.max_rewards)
    .bind(item.price_coins)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Fetch a catalog item by id
pub async fn get_store_item(pool: &SqlitePool, item_id: i64) -> Result<StoreItemRow> {
    sqlx::query_as::<_, StoreItemRow>(
        r#"
        SELECT id, name, item_type, rarity, min_rewards, max_rewards, price_coins
        FROM store_items
        WHERE id = ?
        "#,
    )
    .bind(item_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?
    .ok_or(Error::ItemNotFound(item_id))
}

/// Record a purchase in active status, returning its id
pub async fn create_purchase(pool: &SqlitePool, user_id: i64, item_id: i64) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO store_purchases (user_id, item_id, status) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(item_id)
    .bind(PURCHASE_STATUS_ACTIVE)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Fetch an openable loot box purchase: owned by the user, loot box item,
/// still active. Composes with an open transaction.
pub async fn fetch_active_loot_box_purchase(
    conn: &mut SqliteConnection,
    user_id: i64,
    purchase_id: i64,
) -> Result<Option<PurchaseWithItem>> {
    let row = sqlx::query_as::<_, PurchaseWithItem>(
        r#"
        SELECT p.id AS purchase_id, p.user_id, p.item_id, p.status,
               i.name, i.item_type, i.rarity, i.min_rewards, i.max_rewards
        FROM store_purchases p
        JOIN store_items i ON i.id = p.item_id
        WHERE p.id = ? AND p.user_id = ? AND p.status = ? AND i.item_type = ?
        "#,
    )
    .bind(purchase_id)
    .bind(user_id)
    .bind(PURCHASE_STATUS_ACTIVE)
    .bind(ITEM_TYPE_LOOT_BOX)
    .fetch_optional(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row)
}

/// Transition a purchase from active to used
pub async fn mark_purchase_used(conn: &mut SqliteConnection, purchase_id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE store_purchases SET status = ? WHERE id = ? AND status = ?")
        .bind(PURCHASE_STATUS_USED)
        .bind(purchase_id)
        .bind(PURCHASE_STATUS_ACTIVE)
        .execute(conn)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(Error::LootBoxUnavailable);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::users::create_user;
    use crate::Database;

    fn loot_box_item(id: i64, rarity: &str) -> StoreItemRow {
        StoreItemRow {
            id,
            name: format!("{} Loot Box", rarity),
            item_type: ITEM_TYPE_LOOT_BOX.to_string(),
            rarity: rarity.to_string(),
            min_rewards: 3,
            max_rewards: 5,
            price_coins: 500,
        }
    }

    #[tokio::test]
    async fn test_fetch_active_purchase_checks_owner_and_type() {
        let db = Database::connect_in_memory().await.unwrap();
        create_user(db.pool(), 1, "buyer").await.unwrap();
        create_user(db.pool(), 2, "other").await.unwrap();
        insert_store_item(db.pool(), &loot_box_item(10, "rare"))
            .await
            .unwrap();

        let purchase_id = create_purchase(db.pool(), 1, 10).await.unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        let found = fetch_active_loot_box_purchase(&mut conn, 1, purchase_id)
            .await
            .unwrap();
        assert!(found.is_some());
        let spec = found.unwrap().loot_box_spec().unwrap();
        assert_eq!(spec.rarity, Rarity::Rare);
        assert_eq!(spec.min_rewards, 3);

        // Wrong owner sees nothing
        let other = fetch_active_loot_box_purchase(&mut conn, 2, purchase_id)
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_mark_used_is_single_shot() {
        let db = Database::connect_in_memory().await.unwrap();
        create_user(db.pool(), 1, "buyer").await.unwrap();
        insert_store_item(db.pool(), &loot_box_item(10, "common"))
            .await
            .unwrap();
        let purchase_id = create_purchase(db.pool(), 1, 10).await.unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        mark_purchase_used(&mut conn, purchase_id).await.unwrap();

        let err = mark_purchase_used(&mut conn, purchase_id).await.unwrap_err();
        assert!(matches!(err, Error::LootBoxUnavailable));

        let gone = fetch_active_loot_box_purchase(&mut conn, 1, purchase_id)
            .await
            .unwrap();
        assert!(gone.is_none());
    }
}
