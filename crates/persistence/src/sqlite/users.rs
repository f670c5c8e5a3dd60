//! User persistence operations

use qrcade_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User record stored in database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub equipped_avatar: Option<i64>,
}

/// Create a user; id is assigned by the caller (platform user ids)
pub async fn create_user(pool: &SqlitePool, id: i64, username: &str) -> Result<()> {
    sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
        .bind(id)
        .bind(username)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Fetch a user by id
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, equipped_avatar FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row)
}

/// Get the avatar id a user currently has equipped, if any
pub async fn equipped_avatar_id(pool: &SqlitePool, user_id: i64) -> Result<Option<i64>> {
    let row: Option<(Option<i64>,)> =
        sqlx::query_as("SELECT equipped_avatar FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.and_then(|r| r.0))
}

/// Equip an avatar for a user
pub async fn set_equipped_avatar(pool: &SqlitePool, user_id: i64, avatar_id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE users SET equipped_avatar = ? WHERE id = ?")
        .bind(avatar_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(Error::UserNotFound(user_id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_create_and_equip() {
        let db = Database::connect_in_memory().await.unwrap();
        create_user(db.pool(), 42, "vend_rat").await.unwrap();

        assert_eq!(equipped_avatar_id(db.pool(), 42).await.unwrap(), None);

        set_equipped_avatar(db.pool(), 42, 7).await.unwrap();
        assert_eq!(equipped_avatar_id(db.pool(), 42).await.unwrap(), Some(7));

        let user = get_user(db.pool(), 42).await.unwrap().unwrap();
        assert_eq!(user.username, "vend_rat");
    }

    #[tokio::test]
    async fn test_equip_unknown_user() {
        let db = Database::connect_in_memory().await.unwrap();
        let err = set_equipped_avatar(db.pool(), 99, 1).await.unwrap_err();
        assert!(matches!(err, Error::UserNotFound(99)));
    }
}
