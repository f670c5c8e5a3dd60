//! Avatar configuration persistence

use qrcade_core::{AvatarConfig, DayRestrictions, Error, PerkData, Result};
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
struct AvatarConfigRow {
    avatar_id: i64,
    name: String,
    perk_data: Option<String>,
    day_restrictions: Option<String>,
    is_active: i64,
}

impl AvatarConfigRow {
    fn into_config(self) -> Result<AvatarConfig> {
        let perk_data = self
            .perk_data
            .as_deref()
            .map(serde_json::from_str::<PerkData>)
            .transpose()?;
        let day_restrictions = self
            .day_restrictions
            .as_deref()
            .map(serde_json::from_str::<DayRestrictions>)
            .transpose()?;

        Ok(AvatarConfig {
            avatar_id: self.avatar_id,
            name: self.name,
            perk_data,
            day_restrictions,
            is_active: self.is_active != 0,
        })
    }
}

/// Fetch an avatar config by id, only if it is active
pub async fn get_active_avatar_config(
    pool: &SqlitePool,
    avatar_id: i64,
) -> Result<Option<AvatarConfig>> {
    let row = sqlx::query_as::<_, AvatarConfigRow>(
        r#"
        SELECT avatar_id, name, perk_data, day_restrictions, is_active
        FROM avatar_configs
        WHERE avatar_id = ? AND is_active = 1
        "#,
    )
    .bind(avatar_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    row.map(AvatarConfigRow::into_config).transpose()
}

/// Insert or replace an avatar config (admin/seed path)
pub async fn upsert_avatar_config(pool: &SqlitePool, config: &AvatarConfig) -> Result<()> {
    let perk_data = config
        .perk_data
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let day_restrictions = config
        .day_restrictions
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    sqlx::query(
        r#"
        INSERT INTO avatar_configs (avatar_id, name, perk_data, day_restrictions, is_active)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(avatar_id) DO UPDATE SET
            name = excluded.name,
            perk_data = excluded.perk_data,
            day_restrictions = excluded.day_restrictions,
            is_active = excluded.is_active
        "#,
    )
    .bind(config.avatar_id)
    .bind(&config.name)
    .bind(perk_data)
    .bind(day_restrictions)
    .bind(config.is_active as i64)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Seed the baseline avatar so fresh databases resolve to it
pub async fn seed_default_avatar(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO avatar_configs (avatar_id, name, perk_data, day_restrictions, is_active)
        VALUES (?, ?, NULL, NULL, 1)
        "#,
    )
    .bind(qrcade_core::DEFAULT_AVATAR_ID)
    .bind(qrcade_core::DEFAULT_AVATAR_NAME)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}
