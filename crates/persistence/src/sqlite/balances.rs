//! Spin, vote, and boost balances granted by rewards

use chrono::{DateTime, Duration, Utc};
use qrcade_core::{BoostType, Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

/// Spin bonuses stay claimable for 30 days after the latest grant
pub const SPIN_BONUS_EXPIRY_DAYS: i64 = 30;
/// Vote packs stay usable for 90 days
pub const VOTE_PACK_EXPIRY_DAYS: i64 = 90;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SpinBonusRow {
    pub user_id: i64,
    pub bonus_spins: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VotePackRow {
    pub id: i64,
    pub user_id: i64,
    pub votes_total: i64,
    pub votes_remaining: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActiveBoostRow {
    pub id: i64,
    pub user_id: i64,
    pub boost_type: String,
    pub multiplier: f64,
    pub duration_hours: i64,
    pub expires_at: DateTime<Utc>,
}

/// Grant bonus spins: additive if a record exists, expiry refreshed to
/// `now + 30 days` either way.
pub async fn grant_bonus_spins(
    conn: &mut SqliteConnection,
    user_id: i64,
    spins: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let expires_at = now + Duration::days(SPIN_BONUS_EXPIRY_DAYS);
    sqlx::query(
        r#"
        INSERT INTO user_spin_bonuses (user_id, bonus_spins, expires_at)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            bonus_spins = bonus_spins + excluded.bonus_spins,
            expires_at = excluded.expires_at
        "#,
    )
    .bind(user_id)
    .bind(spins)
    .bind(expires_at)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Unexpired bonus spins for a user
pub async fn active_bonus_spins(
    pool: &SqlitePool,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT bonus_spins FROM user_spin_bonuses WHERE user_id = ? AND expires_at > ?",
    )
    .bind(user_id)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(|r| r.0).unwrap_or(0))
}

/// Insert a vote pack with all votes remaining and a 90-day expiry
pub async fn insert_vote_pack(
    conn: &mut SqliteConnection,
    user_id: i64,
    votes: i64,
    now: DateTime<Utc>,
) -> Result<i64> {
    let expires_at = now + Duration::days(VOTE_PACK_EXPIRY_DAYS);
    let result = sqlx::query(
        r#"
        INSERT INTO user_vote_packs (user_id, votes_total, votes_remaining, expires_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(votes)
    .bind(votes)
    .bind(expires_at)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Unexpired vote packs with votes left, oldest expiry first
pub async fn active_vote_packs(
    pool: &SqlitePool,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<VotePackRow>> {
    let rows = sqlx::query_as::<_, VotePackRow>(
        r#"
        SELECT id, user_id, votes_total, votes_remaining, expires_at
        FROM user_vote_packs
        WHERE user_id = ? AND expires_at > ? AND votes_remaining > 0
        ORDER BY expires_at ASC
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows)
}

/// Insert a timed boost expiring after its duration
pub async fn insert_boost(
    conn: &mut SqliteConnection,
    user_id: i64,
    boost_type: BoostType,
    multiplier: f64,
    duration_hours: i64,
    now: DateTime<Utc>,
) -> Result<i64> {
    let expires_at = now + Duration::hours(duration_hours);
    let result = sqlx::query(
        r#"
        INSERT INTO user_active_boosts (user_id, boost_type, multiplier, duration_hours, expires_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(boost_type.as_str())
    .bind(multiplier)
    .bind(duration_hours)
    .bind(expires_at)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Unexpired boosts for a user
pub async fn active_boosts(
    pool: &SqlitePool,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<ActiveBoostRow>> {
    let rows = sqlx::query_as::<_, ActiveBoostRow>(
        r#"
        SELECT id, user_id, boost_type, multiplier, duration_hours, expires_at
        FROM user_active_boosts
        WHERE user_id = ? AND expires_at > ?
        ORDER BY expires_at ASC
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows)
}

/// Record an avatar unlock; repeat grants are no-ops
pub async fn unlock_avatar(
    conn: &mut SqliteConnection,
    user_id: i64,
    avatar_id: i64,
) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO user_avatar_unlocks (user_id, avatar_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(avatar_id)
        .execute(conn)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Avatar ids a user has unlocked
pub async fn unlocked_avatars(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT avatar_id FROM user_avatar_unlocks WHERE user_id = ? ORDER BY avatar_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}
