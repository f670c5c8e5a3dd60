//! Perk Resolver - decides which avatar perks are active for a user right now
//!
//! Resolution never fails: storage errors, missing users, and inactive
//! configs all degrade to the baseline avatar with no perks, logged for
//! diagnostics. Day restrictions fully suppress all perks.

use chrono::{DateTime, Datelike, Utc};
use qrcade_core::{weekday_name, ResolvedPerkSet, Result, DEFAULT_AVATAR_ID};
use qrcade_persistence::sqlite::{equipped_avatar_id, get_active_avatar_config};
use qrcade_persistence::Database;

/// Resolve the active perk set for a user against the current wall clock
pub async fn resolve_perks(db: &Database, user_id: Option<i64>) -> ResolvedPerkSet {
    resolve_perks_at(db, user_id, Utc::now()).await
}

/// Resolve the active perk set against a caller-supplied instant
pub async fn resolve_perks_at(
    db: &Database,
    user_id: Option<i64>,
    now: DateTime<Utc>,
) -> ResolvedPerkSet {
    let Some(user_id) = user_id.filter(|id| *id > 0) else {
        return ResolvedPerkSet::fallback();
    };

    match try_resolve(db, user_id, now).await {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "perk resolution failed, using defaults");
            ResolvedPerkSet::fallback()
        }
    }
}

async fn try_resolve(db: &Database, user_id: i64, now: DateTime<Utc>) -> Result<ResolvedPerkSet> {
    let avatar_id = equipped_avatar_id(db.pool(), user_id)
        .await?
        .unwrap_or(DEFAULT_AVATAR_ID);

    let Some(config) = get_active_avatar_config(db.pool(), avatar_id).await? else {
        return Ok(ResolvedPerkSet::fallback());
    };

    if let Some(restrictions) = &config.day_restrictions {
        let today = weekday_name(now.weekday());
        if !restrictions.active_days.is_empty()
            && !restrictions.active_days.iter().any(|d| d == today)
        {
            return Ok(ResolvedPerkSet::restricted(
                config.name,
                restrictions.description.clone(),
            ));
        }
    }

    Ok(ResolvedPerkSet::active(
        config.name,
        config.perk_data.unwrap_or_default(),
    ))
}
