//! Loot box opening flow
//!
//! Opening runs inside a single storage transaction: precondition checks,
//! the active→used status transition, reward distribution, and the audit
//! record all commit together. Individual reward distributions follow the
//! best-effort policy: a failed distribution is logged and omitted from the
//! recorded reward list while the rest of the opening commits. Any other
//! storage error rolls the whole transaction back.

mod distributor;
mod generator;
mod tables;

pub use distributor::distribute;
pub use generator::{draw_reward, generate_rewards, is_good_reward};
pub use tables::{weight_table, RewardCategory};

use chrono::{DateTime, Utc};
use qrcade_core::{Error, LootBoxOpenResult, Result};
use qrcade_persistence::sqlite::{
    fetch_active_loot_box_purchase, insert_opening, mark_purchase_used, opening_exists,
};
use qrcade_persistence::Database;
use rand::Rng;

/// Open a purchased loot box at the current wall clock
pub async fn open_loot_box<R: Rng>(
    db: &Database,
    user_id: i64,
    purchase_id: i64,
    rng: &mut R,
) -> Result<LootBoxOpenResult> {
    open_loot_box_at(db, user_id, purchase_id, rng, Utc::now()).await
}

/// Open a purchased loot box against a caller-supplied instant
pub async fn open_loot_box_at<R: Rng>(
    db: &Database,
    user_id: i64,
    purchase_id: i64,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<LootBoxOpenResult> {
    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    let Some(purchase) = fetch_active_loot_box_purchase(&mut tx, user_id, purchase_id).await?
    else {
        return Err(Error::LootBoxUnavailable);
    };

    if opening_exists(&mut tx, purchase_id).await? {
        return Err(Error::LootBoxUnavailable);
    }

    mark_purchase_used(&mut tx, purchase_id).await?;

    let spec = purchase.loot_box_spec()?;
    let drawn = generate_rewards(&spec, rng);

    let mut distributed = Vec::with_capacity(drawn.len());
    for reward in drawn {
        match distribute(&mut tx, user_id, &reward, purchase_id, now).await {
            Ok(()) => distributed.push(reward),
            Err(e) => {
                tracing::warn!(
                    user_id,
                    purchase_id,
                    reward = %reward.display,
                    error = %e,
                    "reward distribution failed, skipping"
                );
            }
        }
    }

    insert_opening(&mut tx, user_id, purchase_id, purchase.item_id, &distributed).await?;

    tx.commit()
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    tracing::info!(
        user_id,
        purchase_id,
        loot_box = %spec.name,
        rarity = %spec.rarity,
        rewards = distributed.len(),
        "loot box opened"
    );

    Ok(LootBoxOpenResult {
        rewards: distributed,
        loot_box_name: spec.name,
        rarity: spec.rarity,
    })
}
