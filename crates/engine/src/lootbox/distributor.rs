//! Reward Distributor - credits a generated reward to the correct ledger

use chrono::{DateTime, Utc};
use qrcade_core::{LootBoxReward, Result, Reward};
use qrcade_persistence::sqlite::{
    credit_coins_on, grant_bonus_spins, insert_boost, insert_vote_pack, unlock_avatar, LedgerEntry,
};
use sqlx::SqliteConnection;

/// Ledger category for coins granted by loot boxes
pub const CATEGORY_LOOT_BOX_REWARD: &str = "loot_box_reward";
/// Reference type linking ledger rows back to the purchase
pub const REFERENCE_STORE_PURCHASE: &str = "store_purchase";

/// Credit one reward to the matching persistent balance. Composes with the
/// opening transaction; the caller decides what a failure means.
pub async fn distribute(
    conn: &mut SqliteConnection,
    user_id: i64,
    reward: &LootBoxReward,
    purchase_id: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    match &reward.reward {
        Reward::QrCoins { amount } => {
            let entry = LedgerEntry::new(user_id, CATEGORY_LOOT_BOX_REWARD, *amount)
                .with_description(&reward.display)
                .with_reference(purchase_id, REFERENCE_STORE_PURCHASE);
            credit_coins_on(conn, &entry).await?;
        }
        Reward::Spins { amount } => {
            grant_bonus_spins(conn, user_id, *amount, now).await?;
        }
        Reward::Votes { amount } => {
            insert_vote_pack(conn, user_id, *amount, now).await?;
        }
        Reward::Boost {
            boost_type,
            multiplier,
            duration_hours,
        } => {
            insert_boost(conn, user_id, *boost_type, *multiplier, *duration_hours, now).await?;
        }
        Reward::Avatar { avatar_id } => {
            unlock_avatar(conn, user_id, *avatar_id).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrcade_core::{BoostType, Rarity};
    use qrcade_persistence::sqlite::{
        active_bonus_spins, active_boosts, active_vote_packs, coin_balance, create_user,
        recent_transactions, unlocked_avatars,
    };
    use qrcade_persistence::Database;

    async fn setup() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        create_user(db.pool(), 1, "distributee").await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_each_variant_lands_in_its_ledger() {
        let db = setup().await;
        let now = Utc::now();
        let rewards = [
            LootBoxReward::drawn(Reward::QrCoins { amount: 300 }, Rarity::Rare),
            LootBoxReward::drawn(Reward::Spins { amount: 4 }, Rarity::Rare),
            LootBoxReward::drawn(Reward::Votes { amount: 6 }, Rarity::Rare),
            LootBoxReward::drawn(
                Reward::Boost {
                    boost_type: BoostType::VoteMultiplier,
                    multiplier: 1.5,
                    duration_hours: 24,
                },
                Rarity::Rare,
            ),
            LootBoxReward::drawn(Reward::Avatar { avatar_id: 22 }, Rarity::Legendary),
        ];

        let mut conn = db.pool().acquire().await.unwrap();
        for reward in &rewards {
            distribute(&mut conn, 1, reward, 77, now).await.unwrap();
        }
        drop(conn);

        assert_eq!(coin_balance(db.pool(), 1).await.unwrap(), 300);
        assert_eq!(active_bonus_spins(db.pool(), 1, now).await.unwrap(), 4);

        let packs = active_vote_packs(db.pool(), 1, now).await.unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].votes_total, 6);
        assert_eq!(packs[0].votes_remaining, 6);

        let boosts = active_boosts(db.pool(), 1, now).await.unwrap();
        assert_eq!(boosts.len(), 1);
        assert_eq!(boosts[0].boost_type, "vote_multiplier");
        assert_eq!(boosts[0].multiplier, 1.5);

        assert_eq!(unlocked_avatars(db.pool(), 1).await.unwrap(), vec![22]);
    }

    #[tokio::test]
    async fn test_coin_reward_references_purchase() {
        let db = setup().await;
        let reward = LootBoxReward::drawn(Reward::QrCoins { amount: 120 }, Rarity::Common);

        let mut conn = db.pool().acquire().await.unwrap();
        distribute(&mut conn, 1, &reward, 55, Utc::now()).await.unwrap();
        drop(conn);

        let rows = recent_transactions(db.pool(), 1, 5).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, CATEGORY_LOOT_BOX_REWARD);
        assert_eq!(rows[0].reference_id, Some(55));
        assert_eq!(
            rows[0].reference_type.as_deref(),
            Some(REFERENCE_STORE_PURCHASE)
        );
        assert_eq!(rows[0].description, "120 QR Coins");
    }
}
