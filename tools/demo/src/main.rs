//! End-to-end walkthrough of the reward library against an in-memory database

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use qrcade_core::{AvatarConfig, PerkData};
use qrcade_engine::earnings::{DEFAULT_SPIN_BASE, DEFAULT_VOTE_BASE};
use qrcade_engine::{calculate_spin_earnings, calculate_vote_earnings, open_loot_box, resolve_perks};
use qrcade_persistence::sqlite::{
    coin_balance, create_purchase, create_user, insert_store_item, seed_default_avatar,
    set_equipped_avatar, upsert_avatar_config, StoreItemRow,
};
use qrcade_persistence::Database;

const USER_ID: i64 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db = Database::connect_in_memory().await?;
    seed(&db).await?;

    let resolved = resolve_perks(&db, Some(USER_ID)).await;
    println!("Resolved avatar: {} (perks empty: {})", resolved.avatar_name, resolved.perks.is_empty());

    let vote = calculate_vote_earnings(&db, Some(USER_ID), DEFAULT_VOTE_BASE, 10).await;
    println!(
        "Vote earnings: base {} + bonus {} = {} QR coins",
        vote.base_amount, vote.bonus_amount, vote.total_amount
    );
    for note in &vote.perk_details {
        println!("  - {}", note);
    }

    let spin = calculate_spin_earnings(&db, Some(USER_ID), DEFAULT_SPIN_BASE, 0, 100).await;
    println!(
        "Spin earnings: base {} + bonus {} + prize {} = {} QR coins",
        spin.base_amount,
        spin.bonus_amount,
        spin.prize_amount.unwrap_or(0),
        spin.total_amount
    );

    let purchase_id = create_purchase(db.pool(), USER_ID, 100).await?;
    let mut rng = StdRng::from_entropy();
    let opened = open_loot_box(&db, USER_ID, purchase_id, &mut rng).await?;
    println!("Opened {} ({}):", opened.loot_box_name, opened.rarity);
    for reward in &opened.rewards {
        println!("  {} {}", reward.icon, reward.display);
    }

    println!("Coin balance: {}", coin_balance(db.pool(), USER_ID).await?);
    Ok(())
}

async fn seed(db: &Database) -> Result<()> {
    seed_default_avatar(db.pool()).await?;
    create_user(db.pool(), USER_ID, "demo_user").await?;

    upsert_avatar_config(
        db.pool(),
        &AvatarConfig {
            avatar_id: 12,
            name: "Lucky Pirate".to_string(),
            perk_data: Some(PerkData {
                vote_bonus: Some(5),
                spin_bonus: Some(10),
                activity_multiplier: Some(1.5),
                spin_prize_multiplier: Some(1.1),
                ..Default::default()
            }),
            day_restrictions: None,
            is_active: true,
        },
    )
    .await?;
    set_equipped_avatar(db.pool(), USER_ID, 12).await?;

    insert_store_item(
        db.pool(),
        &StoreItemRow {
            id: 100,
            name: "Legendary Loot Box".to_string(),
            item_type: "loot_box".to_string(),
            rarity: "legendary".to_string(),
            min_rewards: 3,
            max_rewards: 5,
            price_coins: 2500,
        },
    )
    .await?;

    Ok(())
}
