//! Loot Box Reward Generator - weighted randomized draws with a
//! guaranteed-minimum backstop for non-common tiers
//!
//! All draws take a caller-supplied `Rng` so tests can pin the sequence with
//! a seeded generator.

use qrcade_core::{BoostType, LootBoxReward, LootBoxSpec, Rarity, Reward};
use rand::Rng;

use super::tables::{
    amount_range, rarity_scale, weight_table, RewardCategory, GOOD_COIN_THRESHOLD,
    GOOD_SPIN_THRESHOLD, LEGENDARY_AVATAR_POOL, LEGENDARY_BACKSTOP_COINS, RARE_BACKSTOP_HOURS,
    RARE_BACKSTOP_MULTIPLIER,
};

/// Draw the full reward bundle for one box opening
pub fn generate_rewards<R: Rng>(spec: &LootBoxSpec, rng: &mut R) -> Vec<LootBoxReward> {
    let count = rng.gen_range(spec.min_rewards..=spec.max_rewards);
    let mut rewards: Vec<LootBoxReward> = (0..count)
        .map(|_| draw_reward(spec.rarity, rng))
        .collect();

    // Non-common tiers always contain at least one reward worth the price
    if spec.rarity != Rarity::Common && !rewards.iter().any(is_good_reward) {
        if let Some(guaranteed) = backstop_reward(spec.rarity, rng) {
            rewards.push(guaranteed);
        }
    }

    rewards
}

/// One weighted draw: pick a category, then roll its payload
pub fn draw_reward<R: Rng>(rarity: Rarity, rng: &mut R) -> LootBoxReward {
    let category = draw_category(rarity, rng);
    let reward = roll_payload(category, rarity, rng);
    LootBoxReward::drawn(reward, rarity)
}

fn draw_category<R: Rng>(rarity: Rarity, rng: &mut R) -> RewardCategory {
    let table = weight_table(rarity);
    let total: u32 = table.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen_range(0..total);
    for (category, weight) in table {
        if roll < *weight {
            return *category;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

fn roll_amount<R: Rng>(category: RewardCategory, rarity: Rarity, rng: &mut R) -> i64 {
    let (lo, hi) = amount_range(category);
    let amount = rng.gen_range(lo..=hi);
    (amount as f64 * rarity_scale(category, rarity)).round() as i64
}

fn roll_payload<R: Rng>(category: RewardCategory, rarity: Rarity, rng: &mut R) -> Reward {
    match category {
        RewardCategory::QrCoins | RewardCategory::MassiveQrCoins => Reward::QrCoins {
            amount: roll_amount(category, rarity, rng),
        },
        RewardCategory::Spins | RewardCategory::PremiumSpins => Reward::Spins {
            amount: roll_amount(category, rarity, rng),
        },
        RewardCategory::Votes | RewardCategory::PremiumVotes => Reward::Votes {
            amount: roll_amount(category, rarity, rng),
        },
        RewardCategory::PremiumBoosts => Reward::Boost {
            boost_type: if rng.gen_bool(0.5) {
                BoostType::SpinMultiplier
            } else {
                BoostType::VoteMultiplier
            },
            multiplier: if rng.gen_bool(0.5) { 1.5 } else { 2.0 },
            duration_hours: 24,
        },
        RewardCategory::ExclusiveBoosts => Reward::Boost {
            boost_type: match rng.gen_range(0..3) {
                0 => BoostType::SpinMultiplier,
                1 => BoostType::VoteMultiplier,
                _ => BoostType::EarningsMultiplier,
            },
            multiplier: if rng.gen_bool(0.5) { 2.0 } else { 3.0 },
            duration_hours: 72,
        },
        RewardCategory::Avatars => Reward::Avatar {
            avatar_id: LEGENDARY_AVATAR_POOL[rng.gen_range(0..LEGENDARY_AVATAR_POOL.len())],
        },
    }
}

/// A reward that justifies a non-common box on its own: any boost, a large
/// coin payout, or a meaningful spin count
pub fn is_good_reward(reward: &LootBoxReward) -> bool {
    match &reward.reward {
        Reward::Boost { .. } => true,
        Reward::QrCoins { amount } => *amount >= GOOD_COIN_THRESHOLD,
        Reward::Spins { amount } => *amount >= GOOD_SPIN_THRESHOLD,
        Reward::Votes { .. } | Reward::Avatar { .. } => false,
    }
}

fn backstop_reward<R: Rng>(rarity: Rarity, rng: &mut R) -> Option<LootBoxReward> {
    match rarity {
        Rarity::Common => None,
        Rarity::Rare => Some(LootBoxReward::guaranteed(
            Reward::Boost {
                boost_type: BoostType::SpinMultiplier,
                multiplier: RARE_BACKSTOP_MULTIPLIER,
                duration_hours: RARE_BACKSTOP_HOURS,
            },
            rarity,
        )),
        Rarity::Legendary => {
            let (lo, hi) = LEGENDARY_BACKSTOP_COINS;
            Some(LootBoxReward::guaranteed(
                Reward::QrCoins {
                    amount: rng.gen_range(lo..=hi),
                },
                rarity,
            ))
        }
    }
}
