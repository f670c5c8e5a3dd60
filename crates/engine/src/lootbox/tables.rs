//! Reward category weight tables and amount ranges per rarity tier

use qrcade_core::Rarity;

/// Reward category drawn from a rarity-dependent weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardCategory {
    QrCoins,
    Spins,
    Votes,
    PremiumBoosts,
    MassiveQrCoins,
    PremiumSpins,
    PremiumVotes,
    ExclusiveBoosts,
    Avatars,
}

/// Category weights per rarity. Weights are relative; they need not sum to 100.
pub fn weight_table(rarity: Rarity) -> &'static [(RewardCategory, u32)] {
    match rarity {
        Rarity::Common => &[
            (RewardCategory::QrCoins, 50),
            (RewardCategory::Spins, 30),
            (RewardCategory::Votes, 20),
        ],
        Rarity::Rare => &[
            (RewardCategory::QrCoins, 40),
            (RewardCategory::Spins, 25),
            (RewardCategory::Votes, 20),
            (RewardCategory::PremiumBoosts, 15),
        ],
        Rarity::Legendary => &[
            (RewardCategory::MassiveQrCoins, 30),
            (RewardCategory::PremiumSpins, 25),
            (RewardCategory::PremiumVotes, 20),
            (RewardCategory::ExclusiveBoosts, 15),
            (RewardCategory::Avatars, 10),
        ],
    }
}

/// Base `[min, max]` amount range for amount-bearing categories
pub fn amount_range(category: RewardCategory) -> (i64, i64) {
    match category {
        RewardCategory::QrCoins => (25, 150),
        RewardCategory::Spins => (1, 4),
        RewardCategory::Votes => (1, 5),
        RewardCategory::MassiveQrCoins => (250, 600),
        RewardCategory::PremiumSpins => (5, 12),
        RewardCategory::PremiumVotes => (5, 10),
        // Boost and avatar categories carry no amount
        RewardCategory::PremiumBoosts
        | RewardCategory::ExclusiveBoosts
        | RewardCategory::Avatars => (0, 0),
    }
}

/// Rarity scaling applied on top of the base range (coins scale harder
/// than spins/votes)
pub fn rarity_scale(category: RewardCategory, rarity: Rarity) -> f64 {
    match (rarity, category) {
        (Rarity::Rare, RewardCategory::QrCoins) => 1.5,
        (Rarity::Rare, RewardCategory::Spins | RewardCategory::Votes) => 1.3,
        (Rarity::Legendary, RewardCategory::MassiveQrCoins) => 3.0,
        (Rarity::Legendary, RewardCategory::PremiumSpins | RewardCategory::PremiumVotes) => 2.0,
        _ => 1.0,
    }
}

/// Avatar ids grantable from the legendary avatars category
pub const LEGENDARY_AVATAR_POOL: &[i64] = &[21, 22, 23, 24, 25];

/// Guaranteed legendary backstop coin range
pub const LEGENDARY_BACKSTOP_COINS: (i64, i64) = (1000, 2000);
/// Guaranteed rare backstop: 2x spin multiplier for 48 hours
pub const RARE_BACKSTOP_MULTIPLIER: f64 = 2.0;
pub const RARE_BACKSTOP_HOURS: i64 = 48;

/// Thresholds below which a reward does not count as "good" for the backstop
pub const GOOD_COIN_THRESHOLD: i64 = 200;
pub const GOOD_SPIN_THRESHOLD: i64 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_tables_nonempty_and_positive() {
        for rarity in [Rarity::Common, Rarity::Rare, Rarity::Legendary] {
            let table = weight_table(rarity);
            assert!(!table.is_empty());
            assert!(table.iter().all(|(_, w)| *w > 0));
            let total: u32 = table.iter().map(|(_, w)| w).sum();
            assert_eq!(total, 100);
        }
    }

    #[test]
    fn test_amount_ranges_ordered() {
        for rarity in [Rarity::Common, Rarity::Rare, Rarity::Legendary] {
            for (category, _) in weight_table(rarity) {
                let (lo, hi) = amount_range(*category);
                assert!(lo <= hi);
            }
        }
    }
}
