//! Loot box reward models

use serde::{Deserialize, Serialize};

use crate::types::{BoostType, Rarity};

/// One reward unit, dispatched exhaustively by the distributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reward {
    QrCoins { amount: i64 },
    Spins { amount: i64 },
    Votes { amount: i64 },
    Boost {
        boost_type: BoostType,
        multiplier: f64,
        duration_hours: i64,
    },
    Avatar { avatar_id: i64 },
}

impl Reward {
    /// Formatted display string shown to the user
    pub fn display(&self) -> String {
        match self {
            Reward::QrCoins { amount } => format!("{} QR Coins", amount),
            Reward::Spins { amount } => format!("{} Bonus Spins", amount),
            Reward::Votes { amount } => format!("{} Extra Votes", amount),
            Reward::Boost {
                boost_type,
                multiplier,
                duration_hours,
            } => format!(
                "{}x {} ({}h)",
                multiplier,
                boost_type.label(),
                duration_hours
            ),
            Reward::Avatar { .. } => "Exclusive Avatar".to_string(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Reward::QrCoins { .. } => "🪙",
            Reward::Spins { .. } => "🎰",
            Reward::Votes { .. } => "🗳️",
            Reward::Boost { .. } => "⚡",
            Reward::Avatar { .. } => "🎭",
        }
    }
}

/// One drawn reward with its presentation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootBoxReward {
    #[serde(flatten)]
    pub reward: Reward,
    pub rarity: Rarity,
    /// True for the guaranteed-minimum backstop reward
    #[serde(default)]
    pub guaranteed: bool,
    pub display: String,
    pub icon: String,
}

impl LootBoxReward {
    pub fn drawn(reward: Reward, rarity: Rarity) -> Self {
        let display = reward.display();
        let icon = reward.icon().to_string();
        Self {
            reward,
            rarity,
            guaranteed: false,
            display,
            icon,
        }
    }

    pub fn guaranteed(reward: Reward, rarity: Rarity) -> Self {
        let display = format!("{} (GUARANTEED)", reward.display());
        let icon = reward.icon().to_string();
        Self {
            reward,
            rarity,
            guaranteed: true,
            display,
            icon,
        }
    }
}

/// Per-item loot box configuration read from the store catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootBoxSpec {
    pub name: String,
    pub rarity: Rarity,
    pub min_rewards: u32,
    pub max_rewards: u32,
}

impl LootBoxSpec {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            min_rewards: 3,
            max_rewards: 5,
        }
    }
}

/// Successful opening: the distributed rewards plus box metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootBoxOpenResult {
    pub rewards: Vec<LootBoxReward>,
    pub loot_box_name: String,
    pub rarity: Rarity,
}
