//! Shared type definitions for rarity tiers, boost kinds, and calendar helpers

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Rarity tier of a store item / loot box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Rarity::Common),
            "rare" => Ok(Rarity::Rare),
            "legendary" => Ok(Rarity::Legendary),
            other => Err(Error::UnknownRarity(other.to_string())),
        }
    }
}

/// Kind of timed boost a reward can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostType {
    SpinMultiplier,
    VoteMultiplier,
    EarningsMultiplier,
}

impl BoostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostType::SpinMultiplier => "spin_multiplier",
            BoostType::VoteMultiplier => "vote_multiplier",
            BoostType::EarningsMultiplier => "earnings_multiplier",
        }
    }

    /// Display label used in reward strings
    pub fn label(&self) -> &'static str {
        match self {
            BoostType::SpinMultiplier => "Spin Multiplier",
            BoostType::VoteMultiplier => "Vote Multiplier",
            BoostType::EarningsMultiplier => "Earnings Multiplier",
        }
    }
}

impl fmt::Display for BoostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spin_multiplier" => Ok(BoostType::SpinMultiplier),
            "vote_multiplier" => Ok(BoostType::VoteMultiplier),
            "earnings_multiplier" => Ok(BoostType::EarningsMultiplier),
            other => Err(Error::UnknownBoostType(other.to_string())),
        }
    }
}

/// Lowercase full weekday name as stored in day-restriction allow-lists
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Weekend gate used by the weekend earnings multiplier
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
