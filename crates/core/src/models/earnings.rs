//! Earnings result models produced by the vote/spin calculators

use serde::{Deserialize, Serialize};

/// Output of applying a resolved perk set to a base/bonus/(prize) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsResult {
    /// Base payout after adjustments (never negative)
    pub base_amount: i64,
    /// Bonus payout after adjustments (never negative)
    pub bonus_amount: i64,
    /// Prize payout after adjustments, spin path only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_amount: Option<i64>,
    /// Always the exact sum of the amounts above
    pub total_amount: i64,
    /// Human-readable notes for each adjustment, in application order
    pub perk_details: Vec<String>,
    pub avatar_name: String,
    pub day_restricted: bool,
}

impl EarningsResult {
    /// Recompute the total from the component amounts
    pub fn sum(&self) -> i64 {
        self.base_amount + self.bonus_amount + self.prize_amount.unwrap_or(0)
    }
}
