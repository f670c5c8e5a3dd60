//! Earnings Calculator - applies a resolved perk set to vote/spin payouts
//!
//! The adjustment order is fixed: flat bonus, then (spins) prize multiplier,
//! then activity multiplier, then (votes) daily bonus multiplier, then the
//! weekend multiplier. A day-restricted resolution carries empty perks, so
//! every step is a no-op without any special-case branch.

use chrono::{DateTime, Datelike, Utc, Weekday};
use qrcade_core::{is_weekend, EarningsResult, ResolvedPerkSet};
use qrcade_persistence::Database;

use crate::perks::resolve_perks_at;

/// Default base payout for a vote, in QR coins
pub const DEFAULT_VOTE_BASE: i64 = 5;
/// Default base payout for a spin, in QR coins
pub const DEFAULT_SPIN_BASE: i64 = 15;

fn scale(amount: i64, multiplier: f64) -> i64 {
    (amount as f64 * multiplier).round() as i64
}

/// Apply vote perks to a base/bonus pair. Pure function over the resolved set.
pub fn apply_vote_perks(
    resolved: &ResolvedPerkSet,
    base: i64,
    bonus: i64,
    today: Weekday,
) -> EarningsResult {
    let mut base = base.max(0);
    let mut bonus = bonus.max(0);
    let mut perk_details = Vec::new();
    let perks = &resolved.perks;

    if let Some(flat) = perks.vote_bonus {
        base = (base + flat).max(0);
        perk_details.push(format!("{}: +{} QR coins per vote", resolved.avatar_name, flat));
    }

    if let Some(mult) = perks.activity_multiplier {
        base = scale(base, mult);
        bonus = scale(bonus, mult);
        perk_details.push(format!("Activity multiplier: x{}", mult));
    }

    if let Some(mult) = perks.daily_bonus_multiplier {
        if bonus > 0 {
            bonus = scale(bonus, mult);
            perk_details.push(format!("Daily bonus multiplier: x{}", mult));
        }
    }

    if let Some(mult) = perks.weekend_earnings_multiplier {
        if is_weekend(today) {
            base = scale(base, mult);
            bonus = scale(bonus, mult);
            perk_details.push(format!("Weekend earnings: x{}", mult));
        }
    }

    EarningsResult {
        base_amount: base,
        bonus_amount: bonus,
        prize_amount: None,
        total_amount: base + bonus,
        perk_details,
        avatar_name: resolved.avatar_name.clone(),
        day_restricted: resolved.day_restricted,
    }
}

/// Apply spin perks to a base/bonus/prize triple. Pure function over the
/// resolved set.
pub fn apply_spin_perks(
    resolved: &ResolvedPerkSet,
    base: i64,
    bonus: i64,
    prize: i64,
    today: Weekday,
) -> EarningsResult {
    let mut base = base.max(0);
    let mut bonus = bonus.max(0);
    let mut prize = prize.max(0);
    let mut perk_details = Vec::new();
    let perks = &resolved.perks;

    if let Some(flat) = perks.spin_bonus {
        base = (base + flat).max(0);
        perk_details.push(format!("{}: +{} QR coins per spin", resolved.avatar_name, flat));
    }

    // Prize multiplier lands before the activity multiplier
    if let Some(mult) = perks.spin_prize_multiplier {
        if prize > 0 {
            prize = scale(prize, mult);
            perk_details.push(format!("Spin prize multiplier: x{}", mult));
        }
    }

    if let Some(mult) = perks.activity_multiplier {
        base = scale(base, mult);
        bonus = scale(bonus, mult);
        prize = scale(prize, mult);
        perk_details.push(format!("Activity multiplier: x{}", mult));
    }

    if let Some(mult) = perks.weekend_earnings_multiplier {
        if is_weekend(today) {
            base = scale(base, mult);
            bonus = scale(bonus, mult);
            perk_details.push(format!("Weekend earnings: x{}", mult));
        }
    }

    EarningsResult {
        base_amount: base,
        bonus_amount: bonus,
        prize_amount: Some(prize),
        total_amount: base + bonus + prize,
        perk_details,
        avatar_name: resolved.avatar_name.clone(),
        day_restricted: resolved.day_restricted,
    }
}

/// Compute vote earnings for a user at the current wall clock
pub async fn calculate_vote_earnings(
    db: &Database,
    user_id: Option<i64>,
    base: i64,
    bonus: i64,
) -> EarningsResult {
    calculate_vote_earnings_at(db, user_id, base, bonus, Utc::now()).await
}

/// Compute vote earnings against a caller-supplied instant
pub async fn calculate_vote_earnings_at(
    db: &Database,
    user_id: Option<i64>,
    base: i64,
    bonus: i64,
    now: DateTime<Utc>,
) -> EarningsResult {
    let resolved = resolve_perks_at(db, user_id, now).await;
    apply_vote_perks(&resolved, base, bonus, now.weekday())
}

/// Compute spin earnings for a user at the current wall clock
pub async fn calculate_spin_earnings(
    db: &Database,
    user_id: Option<i64>,
    base: i64,
    bonus: i64,
    prize: i64,
) -> EarningsResult {
    calculate_spin_earnings_at(db, user_id, base, bonus, prize, Utc::now()).await
}

/// Compute spin earnings against a caller-supplied instant
pub async fn calculate_spin_earnings_at(
    db: &Database,
    user_id: Option<i64>,
    base: i64,
    bonus: i64,
    prize: i64,
    now: DateTime<Utc>,
) -> EarningsResult {
    let resolved = resolve_perks_at(db, user_id, now).await;
    apply_spin_perks(&resolved, base, bonus, prize, now.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrcade_core::PerkData;

    fn resolved(perks: PerkData) -> ResolvedPerkSet {
        ResolvedPerkSet::active("Lucky Pirate".to_string(), perks)
    }

    #[test]
    fn test_no_perks_passes_inputs_through() {
        let result = apply_vote_perks(&ResolvedPerkSet::fallback(), 5, 0, Weekday::Wed);
        assert_eq!(result.base_amount, 5);
        assert_eq!(result.bonus_amount, 0);
        assert_eq!(result.total_amount, 5);
        assert!(result.perk_details.is_empty());
    }

    #[test]
    fn test_vote_multiplier_ordering() {
        // Flat bonus first, then activity, then daily (activity before daily)
        let set = resolved(PerkData {
            vote_bonus: Some(5),
            activity_multiplier: Some(3.0),
            daily_bonus_multiplier: Some(2.0),
            ..Default::default()
        });
        let result = apply_vote_perks(&set, 5, 10, Weekday::Wed);
        assert_eq!(result.base_amount, 30); // (5+5)*3
        assert_eq!(result.bonus_amount, 60); // 10*3*2
        assert_eq!(result.total_amount, 90);
        assert_eq!(result.perk_details.len(), 3);
    }

    #[test]
    fn test_daily_bonus_needs_positive_bonus() {
        let set = resolved(PerkData {
            daily_bonus_multiplier: Some(2.0),
            ..Default::default()
        });
        let result = apply_vote_perks(&set, 5, 0, Weekday::Wed);
        assert_eq!(result.bonus_amount, 0);
        assert!(result.perk_details.is_empty());
    }

    #[test]
    fn test_weekend_multiplier_gated_on_day() {
        let set = resolved(PerkData {
            weekend_earnings_multiplier: Some(2.0),
            ..Default::default()
        });

        let saturday = apply_vote_perks(&set, 5, 0, Weekday::Sat);
        assert_eq!(saturday.base_amount, 10);
        assert_eq!(saturday.total_amount, 10);

        let sunday = apply_vote_perks(&set, 5, 0, Weekday::Sun);
        assert_eq!(sunday.total_amount, 10);

        let weekday = apply_vote_perks(&set, 5, 0, Weekday::Tue);
        assert_eq!(weekday.total_amount, 5);
        assert!(weekday.perk_details.is_empty());
    }

    #[test]
    fn test_spin_scenario_with_prize_multiplier() {
        let set = resolved(PerkData {
            spin_bonus: Some(10),
            spin_prize_multiplier: Some(1.1),
            ..Default::default()
        });
        let result = apply_spin_perks(&set, 15, 50, 100, Weekday::Wed);
        assert_eq!(result.base_amount, 25);
        assert_eq!(result.bonus_amount, 50);
        assert_eq!(result.prize_amount, Some(110));
        assert_eq!(result.total_amount, 185);
    }

    #[test]
    fn test_spin_prize_multiplier_before_activity() {
        let set = resolved(PerkData {
            spin_prize_multiplier: Some(1.5),
            activity_multiplier: Some(2.0),
            ..Default::default()
        });
        let result = apply_spin_perks(&set, 15, 0, 100, Weekday::Wed);
        // prize: 100 * 1.5 = 150, then * 2 = 300
        assert_eq!(result.prize_amount, Some(300));
        assert_eq!(result.base_amount, 30);
        assert_eq!(
            result.perk_details,
            vec![
                "Spin prize multiplier: x1.5".to_string(),
                "Activity multiplier: x2".to_string(),
            ]
        );
    }

    #[test]
    fn test_daily_bonus_does_not_apply_to_spins() {
        let set = resolved(PerkData {
            daily_bonus_multiplier: Some(5.0),
            ..Default::default()
        });
        let result = apply_spin_perks(&set, 15, 20, 0, Weekday::Wed);
        assert_eq!(result.bonus_amount, 20);
        assert!(result.perk_details.is_empty());
    }

    #[test]
    fn test_total_is_exact_sum() {
        let set = resolved(PerkData {
            vote_bonus: Some(3),
            activity_multiplier: Some(1.7),
            daily_bonus_multiplier: Some(2.3),
            weekend_earnings_multiplier: Some(1.9),
            ..Default::default()
        });
        for (base, bonus) in [(0, 0), (5, 10), (7, 3), (100, 1)] {
            for day in [Weekday::Mon, Weekday::Sat] {
                let result = apply_vote_perks(&set, base, bonus, day);
                assert_eq!(result.total_amount, result.sum());
            }
        }
    }

    #[test]
    fn test_pure_function_is_deterministic() {
        let set = resolved(PerkData {
            vote_bonus: Some(5),
            activity_multiplier: Some(3.0),
            ..Default::default()
        });
        let first = apply_vote_perks(&set, 5, 10, Weekday::Fri);
        let second = apply_vote_perks(&set, 5, 10, Weekday::Fri);
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_restricted_set_is_identity() {
        let set = ResolvedPerkSet::restricted(
            "Weekend Warrior".to_string(),
            "Active on weekends only".to_string(),
        );
        let result = apply_vote_perks(&set, 5, 10, Weekday::Wed);
        assert_eq!(result.base_amount, 5);
        assert_eq!(result.bonus_amount, 10);
        assert_eq!(result.total_amount, 15);
        assert!(result.day_restricted);
        assert!(result.perk_details.is_empty());
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let result = apply_vote_perks(&ResolvedPerkSet::fallback(), -5, -1, Weekday::Wed);
        assert_eq!(result.base_amount, 0);
        assert_eq!(result.bonus_amount, 0);
        assert_eq!(result.total_amount, 0);
    }
}
