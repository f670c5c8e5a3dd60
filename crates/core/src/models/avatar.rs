//! Avatar configuration and resolved perk models

use serde::{Deserialize, Serialize};

/// Baseline avatar every user falls back to
pub const DEFAULT_AVATAR_ID: i64 = 1;
pub const DEFAULT_AVATAR_NAME: &str = "QR Ted";

/// Gameplay effects attached to an avatar.
///
/// Stored as a JSON column; every recognized perk is a named optional field
/// so new code paths get exhaustive coverage instead of string key lookups.
/// Unknown keys in stored blobs are ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerkData {
    /// Flat coins added to the vote base amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_bonus: Option<i64>,
    /// Flat coins added to the spin base amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_bonus: Option<i64>,
    /// Scales base, bonus, and prize amounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_multiplier: Option<f64>,
    /// Scales the vote bonus, only when a bonus is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_bonus_multiplier: Option<f64>,
    /// Scales the spin prize, applied before the activity multiplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_prize_multiplier: Option<f64>,
    /// Scales base and bonus on Saturday/Sunday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_earnings_multiplier: Option<f64>,
    /// Shields votes from loss events (carried, not consumed here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_protection: Option<bool>,
    /// Shields spins from loss events (carried, not consumed here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_immunity: Option<bool>,
}

impl PerkData {
    pub fn is_empty(&self) -> bool {
        self.vote_bonus.is_none()
            && self.spin_bonus.is_none()
            && self.activity_multiplier.is_none()
            && self.daily_bonus_multiplier.is_none()
            && self.spin_prize_multiplier.is_none()
            && self.weekend_earnings_multiplier.is_none()
            && self.vote_protection.is_none()
            && self.spin_immunity.is_none()
    }
}

/// Weekday allow-list gating an avatar's perks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRestrictions {
    /// Lowercase full weekday names on which perks are active
    pub active_days: Vec<String>,
    /// Human-readable description shown when perks are suppressed
    pub description: String,
}

/// A selectable user avatar and its gameplay effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    pub avatar_id: i64,
    pub name: String,
    pub perk_data: Option<PerkData>,
    pub day_restrictions: Option<DayRestrictions>,
    pub is_active: bool,
}

/// Outcome of evaluating an avatar config against "now".
///
/// Invariant: `day_restricted == true` implies `perks.is_empty()` -
/// restrictions fully suppress all perks, they never partially apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPerkSet {
    pub perks: PerkData,
    pub avatar_name: String,
    pub day_restricted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_info: Option<String>,
}

impl ResolvedPerkSet {
    /// Safe default: no perks, baseline avatar, no restriction
    pub fn fallback() -> Self {
        Self {
            perks: PerkData::default(),
            avatar_name: DEFAULT_AVATAR_NAME.to_string(),
            day_restricted: false,
            restriction_info: None,
        }
    }

    pub fn active(avatar_name: String, perks: PerkData) -> Self {
        Self {
            perks,
            avatar_name,
            day_restricted: false,
            restriction_info: None,
        }
    }

    pub fn restricted(avatar_name: String, info: String) -> Self {
        Self {
            perks: PerkData::default(),
            avatar_name,
            day_restricted: true,
            restriction_info: Some(info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perk_data_ignores_unknown_keys() {
        let parsed: PerkData = serde_json::from_str(
            r#"{"vote_bonus": 5, "legacy_flag": true, "activity_multiplier": 2.0}"#,
        )
        .unwrap();
        assert_eq!(parsed.vote_bonus, Some(5));
        assert_eq!(parsed.activity_multiplier, Some(2.0));
        assert_eq!(parsed.spin_bonus, None);
    }

    #[test]
    fn test_empty_perk_data() {
        let parsed: PerkData = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());

        let with_perk = PerkData {
            spin_immunity: Some(true),
            ..Default::default()
        };
        assert!(!with_perk.is_empty());
    }

    #[test]
    fn test_restricted_set_has_no_perks() {
        let set = ResolvedPerkSet::restricted(
            "Weekend Warrior".to_string(),
            "Active on weekends only".to_string(),
        );
        assert!(set.day_restricted);
        assert!(set.perks.is_empty());
        assert_eq!(set.restriction_info.as_deref(), Some("Active on weekends only"));
    }

    #[test]
    fn test_fallback_uses_baseline_avatar() {
        let set = ResolvedPerkSet::fallback();
        assert_eq!(set.avatar_name, DEFAULT_AVATAR_NAME);
        assert!(!set.day_restricted);
        assert!(set.perks.is_empty());
    }
}
