use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::user::stats::UserActivityStats;

/// Accounts older than this many days unlock the veteran badge.
pub const VETERAN_ACCOUNT_AGE_DAYS: u32 = 365;

/// Achievement conditions that unlock a badge independently of reputation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SpecialCondition {
    FirstThread,
    Helpful,
    Moderator,
    Veteran,
}

impl SpecialCondition {
    pub fn is_met(&self, stats: &UserActivityStats) -> bool {
        match self {
            SpecialCondition::FirstThread => stats.first_thread,
            SpecialCondition::Helpful => stats.helpful_comments > 0,
            SpecialCondition::Moderator => stats.is_moderator,
            SpecialCondition::Veteran => stats.account_age_days > VETERAN_ACCOUNT_AGE_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum BadgeRequirement {
    MinPoints { min_points: u32 },
    Special { condition: SpecialCondition },
}

/// Static catalog entry. Never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Badge {
    pub key: String,
    /// i18n key for the display name
    pub name: String,
    pub icon: String,
    pub description: String,
    pub requirement: BadgeRequirement,
}

impl Badge {
    fn tier(key: &str, icon: &str, min_points: u32) -> Self {
        Self {
            key: key.to_string(),
            name: format!("forum.badges.{}", key),
            icon: icon.to_string(),
            description: format!("forum.badges.{}Desc", key),
            requirement: BadgeRequirement::MinPoints { min_points },
        }
    }

    fn special(key: &str, icon: &str, condition: SpecialCondition) -> Self {
        Self {
            key: key.to_string(),
            name: format!("forum.badges.{}", key),
            icon: icon.to_string(),
            description: format!("forum.badges.{}Desc", key),
            requirement: BadgeRequirement::Special { condition },
        }
    }

    /// Point threshold for reputation-gated badges.
    pub fn min_points(&self) -> Option<u32> {
        match self.requirement {
            BadgeRequirement::MinPoints { min_points } => Some(min_points),
            BadgeRequirement::Special { .. } => None,
        }
    }
}

/// Ordered badge lookup table.
///
/// Order matters: among unlocked special badges the first one listed becomes
/// the primary badge, and ties in the next-badge gap resolve to the earlier entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BadgeCatalog {
    badges: Vec<Badge>,
}

impl BadgeCatalog {
    pub fn new(badges: Vec<Badge>) -> Self {
        Self { badges }
    }

    pub fn get(&self, key: &str) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.key == key)
    }

    pub fn point_tiers(&self) -> impl Iterator<Item = (&Badge, u32)> {
        self.badges
            .iter()
            .filter_map(|badge| badge.min_points().map(|points| (badge, points)))
    }

    pub fn specials(&self) -> impl Iterator<Item = (&Badge, SpecialCondition)> {
        self.badges.iter().filter_map(|badge| match badge.requirement {
            BadgeRequirement::Special { condition } => Some((badge, condition)),
            BadgeRequirement::MinPoints { .. } => None,
        })
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        Self::new(vec![
            Badge::tier("newbie", "🌱", 0),
            Badge::tier("contributor", "📝", 10),
            Badge::tier("active", "⚡", 50),
            Badge::tier("expert", "🧠", 100),
            Badge::tier("guru", "🎓", 250),
            Badge::tier("legend", "👑", 500),
            Badge::special("firstThread", "🎯", SpecialCondition::FirstThread),
            Badge::special("helpful", "🤝", SpecialCondition::Helpful),
            Badge::special("moderator", "🛡️", SpecialCondition::Moderator),
            Badge::special("veteran", "🏆", SpecialCondition::Veteran),
        ])
    }
}
