use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::reputation::badge::{Badge, BadgeCatalog};
use crate::domain::reputation::weights::PointWeights;
use crate::domain::user::stats::{ActivityEvent, UserActivityStats};

/// Progress towards a reputation-gated badge.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct BadgeProgress {
    pub current: u32,
    pub target: u32,
    /// Percentage in `0..=100`
    pub progress: f64,
    pub remaining: u32,
}

/// Reputation snapshot returned alongside badge membership.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReputationSummary {
    pub reputation: u32,
    pub badges: Vec<Badge>,
    pub primary_badge: Option<Badge>,
    pub next_badge: Option<Badge>,
}

/// Point ledger and badge derivation over [`UserActivityStats`].
///
/// Every operation is pure: stats go in, a new value comes out.
#[derive(Debug, Clone, Default)]
pub struct ReputationAccountant {
    weights: PointWeights,
    catalog: BadgeCatalog,
}

impl ReputationAccountant {
    pub fn new(weights: PointWeights, catalog: BadgeCatalog) -> Self {
        Self { weights, catalog }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn apply_event(&self, stats: &UserActivityStats, event: ActivityEvent) -> UserActivityStats {
        let mut next = stats.clone();
        match event {
            ActivityEvent::CreateThread => {
                next.threads_created = next.threads_created.saturating_add(1);
                if next.threads_created == 1 {
                    next.first_thread = true;
                }
            }
            ActivityEvent::CreateComment => {
                next.comments_created = next.comments_created.saturating_add(1)
            }
            ActivityEvent::ReceiveLike => next.likes_received = next.likes_received.saturating_add(1),
            ActivityEvent::ReceiveDislike => {
                next.dislikes_received = next.dislikes_received.saturating_add(1)
            }
            ActivityEvent::ThreadViewed => next.thread_views = next.thread_views.saturating_add(1),
            ActivityEvent::CommentViewed => {
                next.comment_views = next.comment_views.saturating_add(1)
            }
            ActivityEvent::HelpfulComment => {
                next.helpful_comments = next.helpful_comments.saturating_add(1)
            }
        }
        next
    }

    /// Weighted activity total, rounded to the nearest integer and clamped at zero.
    pub fn reputation(&self, stats: &UserActivityStats) -> u32 {
        let w = &self.weights;
        let mut raw = f64::from(stats.threads_created) * w.create_thread
            + f64::from(stats.comments_created) * w.create_comment
            + f64::from(stats.likes_received) * w.receive_like
            + f64::from(stats.dislikes_received) * w.receive_dislike
            + f64::from(stats.thread_views) * w.thread_viewed
            + f64::from(stats.comment_views) * w.comment_viewed
            + f64::from(stats.helpful_comments) * w.helpful_comment;

        if stats.first_thread {
            raw += w.first_thread;
        }

        raw.round().max(0.0) as u32
    }

    /// Unlocked point tiers followed by unlocked special badges, in catalog order.
    pub fn badges(&self, stats: &UserActivityStats) -> Vec<Badge> {
        let reputation = self.reputation(stats);

        let tiers = self
            .catalog
            .point_tiers()
            .filter(|(_, min_points)| reputation >= *min_points)
            .map(|(badge, _)| badge.clone());
        let specials = self
            .catalog
            .specials()
            .filter(|(_, condition)| condition.is_met(stats))
            .map(|(badge, _)| badge.clone());

        tiers.chain(specials).collect()
    }

    pub fn primary_badge(&self, stats: &UserActivityStats) -> Option<Badge> {
        if let Some((badge, _)) = self
            .catalog
            .specials()
            .find(|(_, condition)| condition.is_met(stats))
        {
            return Some(badge.clone());
        }

        let reputation = self.reputation(stats);
        self.catalog
            .point_tiers()
            .filter(|(_, min_points)| reputation >= *min_points)
            .fold(None::<(&Badge, u32)>, |best, (badge, min_points)| match best {
                Some((_, best_points)) if best_points >= min_points => best,
                _ => Some((badge, min_points)),
            })
            .map(|(badge, _)| badge.clone())
    }

    /// Locked point tier with the smallest remaining gap. Specials are never "next".
    pub fn next_badge(&self, stats: &UserActivityStats) -> Option<Badge> {
        let reputation = self.reputation(stats);
        self.catalog
            .point_tiers()
            .filter(|(_, min_points)| *min_points > reputation)
            .fold(None::<(&Badge, u32)>, |best, (badge, min_points)| {
                let gap = min_points - reputation;
                match best {
                    Some((_, best_gap)) if best_gap <= gap => best,
                    _ => Some((badge, gap)),
                }
            })
            .map(|(badge, _)| badge.clone())
    }

    pub fn has_badge(&self, stats: &UserActivityStats, key: &str) -> bool {
        self.badges(stats).iter().any(|badge| badge.key == key)
    }

    /// `None` for unknown keys and special badges.
    pub fn badge_progress(&self, stats: &UserActivityStats, key: &str) -> Option<BadgeProgress> {
        let target = self.catalog.get(key)?.min_points()?;
        let current = self.reputation(stats);

        let progress = if target == 0 {
            100.0
        } else {
            (f64::from(current) / f64::from(target) * 100.0).min(100.0)
        };

        Some(BadgeProgress {
            current,
            target,
            progress,
            remaining: target.saturating_sub(current),
        })
    }

    pub fn summary(&self, stats: &UserActivityStats) -> ReputationSummary {
        ReputationSummary {
            reputation: self.reputation(stats),
            badges: self.badges(stats),
            primary_badge: self.primary_badge(stats),
            next_badge: self.next_badge(stats),
        }
    }
}
