use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifetime activity counters for one user.
///
/// Only mutated through [`ActivityEvent`]s applied by the reputation accountant.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[serde(default)]
#[ts(export)]
pub struct UserActivityStats {
    pub threads_created: u32,
    pub comments_created: u32,
    pub likes_received: u32,
    pub dislikes_received: u32,
    pub thread_views: u32,
    pub comment_views: u32,
    pub helpful_comments: u32,
    pub first_thread: bool,
    pub is_moderator: bool,
    /// Account age in whole days
    pub account_age_days: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ActivityEvent {
    CreateThread,
    CreateComment,
    ReceiveLike,
    ReceiveDislike,
    ThreadViewed,
    CommentViewed,
    HelpfulComment,
}
