use serde::{Deserialize, Serialize};

/// Points awarded per unit of activity.
///
/// View weights are fractional; the reputation total is rounded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointWeights {
    pub create_thread: f64,
    pub create_comment: f64,
    pub receive_like: f64,
    pub receive_dislike: f64,
    pub thread_viewed: f64,
    pub comment_viewed: f64,
    pub first_thread: f64,
    pub helpful_comment: f64,
}

impl Default for PointWeights {
    fn default() -> Self {
        Self {
            create_thread: 5.0,
            create_comment: 2.0,
            receive_like: 1.0,
            receive_dislike: -1.0,
            thread_viewed: 0.1,
            comment_viewed: 0.05,
            first_thread: 10.0,
            helpful_comment: 3.0,
        }
    }
}
