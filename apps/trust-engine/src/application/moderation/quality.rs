use crate::domain::user::history::AuthorStanding;

const FEATURE_THRESHOLD: u32 = 3;

/// Whether freshly approved content is a good pick for the featured shelf.
///
/// Points: a body of 51-499 characters, a rating of 4 or more (worth two),
/// an author with more than 5 comments averaging above 3.5, and listed pros.
pub fn should_be_featured(
    content: &str,
    rating: Option<u8>,
    author: &AuthorStanding,
    pros: &[String],
) -> bool {
    let mut score = 0;

    let length = content.chars().count();
    if length > 50 && length < 500 {
        score += 1;
    }
    if rating.is_some_and(|rating| rating >= 4) {
        score += 2;
    }
    if author.total_comments > 5 && author.average_rating > 3.5 {
        score += 1;
    }
    if pros.iter().any(|pro| !pro.trim().is_empty()) {
        score += 1;
    }

    score >= FEATURE_THRESHOLD
}

/// 0-100 quality estimate for a review, starting from 50.
pub fn review_quality_score(
    title: Option<&str>,
    comment: &str,
    image_count: u32,
    verified_purchase: bool,
) -> u8 {
    let mut score: i32 = 50;

    if let Some(title) = title.filter(|title| !title.is_empty()) {
        let length = title.chars().count();
        if (20..=60).contains(&length) {
            score += 10;
        } else if !(10..=80).contains(&length) {
            score -= 5;
        }
    }

    if !comment.is_empty() {
        let length = comment.chars().count();
        if length > 100 {
            score += 15;
        } else if length > 50 {
            score += 10;
        } else if length < 20 {
            score -= 10;
        }
    }

    if image_count > 0 {
        score += 10;
    }
    if verified_purchase {
        score += 15;
    }

    u8::try_from(score.clamp(0, 100)).unwrap_or(100)
}
