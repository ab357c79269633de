use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::moderation::verdict::{ContentAnalysis, Severity};
use crate::domain::shared::errors::ModerationError;
use crate::domain::user::history::AuthorProfile;
use crate::infrastructure::matching::traits::TermMatcher;
use crate::infrastructure::matching::word_list::tokenize;

lazy_static! {
    static ref URL: Regex = Regex::new(r"https?://\S+").unwrap();
}

const DEFAULT_PROHIBITED_TERMS: &[&str] = &[
    "mierda", "puto", "puta", "joder", "follar", "coño", "cabrón", "gilipollas",
    "subnormal", "imbécil", "estúpido", "idiota", "tonto", "pendejo", "verga",
    "chingar", "chingada", "chingado", "culero", "mamón", "maricón", "marica",
    "faggot", "nigger", "cunt", "fuck", "shit", "asshole", "bitch", "bastard",
    "dick", "pussy", "cock", "whore", "slut", "rape", "kill", "die", "suicide",
    "bomb", "terrorist", "hate", "racist", "sexist", "homophobic", "transphobic",
];

const DEFAULT_ALLOWED_TERMS: &[&str] = &[
    "putin", "putnam", "puting", "putter", "putty", "assad", "assam", "assay",
    "asset", "class", "glass", "grass", "mass", "pass",
];

/// Term lists, scoring weights and heuristic thresholds of the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub prohibited_terms: Vec<String>,
    pub allowed_terms: Vec<String>,
    /// Scores at or above this are never auto-approved
    pub approval_threshold: u32,
    pub points_per_term: u32,
    pub points_per_spam_pattern: u32,
    pub max_length: usize,
    pub length_points: u32,
    pub empty_points: u32,
    pub max_urls: usize,
    pub points_per_url: u32,
    pub uppercase_ratio: f64,
    pub uppercase_min_length: usize,
    pub uppercase_points: u32,
    /// Characters after the scheme for a URL to count as suspiciously long
    pub long_url_length: usize,
    pub digit_run_length: usize,
    pub repeated_word_char_run: usize,
    pub repeated_char_run: usize,
    pub points_per_reported_comment: u32,
    pub new_account_days: u32,
    pub new_account_points: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            prohibited_terms: DEFAULT_PROHIBITED_TERMS.iter().map(|t| t.to_string()).collect(),
            allowed_terms: DEFAULT_ALLOWED_TERMS.iter().map(|t| t.to_string()).collect(),
            approval_threshold: 5,
            points_per_term: 10,
            points_per_spam_pattern: 5,
            max_length: 2000,
            length_points: 2,
            empty_points: 5,
            max_urls: 3,
            points_per_url: 1,
            uppercase_ratio: 0.7,
            uppercase_min_length: 10,
            uppercase_points: 3,
            long_url_length: 10,
            digit_run_length: 8,
            repeated_word_char_run: 5,
            repeated_char_run: 11,
            points_per_reported_comment: 2,
            new_account_days: 7,
            new_account_points: 2,
        }
    }
}

/// Longest run of identical consecutive characters satisfying `eligible`.
fn longest_run(text: &str, eligible: impl Fn(char) -> bool) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if eligible(ch) && previous == Some(ch) {
            current += 1;
        } else if eligible(ch) {
            current = 1;
        } else {
            current = 0;
        }
        longest = longest.max(current);
        previous = Some(ch);
    }

    longest
}

fn points_for(count: usize, points: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(points)
}

fn uppercase_ratio(text: &str) -> f64 {
    let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if letters == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_ascii_uppercase()).count();
    upper as f64 / letters as f64
}

/// Scores user text for prohibited terms and spam heuristics.
///
/// Deterministic for identical input and term lists. Term matching goes
/// through the injected [`TermMatcher`]; a failing matcher yields
/// [`ModerationError::AnalyzerUnavailable`].
pub struct ContentAnalyzer {
    matcher: Arc<dyn TermMatcher>,
    config: AnalyzerConfig,
    long_url: Regex,
    digit_run: Regex,
}

impl ContentAnalyzer {
    pub fn new(matcher: Arc<dyn TermMatcher>, config: AnalyzerConfig) -> Result<Self, regex::Error> {
        let long_url = Regex::new(&format!(r"https?://\S{{{},}}", config.long_url_length.max(1)))?;
        let digit_run = Regex::new(&format!(r"\b\d{{{},}}\b", config.digit_run_length.max(1)))?;

        Ok(Self {
            matcher,
            config,
            long_url,
            digit_run,
        })
    }

    fn spam_patterns(&self, full: &str) -> Vec<&'static str> {
        let mut hits = Vec::new();

        if longest_run(full, |c| c.is_alphanumeric() || c == '_') >= self.config.repeated_word_char_run {
            hits.push("repeated_word_characters");
        }
        if longest_run(full, |_| true) >= self.config.repeated_char_run {
            hits.push("repeated_characters");
        }
        if self.long_url.is_match(full) {
            hits.push("long_url");
        }
        if self.digit_run.is_match(full) {
            hits.push("digit_run");
        }

        hits
    }

    fn matched_terms(&self, full: &str) -> Result<BTreeSet<String>, ModerationError> {
        let mut matched = BTreeSet::new();
        for token in tokenize(full) {
            let offending = self
                .matcher
                .is_profane(&token)
                .map_err(|e| ModerationError::AnalyzerUnavailable(e.to_string()))?;
            if offending {
                matched.insert(token);
            }
        }
        Ok(matched)
    }

    #[instrument(skip(self, text, title), fields(length = text.len()))]
    pub fn analyze(&self, text: &str, title: Option<&str>) -> Result<ContentAnalysis, ModerationError> {
        let full = format!("{} {}", title.unwrap_or_default(), text).to_lowercase();
        let mut analysis = ContentAnalysis::default();

        let matched = self.matched_terms(&full)?;
        if !matched.is_empty() {
            let preview: Vec<&str> = matched.iter().take(3).map(String::as_str).collect();
            analysis.flags.push("bad_words".to_string());
            analysis.reasons.push(format!(
                "Contains {} inappropriate word(s): {}",
                matched.len(),
                preview.join(", ")
            ));
            analysis.score = analysis
                .score
                .saturating_add(points_for(matched.len(), self.config.points_per_term));
            analysis.censored_text = Some(
                self.matcher
                    .clean(text)
                    .map_err(|e| ModerationError::AnalyzerUnavailable(e.to_string()))?,
            );
        }

        let spam = self.spam_patterns(&full);
        if !spam.is_empty() {
            analysis.flags.push("spam".to_string());
            analysis.reasons.push("Spam pattern detected".to_string());
            analysis.score = analysis
                .score
                .saturating_add(points_for(spam.len(), self.config.points_per_spam_pattern));
        }

        if text.chars().count() > self.config.max_length {
            analysis.flags.push("too_long".to_string());
            analysis.reasons.push("Content too long".to_string());
            analysis.score = analysis.score.saturating_add(self.config.length_points);
        }

        if text.trim().is_empty() {
            analysis.flags.push("empty".to_string());
            analysis.reasons.push("Empty content".to_string());
            analysis.score = analysis.score.saturating_add(self.config.empty_points);
        }

        let links = URL.find_iter(text).count();
        if links > self.config.max_urls {
            analysis.flags.push("too_many_links".to_string());
            analysis.reasons.push("Too many links".to_string());
            analysis.score = analysis
                .score
                .saturating_add(points_for(links, self.config.points_per_url));
        }

        if text.chars().count() > self.config.uppercase_min_length
            && uppercase_ratio(text) > self.config.uppercase_ratio
        {
            analysis.flags.push("all_caps".to_string());
            analysis.reasons.push("Excessive uppercase text".to_string());
            analysis.score = analysis.score.saturating_add(self.config.uppercase_points);
        }

        analysis.severity = Severity::from_match_count(matched.len());
        analysis.matched_terms = matched;
        analysis.has_violation = self.is_violation(&analysis);

        if analysis.score > 0 {
            info!(
                score = analysis.score,
                flags = ?analysis.flags,
                content_length = text.len(),
                "Content moderated"
            );
        }

        Ok(analysis)
    }

    /// Scores `text` and adds author-history penalties (prior reports, new account).
    pub fn analyze_with_history(
        &self,
        text: &str,
        title: Option<&str>,
        profile: &AuthorProfile,
    ) -> Result<ContentAnalysis, ModerationError> {
        let mut analysis = self.analyze(text, title)?;

        if profile.reported_comments > 0 {
            let penalty = profile
                .reported_comments
                .saturating_mul(self.config.points_per_reported_comment);
            analysis.score = analysis.score.saturating_add(penalty);
            analysis.reasons.push("Author has a history of reported content".to_string());
        }

        if profile.account_age_days < self.config.new_account_days {
            analysis.score = analysis.score.saturating_add(self.config.new_account_points);
            analysis.reasons.push(format!(
                "New account (less than {} days)",
                self.config.new_account_days
            ));
        }

        analysis.has_violation = self.is_violation(&analysis);
        Ok(analysis)
    }

    fn is_violation(&self, analysis: &ContentAnalysis) -> bool {
        !analysis.matched_terms.is_empty() || analysis.score >= self.config.approval_threshold
    }
}
