/// Pluggable prohibited-term capability used by the content analyzer.
///
/// Implementations may fail (a remote list, a corrupt dictionary). The analyzer
/// surfaces failures as `AnalyzerUnavailable` so the workflow can fall back to
/// manual review instead of guessing.
#[cfg_attr(test, mockall::automock)]
pub trait TermMatcher: Send + Sync {
    /// True if `text` contains a prohibited term not covered by the allow-list.
    fn is_profane(&self, text: &str) -> anyhow::Result<bool>;

    /// Returns `text` with every offending word masked.
    fn clean(&self, text: &str) -> anyhow::Result<String>;
}
