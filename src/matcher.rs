//! Answer matching
//!
//! Submitted answers and accepted answers are compared as literal strings
//! after whitespace normalization. No fuzzy matching, no shell parsing.

/// Normalize an answer for comparison: trim, then collapse every run of
/// internal whitespace to a single space.
pub fn normalize(answer: &str) -> String {
    answer.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check a submission against the accepted answers for an exercise.
///
/// Comparison is exact (case- and punctuation-sensitive) after
/// normalization; the first match wins.
pub fn matches(submission: &str, accepted: &[String]) -> bool {
    let normalized = normalize(submission);
    accepted.iter().any(|a| normalize(a) == normalized)
}
