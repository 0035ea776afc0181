//! Positional character-overlap scoring.
//!
//! This is deliberately not edit distance or token overlap: characters are
//! compared at corresponding positions only, so the score measures
//! literal-prefix-style closeness. Reordered or padded titles can rank lower
//! than a human would expect ("Once Upon a Time in America" vs "... in the
//! West" diverge only past the shared prefix). The formula is kept as-is for
//! compatibility with existing consumers.

use crate::normalize::normalize;

/// Percentage match between an already-normalized query and a raw candidate
/// label, in `[0.0, 100.0]` with two-decimal precision.
///
/// The label is normalized with the same rules as the query, the two strings
/// are compared position-by-position up to the shorter length, and the match
/// count is divided by the longer length.
pub fn match_score(normalized_query: &str, label: &str) -> f64 {
    let cleaned = normalize(label);
    let longest = normalized_query
        .chars()
        .count()
        .max(cleaned.chars().count());
    if longest == 0 {
        return 0.0;
    }

    let matched = normalized_query
        .chars()
        .zip(cleaned.chars())
        .filter(|(a, b)| a == b)
        .count();

    round2(matched as f64 / longest as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_after_normalization_scores_100() {
        assert_eq!(match_score("captain america", "Captain America"), 100.0);
    }

    #[test]
    fn disjoint_strings_score_0() {
        assert_eq!(match_score("abc", "xyz"), 0.0);
    }

    #[test]
    fn shared_prefix_scores_by_longer_length() {
        // "captain" vs "captain america": 7 matches over 15 chars.
        let score = match_score("captain", "Captain America");
        assert_eq!(score, round2(7.0 / 15.0 * 100.0));
        assert_eq!(score, 46.67);
    }

    #[test]
    fn bounded_and_two_decimal_for_arbitrary_pairs() {
        let pairs = [
            ("", ""),
            ("", "anything"),
            ("once upon a time in america", "Once Upon a Time in the West"),
            ("a", "ab"),
            ("tt123", "tt123"),
        ];
        for (query, label) in pairs {
            let score = match_score(query, label);
            assert!((0.0..=100.0).contains(&score), "{query:?} vs {label:?}");
            assert_eq!(score, round2(score), "not two-decimal: {score}");
        }
    }

    #[test]
    fn empty_inputs_do_not_divide_by_zero() {
        assert_eq!(match_score("", ""), 0.0);
    }
}
