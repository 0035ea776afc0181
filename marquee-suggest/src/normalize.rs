//! Query canonicalization for the suggestion endpoint.
//!
//! The endpoint accepts lowercase letters, digits, underscores and spaces,
//! and at most 20 characters. Accented input is folded to its base letters
//! rather than dropped, so "Les Misérables" still matches.

use unicode_normalization::UnicodeNormalization;

/// Maximum query length the endpoint accepts.
pub const WIRE_MAX_LEN: usize = 20;

/// Canonicalize arbitrary text into the endpoint's accepted character set.
///
/// NFKD-decomposes the input, drops every code point that is not plain ASCII
/// (which strips combining accents and exotic symbols), lowercases, and keeps
/// only `a-z`, `0-9`, `_` and space. Idempotent, and applied identically to
/// queries and candidate labels so comparisons stay symmetric.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| c.is_ascii())
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' '))
        .collect()
}

/// The two forms of a query the search flow needs, computed once per call.
///
/// `scoring` is the full normalized text, compared against candidate labels.
/// `wire` is what actually goes on the URL: truncated to [`WIRE_MAX_LEN`]
/// with spaces mapped to underscores.
#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    pub scoring: String,
    pub wire: String,
}

impl NormalizedQuery {
    pub fn prepare(raw: &str) -> Self {
        let scoring = normalize(raw);
        let wire: String = scoring.chars().take(WIRE_MAX_LEN).collect();
        Self {
            scoring,
            wire: wire.replace(' ', "_"),
        }
    }
}
