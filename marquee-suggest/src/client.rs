//! The suggestion client and its shorten-and-retry loop.

use std::sync::Arc;

use marquee_http::{HttpClient, RequestOpts};

use crate::detail::{DetailFetcher, TitlePageFetcher};
use crate::envelope::{self, RawSuggestion};
use crate::normalize::NormalizedQuery;
use crate::score::match_score;
use crate::types::{EntityKind, SearchRequest, SuggestionResult};
use crate::Result;

/// Default base for the suggestion endpoint. The trailing slash matters:
/// request paths join underneath it.
pub const SUGGEST_BASE: &str = "https://v2.sg.media-imdb.com/suggests/";

/// Lengths the wire query is re-truncated to when an attempt finds nothing.
/// The schedule is the retry budget: one retry per entry strictly shorter
/// than the current query, after the initial attempt.
const SHORTEN_SCHEDULE: [usize; 3] = [15, 10, 5];

/// Client for the suggestion endpoint.
///
/// Holds no per-call state: every [`search`](SuggestClient::search) builds a
/// request-scoped [`NormalizedQuery`] and walks the retry loop with locals,
/// so independent calls on one instance can safely run concurrently. Within
/// a single call, requests stay strictly sequential.
pub struct SuggestClient {
    http: HttpClient,
    details: Arc<dyn DetailFetcher>,
}

impl SuggestClient {
    /// Client against the real suggestion and title-page endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(SUGGEST_BASE, Arc::new(TitlePageFetcher::new()?))
    }

    /// Client against an alternative endpoint and enrichment collaborator.
    pub fn with_endpoints(suggest_base: &str, details: Arc<dyn DetailFetcher>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(suggest_base)?,
            details,
        })
    }

    /// Run one logical search: normalize, request with progressive
    /// shortening, decode, rank, score, and optionally enrich.
    ///
    /// Transient transport and parse failures are absorbed into the retry
    /// loop; the returned error covers configuration problems only.
    pub async fn search(&self, req: &SearchRequest) -> Result<Vec<SuggestionResult>> {
        let cap = effective_cap(req.top);
        let query = NormalizedQuery::prepare(&req.query);
        if query.wire.is_empty() {
            tracing::warn!(
                raw_query = %req.query,
                "query normalized to nothing, no bucket character to request"
            );
            return Ok(Vec::new());
        }

        let raw = self.attempt_loop(req, &query).await;

        let kept: Vec<RawSuggestion> = match cap {
            Some(n) => raw.into_iter().take(n).collect(),
            None => raw,
        };

        let mut results = Vec::with_capacity(kept.len());
        for (idx, entry) in kept.into_iter().enumerate() {
            let kind = EntityKind::from_id(&entry.id);
            let mut result = SuggestionResult {
                match_score: match_score(&query.scoring, &entry.label),
                id: entry.id,
                label: entry.label,
                kind,
                year: entry.year,
                category_code: entry.category_code,
                rank: idx + 1,
                rating: None,
                genres: Vec::new(),
            };

            if req.enrich && result.kind == EntityKind::Title {
                match self.details.title_details(&result.id).await {
                    Ok(details) => {
                        result.rating = details.rating;
                        result.genres = details.genres;
                    }
                    Err(err) => {
                        tracing::warn!(
                            id = %result.id,
                            error = %err,
                            "detail enrichment failed, keeping defaults"
                        );
                    }
                }
            }
            results.push(result);
        }
        Ok(results)
    }

    /// Request/parse until entries show up or the shortening schedule runs
    /// out. Returns entries in endpoint order (taken as relevance order).
    async fn attempt_loop(&self, req: &SearchRequest, query: &NormalizedQuery) -> Vec<RawSuggestion> {
        let mut wire = query.wire.clone();
        let mut cursor = 0usize;

        loop {
            // Wire text is ASCII by construction, so chars == bytes here.
            let bucket = match wire.chars().next() {
                Some(c) => c,
                None => return Vec::new(),
            };
            let path = format!("{}{}/{}.json", req.category.path_segment(), bucket, wire);
            tracing::debug!(target: "suggest", %path, wire_len = wire.len(), "suggest.request.start");

            let body = match self.http.get_text(&path, RequestOpts::default()).await {
                Ok(body) => body,
                Err(err) => {
                    // Soft failure: an empty body parses to zero results and
                    // feeds the shortening path like any other miss.
                    tracing::warn!(%path, error = %err, "suggest.request.soft_failure");
                    String::new()
                }
            };

            let entries = envelope::parse_suggestions(&body, &wire);
            if !entries.is_empty() {
                if req.debug {
                    tracing::debug!(target: "suggest", entries = ?entries, "decoded suggestion payload");
                }
                return entries;
            }

            let Some((next_cursor, shorter)) = next_shorter(cursor, wire.len()) else {
                tracing::debug!(target: "suggest", wire_len = wire.len(), "shortening schedule exhausted");
                return Vec::new();
            };
            tracing::info!(
                target: "suggest",
                from_len = wire.len(),
                to_len = shorter,
                "suggest.shorten"
            );
            wire.truncate(shorter);
            cursor = next_cursor;
        }
    }
}

/// Correct the caller's cap: `None` means all, non-positive values are
/// recovered to "all" with a warning rather than rejected.
fn effective_cap(top: Option<i64>) -> Option<usize> {
    match top {
        None => None,
        Some(n) if n <= 0 => {
            tracing::warn!(top = n, "top should be greater than 0, returning all results");
            None
        }
        Some(n) => Some(n as usize),
    }
}

/// Next schedule entry strictly shorter than the current wire length,
/// starting at `cursor`. Entries that would not shrink the query are
/// skipped. Returns the cursor past the consumed entry and the new length.
fn next_shorter(cursor: usize, current_len: usize) -> Option<(usize, usize)> {
    SHORTEN_SCHEDULE
        .iter()
        .enumerate()
        .skip(cursor)
        .find(|(_, &len)| len < current_len)
        .map(|(idx, &len)| (idx + 1, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_passes_positive_values_through() {
        assert_eq!(effective_cap(Some(5)), Some(5));
        assert_eq!(effective_cap(Some(1)), Some(1));
    }

    #[test]
    fn cap_recovers_non_positive_values_to_all() {
        assert_eq!(effective_cap(Some(0)), None);
        assert_eq!(effective_cap(Some(-5)), None);
        assert_eq!(effective_cap(None), None);
    }

    #[test]
    fn schedule_walks_descending_lengths() {
        // 18-char query: every entry applies in order.
        assert_eq!(next_shorter(0, 18), Some((1, 15)));
        assert_eq!(next_shorter(1, 15), Some((2, 10)));
        assert_eq!(next_shorter(2, 10), Some((3, 5)));
        assert_eq!(next_shorter(3, 5), None);
    }

    #[test]
    fn schedule_skips_entries_that_would_not_shrink() {
        // 12-char query: 15 is skipped, 10 comes first.
        assert_eq!(next_shorter(0, 12), Some((2, 10)));
        // 5-char query: nothing in the schedule is shorter.
        assert_eq!(next_shorter(0, 5), None);
        // 3-char query likewise terminates immediately.
        assert_eq!(next_shorter(0, 3), None);
    }
}
