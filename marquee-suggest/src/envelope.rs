//! Unwrapping of the callback envelope around suggestion payloads.
//!
//! The endpoint answers with `imdb$<query>(<json>)` — a JSONP-style wrapper
//! whose inner tag echoes the wire query. The parentheses are located
//! structurally (first `(`, matching last `)`) and the tag validated, so a
//! malformed body degrades to zero entries instead of slicing at bad offsets.
//! Every failure mode here is deliberately indistinguishable from "no
//! results": the caller's shorten-and-retry loop handles both the same way.

use serde::Deserialize;

const ENVELOPE_TAG: &str = "imdb";

/// One entry of the results array, as the endpoint encodes it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSuggestion {
    pub id: String,
    #[serde(rename = "l")]
    pub label: String,
    #[serde(default, rename = "y")]
    pub year: Option<i32>,
    #[serde(default, rename = "q")]
    pub category_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestPayload {
    #[serde(default, rename = "d")]
    entries: Vec<RawSuggestion>,
}

/// Strip the callback wrapper and return the inner JSON text, or `None` when
/// the body does not have the expected `imdb$<query>( ... )` structure.
fn unwrap_envelope<'a>(body: &'a str, wire_query: &str) -> Option<&'a str> {
    let open = body.find('(')?;
    let close = body.rfind(')')?;
    if close <= open {
        return None;
    }
    let (tag, echoed_query) = body[..open].split_once('$')?;
    if tag != ENVELOPE_TAG || echoed_query != wire_query {
        return None;
    }
    Some(&body[open + 1..close])
}

/// Decode the suggestion entries out of a raw response body.
///
/// An unparseable envelope or payload yields an empty vec, never an error.
pub(crate) fn parse_suggestions(body: &str, wire_query: &str) -> Vec<RawSuggestion> {
    let Some(json) = unwrap_envelope(body, wire_query) else {
        if !body.is_empty() {
            tracing::debug!(
                wire_query,
                body_len = body.len(),
                "response envelope did not match, treating as zero results"
            );
        }
        return Vec::new();
    };

    match serde_json::from_str::<SuggestPayload>(json) {
        Ok(payload) => payload.entries,
        Err(err) => {
            tracing::debug!(
                wire_query,
                error = %err,
                "suggestion payload failed to decode, treating as zero results"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = concat!(
        r#"imdb$captain({"d":[{"id":"tt0458339","l":"Captain America: The First Avenger","y":2011,"q":"feature"},"#,
        r#"{"id":"nm0262635","l":"Chris Evans"},"#,
        r#"{"id":"co0000001","l":"Captain Co."}]})"#
    );

    #[test]
    fn unwraps_and_decodes_a_well_formed_body() {
        let entries = parse_suggestions(BODY, "captain");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "tt0458339");
        assert_eq!(entries[0].year, Some(2011));
        assert_eq!(entries[0].category_code.as_deref(), Some("feature"));
        assert_eq!(entries[1].label, "Chris Evans");
        assert_eq!(entries[1].year, None);
        assert_eq!(entries[1].category_code, None);
    }

    #[test]
    fn label_containing_parentheses_survives() {
        let body = r#"imdb$dr({"d":[{"id":"tt0057012","l":"Dr. Strangelove (1964)"}]})"#;
        let entries = parse_suggestions(body, "dr");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Dr. Strangelove (1964)");
    }

    #[test]
    fn tag_mismatch_yields_zero_results() {
        assert!(parse_suggestions(BODY, "captain_america").is_empty());
        let wrong_tag = r#"omdb$captain({"d":[]})"#;
        assert!(parse_suggestions(wrong_tag, "captain").is_empty());
    }

    #[test]
    fn structural_garbage_yields_zero_results() {
        for body in ["", "imdb$captain", "imdb$captain)(", "not even close", "()"] {
            assert!(parse_suggestions(body, "captain").is_empty(), "{body:?}");
        }
    }

    #[test]
    fn invalid_inner_json_yields_zero_results() {
        let truncated = r#"imdb$captain({"d":[{"id":"tt1","l":"Cap"})"#;
        assert!(parse_suggestions(truncated, "captain").is_empty());
        let wrong_shape = r#"imdb$captain({"d":"no results"})"#;
        assert!(parse_suggestions(wrong_shape, "captain").is_empty());
    }

    #[test]
    fn missing_results_key_yields_zero_results() {
        let body = r#"imdb$captain({"v":1})"#;
        assert!(parse_suggestions(body, "captain").is_empty());
    }
}
