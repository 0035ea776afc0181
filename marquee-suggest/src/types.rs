use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SuggestError;

/// Search vertical understood by the suggestion endpoint.
///
/// Anything other than these two values is a configuration error, reported
/// when the value is parsed and therefore before any request exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Titles,
}

impl Category {
    /// URL path segment for this vertical (empty for [`Category::All`]).
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            Category::All => "",
            Category::Titles => "titles/",
        }
    }
}

impl FromStr for Category {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Category::All),
            "Titles" => Ok(Category::Titles),
            other => Err(SuggestError::Config(format!(
                "category can only be All or Titles, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str("All"),
            Category::Titles => f.write_str("Titles"),
        }
    }
}

/// One logical search, built caller-side and passed to
/// [`SuggestClient::search`](crate::SuggestClient::search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text; normalization happens inside the client.
    pub query: String,
    /// Search vertical. Defaults to [`Category::All`].
    pub category: Category,
    /// Result cap. `None` returns everything the endpoint sent back;
    /// non-positive values are corrected to `None` with a warning.
    pub top: Option<i64>,
    /// Fetch rating/genres for Title results from their detail page.
    pub enrich: bool,
    /// Dump the decoded suggestion payload at debug level.
    pub debug: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: Category::All,
            top: None,
            enrich: false,
            debug: false,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn top(mut self, top: i64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn enrich(mut self, enrich: bool) -> Self {
        self.enrich = enrich;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Entity kind decoded from the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// `nm` identifiers.
    Person,
    /// `tt` identifiers.
    Title,
    /// Any other prefix.
    Unknown,
}

impl EntityKind {
    pub fn from_id(id: &str) -> Self {
        if id.starts_with("nm") {
            EntityKind::Person
        } else if id.starts_with("tt") {
            EntityKind::Title
        } else {
            EntityKind::Unknown
        }
    }
}

/// One matched candidate, in endpoint order.
///
/// Optional fields carry "absent" explicitly: a missing year stays `None`
/// rather than turning into a fake 0, and enrichment that was skipped or
/// failed leaves `rating` as `None` and `genres` empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
    pub year: Option<i32>,
    /// Endpoint-reported category code (e.g. "feature", "TV series").
    pub category_code: Option<String>,
    /// 1-based position among the kept results.
    pub rank: usize,
    /// Positional-overlap percentage against the normalized query,
    /// see [`score::match_score`](crate::score::match_score).
    pub match_score: f64,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

impl fmt::Display for SuggestionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntityKind::Title => {
                write!(f, "Title ({}) | {}", self.id, self.label)?;
                if let Some(year) = self.year {
                    write!(f, " {year}")?;
                }
                write!(f, " | Match: {}%", self.match_score)
            }
            EntityKind::Person => write!(f, "Person ({}) | {}", self.id, self.label),
            EntityKind::Unknown => write!(f, "Unknown ({}) | {}", self.id, self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_known_values() {
        assert_eq!("All".parse::<Category>().unwrap(), Category::All);
        assert_eq!("Titles".parse::<Category>().unwrap(), Category::Titles);
    }

    #[test]
    fn bogus_category_is_a_config_error() {
        let err = "Bogus".parse::<Category>().unwrap_err();
        assert!(matches!(err, SuggestError::Config(_)));
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn entity_kind_follows_id_prefix() {
        assert_eq!(EntityKind::from_id("nm0000123"), EntityKind::Person);
        assert_eq!(EntityKind::from_id("tt4154796"), EntityKind::Title);
        assert_eq!(EntityKind::from_id("co0000001"), EntityKind::Unknown);
        assert_eq!(EntityKind::from_id(""), EntityKind::Unknown);
    }

    #[test]
    fn display_matches_expected_shapes() {
        let title = SuggestionResult {
            id: "tt4154796".into(),
            label: "Avengers: Endgame".into(),
            kind: EntityKind::Title,
            year: Some(2019),
            category_code: Some("feature".into()),
            rank: 1,
            match_score: 46.67,
            rating: None,
            genres: Vec::new(),
        };
        assert_eq!(
            title.to_string(),
            "Title (tt4154796) | Avengers: Endgame 2019 | Match: 46.67%"
        );

        let person = SuggestionResult {
            id: "nm0000123".into(),
            label: "Chris Evans".into(),
            kind: EntityKind::Person,
            year: None,
            category_code: None,
            rank: 2,
            match_score: 10.0,
            rating: None,
            genres: Vec::new(),
        };
        assert_eq!(person.to_string(), "Person (nm0000123) | Chris Evans");
    }
}
