//! Detail-page enrichment for Title results.
//!
//! Rating and genres live in the title page's HTML, which is a third party's
//! markup and changes on their schedule. The extraction is therefore kept
//! behind [`DetailFetcher`] so the search flow can be exercised against a
//! canned implementation, and the production fetcher is the only place that
//! knows about selectors.

use async_trait::async_trait;
use marquee_http::{HttpClient, HttpError, RequestOpts};
use scraper::{Html, Selector};

/// Default base for title detail pages. Must keep its trailing slash so
/// identifiers join underneath it.
pub const TITLE_BASE: &str = "https://www.imdb.com/title/";

/// Supplementary fields scraped from a title's detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleDetails {
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

/// Pluggable fetch-and-extract collaborator invoked per enriched result.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn title_details(&self, title_id: &str) -> anyhow::Result<TitleDetails>;
}

/// Production fetcher: GETs `{base}/{title_id}` and scrapes known markup
/// locations.
pub struct TitlePageFetcher {
    http: HttpClient,
}

impl TitlePageFetcher {
    pub fn new() -> Result<Self, HttpError> {
        Self::with_base(TITLE_BASE)
    }

    pub fn with_base(base: &str) -> Result<Self, HttpError> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }
}

#[async_trait]
impl DetailFetcher for TitlePageFetcher {
    async fn title_details(&self, title_id: &str) -> anyhow::Result<TitleDetails> {
        let body = self
            .http
            .get_text(title_id, RequestOpts::default())
            .await?;
        Ok(extract_title_details(&body))
    }
}

/// Scrape rating and genres out of a title page body.
///
/// Synchronous on purpose: `scraper::Html` is not `Send`, so the document
/// must not live across an await point. Missing markup simply leaves the
/// corresponding field at its default.
fn extract_title_details(html: &str) -> TitleDetails {
    // Selectors are static strings; parse failures would be programmer error.
    let rating_selector =
        Selector::parse("div.ratingValue strong span").expect("static rating selector");
    let genre_selector = Selector::parse(r#"span[itemprop="genre"]"#).expect("static genre selector");

    let document = Html::parse_document(html);

    let rating = document
        .select(&rating_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| text.trim().parse::<f64>().ok());

    let genres = document
        .select(&genre_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|genre| !genre.is_empty())
        .collect();

    TitleDetails { rating, genres }
}
