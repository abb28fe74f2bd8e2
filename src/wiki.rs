//! MediaWiki API client: title search, page fetch, and the fallback chain
//! that turns a selected title into an article.
//!
//! Fetch results are classified into typed outcomes (page, ambiguous,
//! not-found) so the fallback chain is an explicit finite sequence of attempts
//! rather than nested error handling.

use crate::ui;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client to the Wikipedia API
const USER_AGENT: &str = concat!("wikiq/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum titles requested per search
const SEARCH_LIMIT: &str = "10";

/// Maximum alternatives collected from a disambiguation page
const DISAMBIGUATION_LIMIT: &str = "20";

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wikipedia api error: {0}")]
    Api(String),
    #[error("could not resolve article '{title}': {reason}")]
    Unresolved { title: String, reason: String },
}

/// A resolved encyclopedia article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Canonical (post-redirect) title
    pub title: String,
    /// Plaintext intro extract
    pub summary: String,
}

/// Typed outcome of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(Article),
    Ambiguous { title: String, options: Vec<String> },
    NotFound { title: String },
}

/// Seam between the fallback chain and the HTTP client, so resolution logic
/// is testable without network access.
#[allow(async_fn_in_trait)]
pub trait ArticleSource {
    /// Fetch the page for an exact title, following redirects.
    async fn fetch(&self, title: &str) -> Result<FetchOutcome, WikiError>;
    /// Fetch via search suggestion / first hit for an approximate query.
    async fn fetch_fuzzy(&self, query: &str) -> Result<FetchOutcome, WikiError>;
}

// --- API response shapes (formatversion=2) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    pages: Vec<PageBody>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<PageLink>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    title: String,
}

/// Client for one MediaWiki API endpoint.
pub struct WikiClient {
    client: Client,
    api_url: String,
}

impl WikiClient {
    /// Create a client for the given API endpoint (e.g. the English
    /// Wikipedia's `w/api.php`).
    pub fn new(api_url: &str) -> Result<Self, WikiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    /// Search for article titles matching the query, in ranking order.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, WikiError> {
        Ok(self.search_with_suggestion(query).await?.0)
    }

    /// Search returning both the title list and the API's spelling/near-match
    /// suggestion, used by the fuzzy fetch path.
    async fn search_with_suggestion(
        &self,
        query: &str,
    ) -> Result<(Vec<String>, Option<String>), WikiError> {
        // The API rejects an empty srsearch; treat it as zero matches.
        if query.is_empty() {
            return Ok((Vec::new(), None));
        }
        let response = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", SEARCH_LIMIT),
                ("srinfo", "suggestion"),
                ("srprop", ""),
            ])
            .await?;
        let body = response.query.unwrap_or_default();
        let titles = body.search.into_iter().map(|hit| hit.title).collect();
        let suggestion = body.searchinfo.and_then(|info| info.suggestion);
        Ok((titles, suggestion))
    }

    /// Fetch one page by exact title, following redirects, and classify the
    /// result.
    async fn fetch_page(&self, title: &str) -> Result<FetchOutcome, WikiError> {
        let response = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops|links"),
                ("explaintext", "1"),
                ("exintro", "1"),
                ("ppprop", "disambiguation"),
                ("plnamespace", "0"),
                ("pllimit", DISAMBIGUATION_LIMIT),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;
        let page = response
            .query
            .unwrap_or_default()
            .pages
            .into_iter()
            .next();
        match page {
            Some(page) => Ok(classify_page(page)),
            None => Ok(FetchOutcome::NotFound {
                title: title.to_string(),
            }),
        }
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<ApiResponse, WikiError> {
        let response: ApiResponse = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(error) = response.error {
            return Err(WikiError::Api(format!("{}: {}", error.code, error.info)));
        }
        Ok(response)
    }
}

impl ArticleSource for WikiClient {
    async fn fetch(&self, title: &str) -> Result<FetchOutcome, WikiError> {
        self.fetch_page(title).await
    }

    async fn fetch_fuzzy(&self, query: &str) -> Result<FetchOutcome, WikiError> {
        let (titles, suggestion) = self.search_with_suggestion(query).await?;
        let candidate = suggestion.or_else(|| titles.into_iter().next());
        match candidate {
            Some(title) => self.fetch_page(&title).await,
            None => Ok(FetchOutcome::NotFound {
                title: query.to_string(),
            }),
        }
    }
}

/// Classify a raw API page object into a typed outcome.
fn classify_page(page: PageBody) -> FetchOutcome {
    if page.missing || page.invalid {
        return FetchOutcome::NotFound { title: page.title };
    }
    let is_disambiguation = page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some());
    if is_disambiguation {
        return FetchOutcome::Ambiguous {
            title: page.title,
            options: page.links.into_iter().map(|link| link.title).collect(),
        };
    }
    FetchOutcome::Page(Article {
        title: page.title,
        summary: page.extract.unwrap_or_default(),
    })
}

/// Resolve a selected title to an article, with one level of fallback:
/// a disambiguation result retries the first listed alternative, a missing
/// page retries the original query with fuzzy matching. Exhausting the
/// fallback is fatal.
pub async fn resolve(
    source: &impl ArticleSource,
    title: &str,
    query: &str,
) -> Result<Article, WikiError> {
    match source.fetch(title).await? {
        FetchOutcome::Page(article) => Ok(article),
        FetchOutcome::Ambiguous { title, options } => {
            let alternative = options.into_iter().next().ok_or_else(|| {
                WikiError::Unresolved {
                    title: title.clone(),
                    reason: "disambiguation page listed no alternatives".to_string(),
                }
            })?;
            ui::warn(format!("Disambiguation: using first option '{alternative}'"));
            match source.fetch(&alternative).await? {
                FetchOutcome::Page(article) => Ok(article),
                FetchOutcome::Ambiguous { .. } => Err(WikiError::Unresolved {
                    title: alternative,
                    reason: "still ambiguous after one fallback".to_string(),
                }),
                FetchOutcome::NotFound { .. } => Err(WikiError::Unresolved {
                    title: alternative,
                    reason: "first alternative has no page".to_string(),
                }),
            }
        }
        FetchOutcome::NotFound { title: missing } => {
            ui::warn(format!(
                "Page '{missing}' not found, retrying with fuzzy matching..."
            ));
            match source.fetch_fuzzy(query).await? {
                FetchOutcome::Page(article) => Ok(article),
                FetchOutcome::Ambiguous { title, .. } => Err(WikiError::Unresolved {
                    title,
                    reason: "ambiguous after fuzzy retry".to_string(),
                }),
                FetchOutcome::NotFound { title } => Err(WikiError::Unresolved {
                    title,
                    reason: "no page found after fuzzy retry".to_string(),
                }),
            }
        }
    }
}
