use std::{num::NonZeroU32, sync::Arc};

use futures::{StreamExt, stream};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::AppResult,
    models::{MovieDetails, clean},
};

/// Client for the OMDb API. One endpoint, two query shapes: `t=` for an
/// exact-title lookup, `s=` for a substring search returning stubs.
pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    max_concurrent: usize,
}

impl OmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        rps: u32,
        max_concurrent: usize,
    ) -> Self {
        if api_key.trim().is_empty() {
            warn!("no OMDb API key configured; lookups will be rejected upstream");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter, max_concurrent }
    }

    /// Looks up one movie by exact title. Returns `None` when the upstream
    /// status field says the title is unknown.
    pub async fn fetch_by_title(&self, title: &str) -> AppResult<Option<MovieDetails>> {
        self.limiter.until_ready().await;

        let resp: DetailResponse = self
            .client
            .get(self.endpoint())
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(title = %title, found = resp.is_found(), "exact-title lookup");
        Ok(resp.into_details())
    }

    /// Searches by title substring, then fetches full detail for every stub
    /// the search returns. Stubs whose detail fetch fails are logged and
    /// dropped; the rest come back in search order.
    pub async fn search_by_title(&self, query: &str) -> AppResult<Vec<MovieDetails>> {
        self.limiter.until_ready().await;

        let resp: SearchResponse = self
            .client
            .get(self.endpoint())
            .query(&[("s", query), ("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !resp.is_found() {
            debug!(query = %query, "substring search found nothing");
            return Ok(Vec::new());
        }

        debug!(query = %query, stubs = resp.search.len(), "substring search returned stubs");

        let detailed: Vec<Option<MovieDetails>> = stream::iter(resp.search)
            .map(|stub| async move {
                debug!(title = %stub.title, year = ?stub.year, "fetching detail for stub");
                match self.fetch_by_title(&stub.title).await {
                    Ok(found) => found,
                    Err(err) => {
                        warn!(title = %stub.title, error = %err, "dropping stub after failed detail fetch");
                        None
                    },
                }
            })
            .buffered(self.max_concurrent.max(1))
            .collect()
            .await;

        Ok(detailed.into_iter().flatten().collect())
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailResponse {
    response: String,
    title: Option<String>,
    year: Option<String>,
    rated: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    writer: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
}

impl DetailResponse {
    fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    fn into_details(self) -> Option<MovieDetails> {
        if !self.is_found() {
            return None;
        }
        Some(MovieDetails {
            title: self.title.as_deref().and_then(clean),
            year: self.year.as_deref().and_then(clean),
            rated: self.rated.as_deref().and_then(clean),
            released: self.released.as_deref().and_then(clean),
            runtime: self.runtime.as_deref().and_then(clean),
            genre: self.genre.as_deref().and_then(clean),
            director: self.director.as_deref().and_then(clean),
            writer: self.writer.as_deref().and_then(clean),
            actors: self.actors.as_deref().and_then(clean),
            plot: self.plot.as_deref().and_then(clean),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    response: String,
    #[serde(default)]
    search: Vec<SearchStub>,
}

impl SearchResponse {
    fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchStub {
    title: String,
    year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_HIT: &str = r#"{
        "Title": "The Matrix",
        "Year": "1999",
        "Rated": "R",
        "Released": "31 Mar 1999",
        "Runtime": "136 min",
        "Genre": "Action, Sci-Fi",
        "Director": "Lana Wachowski, Lilly Wachowski",
        "Writer": "Lilly Wachowski, Lana Wachowski",
        "Actors": "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
        "Plot": "A computer hacker learns the truth about his reality.",
        "imdbRating": "8.7",
        "Response": "True"
    }"#;

    const DETAIL_MISS: &str = r#"{"Response":"False","Error":"Movie not found!"}"#;

    #[test]
    fn detail_payload_decodes_into_details() {
        let resp: DetailResponse = serde_json::from_str(DETAIL_HIT).unwrap();
        let details = resp.into_details().unwrap();
        assert_eq!(details.title.as_deref(), Some("The Matrix"));
        assert_eq!(details.runtime.as_deref(), Some("136 min"));
        assert_eq!(
            details.actors.as_deref(),
            Some("Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss")
        );
    }

    #[test]
    fn not_found_status_yields_none_not_an_error() {
        let resp: DetailResponse = serde_json::from_str(DETAIL_MISS).unwrap();
        assert!(resp.into_details().is_none());
    }

    #[test]
    fn placeholder_fields_decode_as_absent() {
        let resp: DetailResponse = serde_json::from_str(
            r#"{"Response":"True","Title":"Pi","Rated":"N/A","Writer":""}"#,
        )
        .unwrap();
        let details = resp.into_details().unwrap();
        assert_eq!(details.title.as_deref(), Some("Pi"));
        assert_eq!(details.rated, None);
        assert_eq!(details.writer, None);
        assert_eq!(details.plot, None);
    }

    #[test]
    fn search_payload_decodes_stubs_in_order() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{
                "Search": [
                    {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie"},
                    {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie"}
                ],
                "totalResults": "2",
                "Response": "True"
            }"#,
        )
        .unwrap();
        assert!(resp.is_found());
        let titles: Vec<_> = resp.search.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["The Matrix", "The Matrix Reloaded"]);
    }

    #[test]
    fn empty_search_payload_decodes_without_stub_list() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(!resp.is_found());
        assert!(resp.search.is_empty());
    }
}
