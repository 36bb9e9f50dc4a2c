//! Discogs exploring source
//!
//! Database-backed artist lookup. Searches Discogs for artists by name, takes
//! the top result only and loads its artist resource. The artist is accepted
//! when its `name` equals the queried name case-insensitively (no trimming,
//! no diacritic folding); its profile is returned as-is.
//!
//! # API Reference
//! - Search: `GET /database/search?q=<name>&type=artist`
//! - Artist: `GET /artists/{id}`
//! - Auth: `Authorization: Discogs token=<user token>`

use async_trait::async_trait;
use lappi_common::config::ExploringConfig;
use lappi_common::{Error, Registry, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{build_http_client, check_status, read_user_token, transport_error, ExploringSource};

pub const SOURCE_NAME: &str = "discogs.com";

/// Registry key holding the Discogs personal access token
pub const USER_TOKEN_KEY: &str = "exploring.sources.discogs.user_token";

const USER_AGENT: &str = concat!("LappiExplorer/", env!("CARGO_PKG_VERSION"));

/// Discogs search response (only the fields used here)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One artist search hit
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Discogs artist ID
    pub id: u64,
    /// Display title; may carry a disambiguation suffix
    #[serde(default)]
    pub title: String,
}

/// Discogs artist resource
#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    /// Free-text biography; absent for sparse entries
    #[serde(default)]
    pub profile: String,
}

/// Case-insensitive name equality, applied to the top search hit's artist only
pub fn names_match(found: &str, requested: &str) -> bool {
    found.to_lowercase() == requested.to_lowercase()
}

/// Discogs API client scoped to one user token
pub struct DiscogsSource {
    http_client: reqwest::Client,
    api_url: String,
    user_token: String,
}

impl DiscogsSource {
    /// `api_url` is the API root, e.g. `https://api.discogs.com`
    pub fn new(user_token: String, api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(timeout, USER_AGENT)?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            user_token,
        })
    }

    /// Build from the token stored under [`USER_TOKEN_KEY`]
    pub fn from_registry(registry: &Registry, config: &ExploringConfig) -> Result<Self> {
        let user_token = read_user_token(registry, USER_TOKEN_KEY)?;
        Self::new(user_token, config.discogs_api_url.clone(), config.request_timeout())
    }

    /// Artist search, best match first
    pub async fn search_artists(&self, artist_name: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/database/search", self.api_url);
        debug!(artist = %artist_name, "Searching Discogs");

        let request = self
            .http_client
            .get(&url)
            .query(&[("q", artist_name), ("type", "artist")]);
        let response: SearchResponse = self.send_json(request).await?;
        Ok(response.results)
    }

    pub async fn fetch_artist(&self, artist_id: u64) -> Result<Artist> {
        let url = format!("{}/artists/{}", self.api_url, artist_id);
        self.send_json(self.http_client.get(&url)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Discogs token={}", self.user_token),
            )
            .send()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, e))?;

        check_status(SOURCE_NAME, response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, e))
    }
}

#[async_trait]
impl ExploringSource for DiscogsSource {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn get_artist_description(&self, artist_name: &str) -> Result<String> {
        let results = self.search_artists(artist_name).await?;
        let not_found = || Error::Lookup(format!("Artist '{}' not found on Discogs", artist_name));

        let top = results.first().ok_or_else(not_found)?;
        debug!(discogs_id = top.id, title = %top.title, "Top Discogs search hit");

        let artist = self.fetch_artist(top.id).await?;
        if !names_match(&artist.name, artist_name) {
            debug!(found = %artist.name, requested = %artist_name, "Top hit name mismatch");
            return Err(not_found());
        }

        info!(
            artist = %artist.name,
            discogs_id = artist.id,
            "Retrieved artist profile from Discogs"
        );
        Ok(artist.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_ignores_case() {
        assert!(names_match("Daft Punk", "daft punk"));
        assert!(names_match("BJÖRK", "björk"));
    }

    #[test]
    fn test_names_match_does_not_trim_or_fold() {
        assert!(!names_match("Daft Punk ", "Daft Punk"));
        assert!(!names_match("Bjork", "Björk"));
        assert!(!names_match("Daft Punk (2)", "Daft Punk"));
    }

    #[test]
    fn test_api_url_trailing_slash_removed() {
        let source = DiscogsSource::new(
            "token".to_string(),
            "https://api.discogs.com/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(source.api_url, "https://api.discogs.com");
    }

    #[test]
    fn test_search_response_tolerates_missing_results() {
        let response: SearchResponse = serde_json::from_str(r#"{"pagination": {}}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_artist_without_profile_deserializes() {
        let artist: Artist = serde_json::from_str(r#"{"id": 7, "name": "Quiet"}"#).unwrap();
        assert_eq!(artist.profile, "");
    }
}
