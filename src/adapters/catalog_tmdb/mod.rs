//! TMDB catalog adapter
//!
//! Two sequential calls: `search/movie` and `movie/{id}`. Both carry a bearer
//! token handed in at construction; no environment lookup happens here.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Longest body excerpt quoted in error messages
const BODY_EXCERPT_CHARS: usize = 200;

/// Bearer token for the catalog. Never printed.
#[derive(Clone)]
pub struct CatalogCredential(String);

impl CatalogCredential {
    /// `None` for a missing or blank token
    pub fn new(token: Option<String>) -> Option<Self> {
        token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self)
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CatalogCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CatalogCredential(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    vote_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
}

/// HTTP client for the TMDB v3 API
#[derive(Debug)]
pub struct TmdbCatalogAdapter {
    http: reqwest::Client,
    base_url: String,
    credential: CatalogCredential,
    language: Option<String>,
}

impl TmdbCatalogAdapter {
    /// Create the adapter. Fails with `MissingCredential` before any request
    /// can be made when `token` is absent or blank.
    pub fn new(settings: &CatalogSettings, token: Option<String>) -> Result<Self, DomainError> {
        let credential = CatalogCredential::new(token)
            .ok_or_else(|| DomainError::MissingCredential(settings.token_env.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credential,
            language: settings.language.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        if let Some(ref language) = self.language {
            params.push(("language", language.clone()));
        }

        debug!("GET {} {:?}", url, params);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.credential.expose())
            .header(ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| DomainError::CatalogUnreachable(format!("GET {}: {}", url, e)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(DomainError::CatalogUnreachable(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| DomainError::CatalogUnreachable(format!("GET {}: {}", url, e)))?;

        decode(&text)
    }
}

#[async_trait]
impl CatalogPort for TmdbCatalogAdapter {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<CatalogCandidate>, DomainError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(year) = year {
            params.push(("primary_release_year", year.to_string()));
        }

        let response: SearchResponse = self.get_json("/search/movie", params).await?;
        let candidates = candidates_from(response);
        if candidates.is_empty() {
            return Err(DomainError::NoCandidatesFound(query.to_string()));
        }
        Ok(candidates)
    }

    async fn fetch_movie_detail(&self, id: u64) -> Result<CatalogDetail, DomainError> {
        let response: DetailResponse = self.get_json(&format!("/movie/{}", id), Vec::new()).await?;
        Ok(detail_from(response))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DomainError> {
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        DomainError::MalformedCatalogResponse(format!("{}. Response: {}", e, excerpt))
    })
}

/// Decode a `search/movie` body, keeping the catalog's order
pub fn parse_search_body(body: &str) -> Result<Vec<CatalogCandidate>, DomainError> {
    decode::<SearchResponse>(body).map(candidates_from)
}

/// Decode a `movie/{id}` body
pub fn parse_detail_body(body: &str) -> Result<CatalogDetail, DomainError> {
    decode::<DetailResponse>(body).map(detail_from)
}

fn candidates_from(response: SearchResponse) -> Vec<CatalogCandidate> {
    response
        .results
        .into_iter()
        .map(|item| CatalogCandidate {
            id: item.id,
            // Left empty when untitled; binding the selected candidate rejects it
            title: item
                .title
                .or_else(|| item.original_title.clone())
                .unwrap_or_default(),
            original_title: item.original_title,
            release_year: item.release_date.as_deref().and_then(release_year),
            vote_average: item.vote_average.unwrap_or(0.0),
            vote_count: item.vote_count.unwrap_or(0),
            runtime_minutes: None,
        })
        .collect()
}

fn detail_from(response: DetailResponse) -> CatalogDetail {
    CatalogDetail {
        id: response.id,
        title: response.title.or(response.original_title).unwrap_or_default(),
        // TMDB reports 0 for unknown runtimes
        runtime_minutes: response.runtime.filter(|minutes| *minutes > 0),
    }
}

/// Four-digit year from a `YYYY-MM-DD` release date
fn release_year(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| format!("{:04}", date.year()))
}
