//! Reqwest-backed OMDb source adapter.
//!
//! This adapter owns transport details only: query-string construction, timeout
//! and HTTP error mapping, and JSON decoding into domain movie records. OMDb
//! signals logical misses inside a `200 OK` body, so status mapping and outcome
//! tagging are separate steps.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{LookupResponseDto, SearchResponseDto};
use crate::domain::movie::ImdbId;
use crate::domain::ports::{LookupOutcome, MovieSource, MovieSourceError, SearchOutcome};

/// OMDb source adapter that performs HTTP GET requests against one endpoint.
pub struct OmdbHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OmdbHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<Vec<u8>, MovieSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl MovieSource for OmdbHttpSource {
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSourceError> {
        let body = self
            .fetch(&[("s", query), ("type", "movie"), ("page", "1")])
            .await?;
        parse_search(&body)
    }

    async fn find_by_id(&self, id: &ImdbId) -> Result<LookupOutcome, MovieSourceError> {
        let body = self.fetch(&[("i", id.as_str()), ("plot", "full")]).await?;
        parse_lookup(&body)
    }

    async fn find_by_title(&self, title: &str) -> Result<LookupOutcome, MovieSourceError> {
        let body = self.fetch(&[("t", title), ("type", "movie")]).await?;
        parse_lookup(&body)
    }
}

fn parse_search(body: &[u8]) -> Result<SearchOutcome, MovieSourceError> {
    let decoded: SearchResponseDto = serde_json::from_slice(body).map_err(|error| {
        MovieSourceError::decode(format!("invalid OMDb JSON payload: {error}"))
    })?;
    decoded.into_outcome().map_err(MovieSourceError::decode)
}

fn parse_lookup(body: &[u8]) -> Result<LookupOutcome, MovieSourceError> {
    let decoded: LookupResponseDto = serde_json::from_slice(body).map_err(|error| {
        MovieSourceError::decode(format!("invalid OMDb JSON payload: {error}"))
    })?;
    decoded.into_outcome().map_err(MovieSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> MovieSourceError {
    if error.is_timeout() {
        MovieSourceError::timeout(error.to_string())
    } else {
        MovieSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MovieSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => MovieSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MovieSourceError::timeout(message)
        }
        _ if status.is_client_error() => MovieSourceError::invalid_request(message),
        _ => MovieSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network OMDb mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "InvalidRequest")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_expected_domain_errors(
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, b"{\"Error\":\"Request limit reached!\"}");
        let matched = match expected {
            "RateLimited" => matches!(error, MovieSourceError::RateLimited { .. }),
            "Timeout" => matches!(error, MovieSourceError::Timeout { .. }),
            "InvalidRequest" => matches!(error, MovieSourceError::InvalidRequest { .. }),
            "Transport" => matches!(error, MovieSourceError::Transport { .. }),
            other => panic!("unsupported test expectation: {other}"),
        };
        assert!(matched, "{status} should map to {expected}");
    }

    #[test]
    fn status_message_includes_a_compact_body_preview() {
        let error = map_status_error(
            StatusCode::UNAUTHORIZED,
            b"{\n  \"Error\": \"Invalid API key!\"\n}",
        );
        let MovieSourceError::InvalidRequest { message } = error else {
            panic!("401 should map to InvalidRequest");
        };
        assert_eq!(message, "status 401: { \"Error\": \"Invalid API key!\" }");
    }

    #[test]
    fn parses_search_hits_into_found_outcome() {
        let body = r#"{
            "Search": [
                {
                    "Title": "The Matrix",
                    "Year": "1999",
                    "imdbID": "tt0133093",
                    "Type": "movie",
                    "Poster": "https://example.invalid/matrix.jpg"
                },
                {
                    "Title": "The Matrix Reloaded",
                    "Year": "2003",
                    "imdbID": "tt0234215",
                    "Type": "movie",
                    "Poster": "N/A"
                }
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let outcome = parse_search(body.as_bytes()).expect("JSON should decode");
        let SearchOutcome::Found(movies) = outcome else {
            panic!("populated search should tag as Found");
        };
        assert_eq!(movies.len(), 2);
        assert_eq!(
            movies.first().map(|m| m.imdb_id.as_str()),
            Some("tt0133093")
        );
    }

    #[test]
    fn flagged_false_search_tags_as_no_match_with_upstream_message() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;

        let outcome = parse_search(body.as_bytes()).expect("JSON should decode");
        assert_eq!(
            outcome,
            SearchOutcome::NoMatch {
                message: Some("Movie not found!".to_owned()),
            }
        );
    }

    #[test]
    fn flagged_true_search_with_empty_results_tags_as_no_match() {
        let body = r#"{"Response":"True","Search":[]}"#;

        let outcome = parse_search(body.as_bytes()).expect("JSON should decode");
        assert_eq!(outcome, SearchOutcome::NoMatch { message: None });
    }

    #[test]
    fn parses_lookup_detail_with_full_plot_fields() {
        let body = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets...",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Type": "movie",
            "Poster": "https://example.invalid/inception.jpg",
            "Response": "True"
        }"#;

        let outcome = parse_lookup(body.as_bytes()).expect("JSON should decode");
        let LookupOutcome::Found(movie) = outcome else {
            panic!("flagged-true lookup should tag as Found");
        };
        assert_eq!(movie.imdb_id.as_str(), "tt1375666");
        assert_eq!(movie.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(movie.runtime.as_deref(), Some("148 min"));
    }

    #[test]
    fn lookup_without_optional_detail_defaults_missing_catalogue_fields() {
        let body = r#"{
            "Title": "Obscure Short",
            "imdbID": "tt9999999",
            "Response": "True"
        }"#;

        let outcome = parse_lookup(body.as_bytes()).expect("JSON should decode");
        let LookupOutcome::Found(movie) = outcome else {
            panic!("flagged-true lookup should tag as Found");
        };
        assert_eq!(movie.year, "N/A");
        assert_eq!(movie.poster, "N/A");
        assert!(movie.plot.is_none());
    }

    #[test]
    fn rejects_records_missing_the_catalogue_id() {
        let body = r#"{"Title":"Nameless","Response":"True"}"#;

        let error = parse_lookup(body.as_bytes()).expect_err("decode should fail");
        assert!(
            matches!(error, MovieSourceError::Decode { .. }),
            "missing imdbID should map to Decode errors",
        );
    }

    #[test]
    fn rejects_non_json_payloads() {
        let error = parse_search(b"<html>upstream error</html>").expect_err("decode should fail");
        assert!(matches!(error, MovieSourceError::Decode { .. }));
    }
}
