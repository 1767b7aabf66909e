//! Catalogue client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration values for the OMDb catalogue client and search pipeline.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OMDB")]
pub struct OmdbSettings {
    /// API key sent with every catalogue request.
    pub api_key: Option<String>,
    /// Optional endpoint override, primarily for tests.
    pub endpoint: Option<String>,
    /// Quiescence interval before a typed query is searched, in milliseconds.
    #[ortho_config(default = 500)]
    pub search_debounce_ms: u64,
    /// Per-request HTTP timeout, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

/// Failures raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid catalogue endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// The rejected endpoint value.
        endpoint: String,
        /// Parser failure detail.
        source: url::ParseError,
    },
}

impl OmdbSettings {
    /// Return the configured endpoint, falling back to the public OMDb URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] when the override does not
    /// parse as a URL.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(raw).map_err(|source| SettingsError::InvalidEndpoint {
            endpoint: raw.to_owned(),
            source,
        })
    }

    /// Return the search debounce as a [`Duration`].
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Return the request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalogue configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> OmdbSettings {
        OmdbSettings::load_from_iter([OsString::from("cinefile")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("OMDB_API_KEY", None::<String>),
            ("OMDB_ENDPOINT", None::<String>),
            ("OMDB_SEARCH_DEBOUNCE_MS", None::<String>),
            ("OMDB_REQUEST_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.api_key.is_none());
        assert_eq!(
            settings.endpoint().expect("default endpoint parses").as_str(),
            DEFAULT_ENDPOINT
        );
        assert_eq!(
            settings.search_debounce(),
            Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS)
        );
        assert_eq!(
            settings.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("OMDB_API_KEY", Some("k-123".to_owned())),
            (
                "OMDB_ENDPOINT",
                Some("http://127.0.0.1:9200/omdb/".to_owned()),
            ),
            ("OMDB_SEARCH_DEBOUNCE_MS", Some("250".to_owned())),
            ("OMDB_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_key.as_deref(), Some("k-123"));
        assert_eq!(
            settings.endpoint().expect("override parses").as_str(),
            "http://127.0.0.1:9200/omdb/"
        );
        assert_eq!(settings.search_debounce(), Duration::from_millis(250));
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
    }

    #[rstest]
    fn malformed_endpoint_is_rejected() {
        let _guard = lock_env([("OMDB_ENDPOINT", Some("not a url".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.endpoint(),
            Err(SettingsError::InvalidEndpoint { .. })
        ));
    }
}
