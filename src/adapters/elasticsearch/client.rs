//! Elasticsearch HTTP client
//!
//! Reads the source index page by page with `from`/`size` search requests
//! over HTTP Basic authentication.

use super::models::{reachable_documents, SearchRequest, SearchResponse, MAX_RESULT_WINDOW};
use crate::adapters::traits::SourceReader;
use crate::config::{secret_string, ElasticsearchConfig, SecretString};
use crate::domain::{EmbarkError, FetchError, Page, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Elasticsearch implementation of [`SourceReader`]
pub struct ElasticsearchSource {
    client: Client,
    search_url: Url,
    auth_header: SecretString,
    id_field: String,
    text_field: String,
}

impl ElasticsearchSource {
    /// Create a new source from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be joined with
    /// the index name or the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use embark::adapters::elasticsearch::ElasticsearchSource;
    /// use embark::config::ElasticsearchConfig;
    ///
    /// let config: ElasticsearchConfig = toml::from_str(r#"
    ///     base_url = "http://localhost:9200"
    ///     index = "documents"
    ///     username = "elastic"
    ///     password = "changeme"
    /// "#).unwrap();
    /// let source = ElasticsearchSource::new(&config).unwrap();
    /// assert!(source.search_url().as_str().ends_with("/documents/_search"));
    /// ```
    pub fn new(config: &ElasticsearchConfig) -> Result<Self> {
        let search_url = build_search_url(&config.base_url, &config.index)?;

        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for Elasticsearch");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            EmbarkError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        let password: &str = config.password.expose_secret().as_ref();
        let credentials = format!("{}:{}", config.username, password);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());

        Ok(Self {
            client,
            search_url,
            auth_header: secret_string(format!("Basic {encoded}")),
            id_field: config.id_field.clone(),
            text_field: config.text_field.clone(),
        })
    }

    /// Fully resolved `_search` endpoint
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

fn build_search_url(base_url: &str, index: &str) -> Result<Url> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .and_then(|url| url.join(&format!("{index}/_search")))
        .map_err(|e| {
            EmbarkError::Configuration(format!(
                "Invalid Elasticsearch URL '{base_url}' for index '{index}': {e}"
            ))
        })
}

#[async_trait]
impl SourceReader for ElasticsearchSource {
    async fn fetch_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> std::result::Result<Page, FetchError> {
        let body = SearchRequest::match_all(
            offset,
            page_size,
            vec![self.id_field.as_str(), self.text_field.as_str()],
        );

        tracing::debug!(
            offset = offset,
            page_size = page_size,
            url = %self.search_url,
            "Fetching page"
        );

        let auth_header: &str = self.auth_header.expose_secret().as_ref();
        let response = self
            .client
            .post(self.search_url.clone())
            .header("Authorization", auth_header)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let parsed: SearchResponse =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;

        let page = parsed.into_page();
        if offset == 0 && reachable_documents(page.total_count) < page.total_count {
            tracing::warn!(
                total_count = page.total_count,
                max_result_window = MAX_RESULT_WINDOW,
                "Index is larger than the from/size window, fetches past it will fail"
            );
        }
        tracing::debug!(
            offset = offset,
            records = page.len(),
            total_count = page.total_count,
            "Fetched page"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_url_without_trailing_slash() {
        let url = build_search_url("http://localhost:9200", "documents").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9200/documents/_search");
    }

    #[test]
    fn test_build_search_url_keeps_path_prefix() {
        let url = build_search_url("https://search.example.com/es/", "docs").unwrap();
        assert_eq!(url.as_str(), "https://search.example.com/es/docs/_search");
    }

    #[test]
    fn test_build_search_url_invalid_base() {
        let err = build_search_url("not a url", "docs").unwrap_err();
        assert!(matches!(err, EmbarkError::Configuration(_)));
    }
}
