//! API Client
//!
//! Binds the shared HTTP client to the backend's base URL.

use super::http::ApiHttpClient;
use crate::config::Config;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Main API client, cheap to clone
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub http: ApiHttpClient,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, http: ApiHttpClient) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("base URL '{}' cannot be a base", base_url)));
        }

        Ok(Self { http, base_url })
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = ApiHttpClient::new(config.request_timeout())?;
        Self::new(&config.effective_base_url(), http)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an absolute URL for an API path such as `/api/product/`
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Make a GET request against an API path
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.http.get(&self.url(path), query).await
    }

    /// Make a POST request against an API path
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.post(&self.url(path), body).await
    }

    /// Make a PUT request against an API path
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.put(&self.url(path), body).await
    }

    /// Make a DELETE request against an API path
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.http.delete(&self.url(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, ApiHttpClient::new(None).unwrap()).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        assert_eq!(
            client("http://localhost:8080/").url("/api/product/"),
            "http://localhost:8080/api/product/"
        );
        assert_eq!(
            client("http://localhost:8080").url("api/product"),
            "http://localhost:8080/api/product"
        );
    }

    #[test]
    fn test_url_keeps_base_prefix() {
        assert_eq!(
            client("https://erp.example.com/inventory/").url("/api/vehicle/42"),
            "https://erp.example.com/inventory/api/vehicle/42"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = ApiClient::new("not a url", ApiHttpClient::new(None).unwrap()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
