//! HTTP utilities for the inventory REST API

use crate::error::{Error, ErrorResponse, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Empty query string for requests without parameters
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a response body and drop control characters before logging it
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_LOG_BODY_LENGTH)
            .last()
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper shared by every resource client
#[derive(Debug, Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client; `timeout` of `None` keeps the transport default
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("stockroom/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// GET and decode a JSON body
    pub async fn get<T, Q>(&self, url: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("GET {}", url);
        let body = self.execute(self.client.get(url).query(query), "GET", url).await?;
        decode(&body)
    }

    /// POST a JSON payload and decode the response
    pub async fn post<B, T>(&self, url: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", url);
        let body = self.execute(self.client.post(url).json(payload), "POST", url).await?;
        decode(&body)
    }

    /// PUT a JSON payload and decode the response
    pub async fn put<B, T>(&self, url: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("PUT {}", url);
        let body = self.execute(self.client.put(url).json(payload), "PUT", url).await?;
        decode(&body)
    }

    /// DELETE; any response body is ignored
    pub async fn delete(&self, url: &str) -> Result<()> {
        tracing::debug!("DELETE {}", url);
        self.execute(self.client.delete(url), "DELETE", url).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder, verb: &str, url: &str) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", verb, url, e);
            Error::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} {} -> {} - {}", verb, url, status, sanitize_for_log(&body));
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        Ok(body)
    }
}

/// Decode a response body; an empty body decodes as JSON `null`
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if body.trim().is_empty() {
        return Ok(serde_json::from_str("null")?);
    }
    Ok(serde_json::from_str(body)?)
}
