use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::FetchError;

/// Thin HTTP client for the Met Office APIs.
///
/// Every call is a single GET with the configured timeout; nothing is
/// retried or cached.
#[derive(Debug, Clone)]
pub struct MetOfficeClient {
    http: Client,
    api_key: String,
}

impl MetOfficeClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
        })
    }

    /// GET `url` and parse the body as JSON, passing the API key as the `key`
    /// query parameter unless `params` already carries one.
    pub async fn fetch_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let query = with_api_key(params, &self.api_key);
        self.execute(self.http.get(url).query(&query)).await
    }

    /// GET `url` and parse the body as JSON, passing the API key in the
    /// `apikey` header as the Weather DataHub expects.
    pub async fn fetch_json_with_key_header(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let request = self
            .http
            .get(url)
            .header("accept", "application/json")
            .header("apikey", &self.api_key)
            .query(params);
        self.execute(request).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, FetchError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("An error occurred: {}", e);
            FetchError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("HTTP Error: {} - {}", status.as_u16(), body);
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Upstream returned malformed JSON: {}", e);
            FetchError::Decode(e)
        })
    }
}

fn with_api_key<'a>(params: &[(&'a str, String)], api_key: &str) -> Vec<(&'a str, String)> {
    let mut query = params.to_vec();
    if !query.iter().any(|(name, _)| *name == "key") {
        query.push(("key", api_key.to_string()));
    }
    query
}
