//! reqwest backed JSON transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use crate::domain::repositories::JsonTransport;
use crate::infrastructure::config::ApiKey;
use crate::shared::constants::MAX_ERROR_BODY_SNIPPET;
use crate::shared::error::TokenError;
use crate::shared::types::{JsonPayload, TokenResult};

pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<ApiKey>,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<ApiKey>,
        timeout: Duration,
    ) -> TokenResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(TokenError::config("Transport base URL is empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, url: String, request: RequestBuilder) -> TokenResult<JsonPayload> {
        let request = match &self.api_key {
            Some(key) => request.header(key.header, key.value.as_str()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY_SNIPPET).collect();
            log::debug!("HTTP {} from {}", status, url);
            return Err(TokenError::network(format!(
                "HTTP {} from {}: {}",
                status,
                url,
                snippet.trim()
            )));
        }

        Ok(response.json::<JsonPayload>().await?)
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<JsonPayload, TokenError> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    async fn post_json(&self, path: &str, body: JsonPayload) -> Result<JsonPayload, TokenError> {
        let url = self.url(path);
        let request = self.client.post(&url).json(&body);
        self.send(url, request).await
    }
}
