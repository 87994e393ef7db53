//! HTTP client for the random integer API

use std::{future::Future, pin::Pin, time::Duration};

use color_eyre::eyre::{eyre, Result};
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::number::{GenerateResponse, ListResponse},
    infrastructure::config::ApiConfig,
};

pub const LIST_PATH: &str = "/api/v1/devtest/randominteger/";
pub const GENERATE_PATH: &str = "/api/v1/devtest/randominteger/generate/";

/// Failure of a single API request. Cloneable so it can travel inside messages.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url,
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode {
                url,
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                url,
                message: err.to_string(),
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Operations offered by the number API
pub trait NumberApi: Send + Sync {
    /// One page of stored numbers, newest first
    fn list(&self, limit: usize, offset: usize) -> ApiFuture<'_, ListResponse>;
    /// Ask the server to generate and store a new number
    fn generate(&self) -> ApiFuture<'_, GenerateResponse>;
}

pub struct HttpNumberApi {
    client: Client,
    base_url: String,
}

impl HttpNumberApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let token = config
            .token
            .as_ref()
            .ok_or_else(|| eyre!("api.token is not configured"))?;

        let mut auth_value =
            header::HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
                .map_err(|e| eyre!("invalid api token: {e}"))?;
        auth_value.set_sensitive(true);
        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, usize)],
    ) -> Result<T, FetchError> {
        log::debug!("GET {url} {query:?}");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

impl NumberApi for HttpNumberApi {
    fn list(&self, limit: usize, offset: usize) -> ApiFuture<'_, ListResponse> {
        let url = format!("{}{LIST_PATH}", self.base_url);
        Box::pin(async move {
            self.get_json(url, &[("limit", limit), ("offset", offset)])
                .await
        })
    }

    fn generate(&self) -> ApiFuture<'_, GenerateResponse> {
        let url = format!("{}{GENERATE_PATH}", self.base_url);
        Box::pin(async move { self.get_json(url, &[]).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn api_config(token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 5,
            token: token.map(|t| SecretString::from(t.to_string())),
        }
    }

    #[test]
    fn test_new_requires_token() {
        assert!(HttpNumberApi::new(&api_config(None)).is_err());
    }

    #[test]
    fn test_new_trims_trailing_slash() -> Result<()> {
        let api = HttpNumberApi::new(&api_config(Some("abc")))?;
        assert_eq!(api.base_url(), "http://localhost:8000");
        Ok(())
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            url: "http://x/api".to_string(),
            status: 401,
        };
        assert_eq!(err.to_string(), "http://x/api responded with HTTP 401");
        assert_eq!(err.url(), "http://x/api");
    }
}
