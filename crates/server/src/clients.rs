//! Partner API lookup of client records

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("client {0} not found in the partner API")]
    NotFound(String),

    #[error("partner API unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw client records
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Partner JSON for `client_id`, unchanged
    async fn fetch(&self, client_id: &str) -> Result<Value, LookupError>;
}

/// Partner API over HTTP with basic auth
#[derive(Debug, Clone)]
pub struct HttpClientDirectory {
    http: reqwest::Client,
    url: String,
    user: String,
    password: String,
}

impl HttpClientDirectory {
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent(concat!("contratos-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
            user: user.into(),
            password: password.into(),
        })
    }
}

#[async_trait]
impl ClientDirectory for HttpClientDirectory {
    async fn fetch(&self, client_id: &str) -> Result<Value, LookupError> {
        let unavailable = |err: reqwest::Error| LookupError::Unavailable(err.to_string());

        let response = self
            .http
            .get(&self.url)
            .query(&[("id", client_id)])
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(client_id.to_string()));
        }
        let response = response.error_for_status().map_err(unavailable)?;
        let record = response.json::<Value>().await.map_err(unavailable)?;

        log::debug!("Fetched client {client_id} from partner API");
        Ok(record)
    }
}
