use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use ember_types::api::ApiRequest;

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The single POST endpoint of the streak service.
///
/// Implementations return the raw JSON body. Interpreting `error` fields and
/// status tags is left to [`crate::api::ApiClient`].
#[async_trait]
pub trait StreakApi: Send + Sync {
    async fn post(&self, request: &ApiRequest) -> Result<Value, TransportError>;
}

pub struct HttpApi {
    client: Client,
    url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl StreakApi for HttpApi {
    async fn post(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        debug!("POST {} action={}", self.url, request.action());

        // Status code is not checked: the service reports failures as
        // `{ "error": ... }` bodies, sometimes alongside a 500.
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        debug!("{} -> HTTP {}", request.action(), status);
        Ok(value)
    }
}
