use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;

use crate::error::LookupError;

/// Abstract JSON transport used by the state store.
///
/// Both operations race an internal fixed-duration timeout and fail with
/// [`LookupError::RemoteRejection`] when the response carries a non-success
/// status, attaching the server-supplied message.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, LookupError>;
    async fn send_json(&self, url: &str, body: &Value) -> Result<Value, LookupError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; RecipeBrowser/1.0)")
            .build()?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    async fn decode(&self, response: reqwest::Response) -> Result<Value, LookupError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Request failed")
                    .to_string(),
                Err(_) => "Request failed".to_string(),
            };
            return Err(LookupError::RemoteRejection {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        debug!("GET {url}");
        let request = self.client.get(url).send();
        let response = timeout(Duration::from_secs(self.timeout_secs), request)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout_secs))??;

        self.decode(response).await
    }

    async fn send_json(&self, url: &str, body: &Value) -> Result<Value, LookupError> {
        debug!("POST {url}");
        let request = self.client.post(url).json(body).send();
        let response = timeout(Duration::from_secs(self.timeout_secs), request)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout_secs))??;

        self.decode(response).await
    }
}
