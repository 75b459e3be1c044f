//! Network side of the dispatcher

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::FetchError;

/// Performs a single HTTP GET and returns the raw response text
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET for `url` with `params` appended as query parameters
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// `reqwest`-backed transport
///
/// No retries are attempted. Without a timeout a stalled server stalls the
/// caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default client settings and no timeout
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates a transport whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }
}
