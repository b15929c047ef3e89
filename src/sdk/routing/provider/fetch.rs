use std::future::Future;

use reqwest::{Client, Url};

use crate::sdk::routing::error::RoutingError;

/// Fetches the raw body behind a URL.
pub trait HttpFetch: Send + Sync {
    fn fetch(&self, url: Url) -> impl Future<Output = Result<String, RoutingError>> + Send;
}

/// `HttpFetch` over a shared reqwest client. The request deadline is owned by
/// the provider, so the client itself carries no timeout.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, url: Url) -> Result<String, RoutingError> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send WFS request. URL: {}\nError: {}", url, e);
                return Err(RoutingError::UpstreamRequest(e));
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::error!(
                "WFS service returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(RoutingError::UpstreamStatus {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}
