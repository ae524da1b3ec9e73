use crate::domain::ports::ReferenceSource;
use crate::utils::error::{PricerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl ReferenceSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making reference request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Reference response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PricerError::ReferenceError {
                message: format!("{} returned HTTP {}", self.url, response.status()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_successful_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/gems.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body("carat,cut\n0.3,Ideal\n");
        });

        let source = HttpSource::new(server.url("/gems.csv"), Duration::from_secs(5)).unwrap();
        let bytes = source.fetch().await.unwrap();

        mock.assert();
        assert_eq!(bytes, b"carat,cut\n0.3,Ideal\n");
        assert!(source.describe().ends_with("/gems.csv"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        });

        let source = HttpSource::new(server.url("/missing.csv"), Duration::from_secs(5)).unwrap();
        let err = source.fetch().await.unwrap_err();

        mock.assert();
        assert!(matches!(err, PricerError::ReferenceError { .. }));
    }
}
