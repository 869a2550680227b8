use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::Delivery;
use crate::types::OwnerReport;

const CONNECT_TIMEOUT: u64 = 5;
const READ_TIMEOUT: u64 = 30;

/// POSTs each owner's report as JSON to a webhook.
pub struct HttpDelivery {
    client: Client,
    endpoint: String,
}

impl HttpDelivery {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT))
            .timeout(Duration::from_secs(READ_TIMEOUT))
            .build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl Delivery for HttpDelivery {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, _address: &str, report: &OwnerReport) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(report)
            .send()
            .await
            .map_err(|e| anyhow!("POST send error: {e}"))?;

        if !resp.status().is_success() {
            let code = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("POST {} failed: {code} - {body}", self.endpoint));
        }
        Ok(())
    }
}
