use crate::domain::ports::TransactionStatusSource;
use crate::domain::snapshot::StatusSnapshot;
use crate::domain::transaction::TransactionHandle;
use crate::error::{PollerError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, info};

const STATUS_PATH: &str = "/sypago/debit/transaction/status";

/// Reads debit status from the storefront backend over HTTP.
pub struct HttpStatusSource {
    client: reqwest::Client,
    status_url: String,
}

impl HttpStatusSource {
    /// Builds a source rooted at `api_base_url` (e.g. `http://host:8080/api/v1`).
    pub fn new(api_base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base = api_base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(PollerError::Config("api_base_url is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        let status_url = format!("{}{}", base, STATUS_PATH);
        info!(%status_url, timeout_ms = request_timeout.as_millis() as u64, "HTTP status source ready");

        Ok(Self { client, status_url })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }
}

#[async_trait]
impl TransactionStatusSource for HttpStatusSource {
    async fn fetch_status(&self, handle: &TransactionHandle) -> Result<StatusSnapshot> {
        debug!(url = %self.status_url, %handle, "requesting transaction status");

        let response = self
            .client
            .get(&self.status_url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("transaction_id", handle.transaction_id()),
                ("booking_id", handle.booking_id()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(PollerError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let snapshot = StatusSnapshot::from_json(&body)?;
        debug!(status = %snapshot.status, reason = %snapshot.reason_text, "transaction status received");
        Ok(snapshot)
    }
}
