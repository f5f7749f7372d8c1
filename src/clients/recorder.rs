//! HTTP client for the transaction service's append endpoint.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::Client;
use serde::Serialize;

use crate::domain::Direction;
use crate::ports::{RecorderError, TransactionRecorder};

/// Wire payload for `POST {base}/add`. The transaction service expects the
/// timestamp as epoch millis in a string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordPayload<'a> {
    account_number: &'a str,
    amount: &'a BigDecimal,
    #[serde(rename = "type")]
    direction: Direction,
    timestamp: String,
}

#[derive(Clone)]
pub struct HttpTransactionRecorder {
    client: Client,
    base_url: String,
}

impl HttpTransactionRecorder {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl TransactionRecorder for HttpTransactionRecorder {
    async fn append(
        &self,
        account_number: &str,
        amount: &BigDecimal,
        direction: Direction,
        timestamp_millis: i64,
    ) -> Result<(), RecorderError> {
        let url = format!("{}/add", self.base_url.trim_end_matches('/'));
        let payload = RecordPayload {
            account_number,
            amount,
            direction,
            timestamp: timestamp_millis.to_string(),
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(RecorderError::Rejected(format!(
                "recorder returned status {} for account {}",
                response.status(),
                account_number
            )));
        }

        Ok(())
    }
}
