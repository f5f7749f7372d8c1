//! HTTP client for the user service's account-number directory.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::ports::{AccountDirectory, DirectoryError};

/// Account descriptor returned by `GET {base}/accountNumber/{userId}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDescriptor {
    #[serde(default)]
    account_number: Option<String>,
}

#[derive(Clone)]
pub struct HttpAccountDirectory {
    client: Client,
    base_url: String,
}

impl HttpAccountDirectory {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AccountDirectory for HttpAccountDirectory {
    async fn resolve_account_number(&self, user_id: i64) -> Result<Option<String>, DirectoryError> {
        let url = format!(
            "{}/accountNumber/{}",
            self.base_url.trim_end_matches('/'),
            user_id
        );
        tracing::info!(user_id, "fetching account number from directory");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DirectoryError::InvalidResponse(format!(
                "directory returned status {} for user {}",
                response.status(),
                user_id
            )));
        }

        let descriptor = response.json::<AccountDescriptor>().await?;

        // An empty string counts as "no number assigned".
        Ok(descriptor.account_number.filter(|number| !number.is_empty()))
    }
}
