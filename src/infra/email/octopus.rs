use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info};

use crate::domain::ports::{MailingListService, SubscribeOutcome};
use crate::error::AppError;

const MEMBER_EXISTS_CODE: &str = "MEMBER_EXISTS_WITH_EMAIL_ADDRESS";

/// EmailOctopus-backed mailing list. Duplicate signups are reported as
/// success rather than an error.
pub struct OctopusMailingList {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    list_id: Option<String>,
}

impl OctopusMailingList {
    pub fn new(api_base: String, api_key: Option<String>, list_id: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base,
            api_key,
            list_id,
        }
    }
}

#[async_trait]
impl MailingListService for OctopusMailingList {
    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError> {
        let (Some(api_key), Some(list_id)) = (&self.api_key, &self.list_id) else {
            error!("Mailing list credentials are not configured");
            return Err(AppError::Configuration);
        };

        let url = format!("{}/lists/{}/contacts", self.api_base, list_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&json!({
                "email_address": email,
                "tags": ["vip"],
                "status": "subscribed",
            }))
            .send()
            .await
            .map_err(|e| {
                error!("Mailing list connection error: {e}");
                AppError::InternalWithMsg(format!("Mailing list connection error: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or_default();

            let code = body
                .pointer("/error/code")
                .and_then(Value::as_str)
                .unwrap_or_default();

            if code == MEMBER_EXISTS_CODE {
                info!("Subscriber already on the list");
                return Ok(SubscribeOutcome { already_subscribed: true });
            }

            error!("Mailing list API error: status {status}, body {body}");
            return Err(AppError::InternalWithMsg(format!(
                "Mailing list API failed with status {status}"
            )));
        }

        info!("Subscriber added to mailing list");
        Ok(SubscribeOutcome { already_subscribed: false })
    }
}
