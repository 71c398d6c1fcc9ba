use async_trait::async_trait;

use crate::error::AppError;

pub struct SubscribeOutcome {
    pub already_subscribed: bool,
}

/// Third-party mailing-list provider behind the /api/subscribe endpoint.
#[async_trait]
pub trait MailingListService: Send + Sync {
    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError>;
}
