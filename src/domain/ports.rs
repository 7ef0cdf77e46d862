use async_trait::async_trait;

use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::storefront::{Bot, KnowledgeEntry};

pub trait StorefrontRepository: Send + Sync + 'static {
    fn find_bot(&self, id: i32) -> Result<Option<Bot>, DomainError>;
    /// Knowledge-base entries of `content_type` for a bot, oldest first.
    fn find_entries(&self, bot_id: i32, content_type: &str) -> Result<Vec<KnowledgeEntry>, DomainError>;
    fn create_order(&self, order: NewOrder) -> Result<Order, DomainError>;
}

/// Outbound chat message delivery.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send_message(&self, token: &str, chat_id: &str, text: &str) -> Result<(), DomainError>;
}
