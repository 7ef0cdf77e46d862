use std::sync::Arc;

use crate::domain::catalog::{parse_product, ProductRecord};
use crate::domain::errors::DomainError;
use crate::domain::notification::{format_order, resolve_destination, Destination};
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{Notifier, StorefrontRepository};
use crate::domain::storefront::{BusinessInfo, ContactDefaults, ContactInfo, PRODUCT_CONTENT_TYPE};

/// A formatted message ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub destination: Destination,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub notification: Option<Notification>,
}

pub struct StorefrontService {
    repo: Arc<dyn StorefrontRepository>,
    notifier: Arc<dyn Notifier>,
    contact_defaults: ContactDefaults,
    admin_chat_id: Option<String>,
}

impl StorefrontService {
    pub fn new(
        repo: Arc<dyn StorefrontRepository>,
        notifier: Arc<dyn Notifier>,
        contact_defaults: ContactDefaults,
        admin_chat_id: Option<String>,
    ) -> Self {
        Self {
            repo,
            notifier,
            contact_defaults,
            admin_chat_id,
        }
    }

    pub fn business_info(&self, bot_id: i32) -> Result<BusinessInfo, DomainError> {
        let bot = self.repo.find_bot(bot_id)?.ok_or(DomainError::NotFound)?;
        Ok(bot.business_info())
    }

    /// Products parsed from the bot's knowledge base. Entries that fail to
    /// parse are left out.
    pub fn catalog(&self, bot_id: i32) -> Result<Vec<ProductRecord>, DomainError> {
        let entries = self.repo.find_entries(bot_id, PRODUCT_CONTENT_TYPE)?;
        Ok(entries
            .iter()
            .filter_map(|e| parse_product(&e.content, e.id, e.source_name.as_deref()))
            .collect())
    }

    pub fn contact_info(&self, bot_id: i32) -> Result<ContactInfo, DomainError> {
        let bot = self.repo.find_bot(bot_id)?.ok_or(DomainError::NotFound)?;
        Ok(bot.contact_info(&self.contact_defaults))
    }

    pub fn default_contact(&self) -> ContactInfo {
        self.contact_defaults.contact_info()
    }

    /// Persist a new order and prepare the owner notification. Failing to
    /// prepare the notification never fails the order.
    pub fn place_order(&self, order: NewOrder) -> Result<PlacedOrder, DomainError> {
        if order.items.is_empty() {
            return Err(DomainError::InvalidInput("items majburiy".to_string()));
        }

        let order = self.repo.create_order(order)?;
        let notification = match self.notification_for(&order) {
            Ok(notification) => notification,
            Err(e) => {
                log::error!("Failed to prepare notification for order #{}: {}", order.id, e);
                None
            }
        };

        Ok(PlacedOrder {
            order,
            notification,
        })
    }

    fn notification_for(&self, order: &Order) -> Result<Option<Notification>, DomainError> {
        let Some(bot) = self.repo.find_bot(order.bot_id)? else {
            return Ok(None);
        };
        let Some(destination) = resolve_destination(&bot, self.admin_chat_id.as_deref()) else {
            log::debug!("No notification destination for bot {}", bot.id);
            return Ok(None);
        };

        Ok(Some(Notification {
            destination,
            text: format_order(order),
        }))
    }

    /// Send a prepared notification once. Errors are logged and dropped.
    pub async fn deliver(&self, notification: &Notification) {
        let Destination { token, chat_id } = &notification.destination;
        if let Err(e) = self
            .notifier
            .send_message(token, chat_id, &notification.text)
            .await
        {
            log::error!("Failed to notify owner: {}", e);
        }
    }
}
