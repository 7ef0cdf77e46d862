use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::storefront_service::StorefrontService;
use crate::domain::catalog::ProductRecord;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderItem, OrderItems};
use crate::domain::storefront::{BusinessInfo, ContactInfo};
use crate::errors::AppError;

pub const NO_DATA_MESSAGE: &str = "Ma'lumotlar topilmadi";
pub const ORDER_ACCEPTED_MESSAGE: &str = "Buyurtma qabul qilindi";

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct BusinessResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub business_type: String,
    pub owner_name: String,
}

impl From<BusinessInfo> for BusinessResponse {
    fn from(b: BusinessInfo) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            logo: b.logo,
            business_type: b.business_type,
            owner_name: b.owner_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    /// Price in so'm.
    pub price: u64,
    pub description: String,
    pub image: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(p: ProductRecord) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            description: p.description,
            image: p.image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub phone: String,
    pub address: String,
    pub working_hours: String,
    pub telegram: String,
}

impl From<ContactInfo> for ContactResponse {
    fn from(c: ContactInfo) -> Self {
        Self {
            phone: c.phone,
            address: c.address,
            working_hours: c.working_hours,
            telegram: c.telegram,
        }
    }
}

/// Telegram user ids arrive as numbers from the WebApp SDK but are stored as
/// text.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TelegramUserId {
    Number(i64),
    Text(String),
}

impl TelegramUserId {
    fn into_text(self) -> Option<String> {
        match self {
            TelegramUserId::Number(n) => Some(n.to_string()),
            TelegramUserId::Text(s) if s.is_empty() => None,
            TelegramUserId::Text(s) => Some(s),
        }
    }
}

/// Bot id as posted by the Mini App, which reads it from the launch URL and
/// sends it as a string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum BotId {
    Number(i64),
    Text(String),
}

impl BotId {
    /// The id, unless it is zero or not a number.
    fn to_id(&self) -> Option<i32> {
        let id = match self {
            BotId::Number(n) => i32::try_from(*n).ok(),
            BotId::Text(s) => s.trim().parse().ok(),
        };
        id.filter(|id| *id != 0)
    }
}

/// Order submitted by the Mini App. Every field is optional on the wire so
/// that a missing required field gets a per-field message instead of a
/// generic parse error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub bot_id: Option<BotId>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub note: Option<String>,
    /// Cart lines, stored exactly as sent.
    #[schema(value_type = Option<Vec<OrderItem>>)]
    pub items: Option<Value>,
    /// Cart total in so'm. Defaults to 0.
    pub total: Option<f64>,
    pub telegram_user_id: Option<TelegramUserId>,
}

fn required(field: &str) -> DomainError {
    DomainError::InvalidInput(format!("{} majburiy", field))
}

impl CreateOrderRequest {
    /// Check required fields in a fixed order (`bot_id`, `customer_name`,
    /// `customer_phone`, `items`). Zero or non-numeric ids, empty strings and
    /// anything but a non-empty item array count as missing.
    pub fn into_new_order(self) -> Result<NewOrder, DomainError> {
        let bot_id = self
            .bot_id
            .as_ref()
            .and_then(BotId::to_id)
            .ok_or_else(|| required("bot_id"))?;
        let customer_name = self
            .customer_name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| required("customer_name"))?;
        let customer_phone = self
            .customer_phone
            .filter(|s| !s.is_empty())
            .ok_or_else(|| required("customer_phone"))?;
        let items = self
            .items
            .and_then(OrderItems::new)
            .ok_or_else(|| required("items"))?;

        Ok(NewOrder {
            bot_id,
            customer_name,
            customer_phone,
            customer_address: self.customer_address,
            note: self.note,
            items,
            total_amount: self.total.unwrap_or_default(),
            telegram_user_id: self.telegram_user_id.and_then(TelegramUserId::into_text),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: i32,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/miniapp/business/{bot_id}
#[utoipa::path(
    get,
    path = "/api/miniapp/business/{bot_id}",
    params(
        ("bot_id" = i32, Path, description = "Bot id"),
    ),
    responses(
        (status = 200, description = "Business profile", body = BusinessResponse),
        (status = 404, description = "Bot not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "miniapp"
)]
pub async fn get_business(
    service: web::Data<StorefrontService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let bot_id = path.into_inner();
    let svc = service.clone();

    let info = web::block(move || svc.business_info(bot_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(BusinessResponse::from(info)))
}

/// GET /api/miniapp/catalog/{bot_id}
///
/// Products parsed from the bot's knowledge base. Never fails: any internal
/// error yields an empty list.
#[utoipa::path(
    get,
    path = "/api/miniapp/catalog/{bot_id}",
    params(
        ("bot_id" = i32, Path, description = "Bot id"),
    ),
    responses(
        (status = 200, description = "Catalog products", body = [ProductResponse]),
    ),
    tag = "miniapp"
)]
pub async fn get_catalog(service: web::Data<StorefrontService>, path: web::Path<i32>) -> HttpResponse {
    let bot_id = path.into_inner();
    let svc = service.clone();

    let products = match web::block(move || svc.catalog(bot_id)).await {
        Ok(Ok(products)) => products,
        Ok(Err(e)) => {
            log::error!("Error getting catalog for bot {}: {}", bot_id, e);
            Vec::new()
        }
        Err(e) => {
            log::error!("Error getting catalog for bot {}: {}", bot_id, e);
            Vec::new()
        }
    };

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    HttpResponse::Ok().json(body)
}

/// GET /api/miniapp/contact/{bot_id}
///
/// Unknown bots are a 404; any other failure answers with the support
/// defaults.
#[utoipa::path(
    get,
    path = "/api/miniapp/contact/{bot_id}",
    params(
        ("bot_id" = i32, Path, description = "Bot id"),
    ),
    responses(
        (status = 200, description = "Contact details", body = ContactResponse),
        (status = 404, description = "Bot not found", body = ErrorResponse),
    ),
    tag = "miniapp"
)]
pub async fn get_contact(
    service: web::Data<StorefrontService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let bot_id = path.into_inner();
    let svc = service.clone();

    let result = web::block(move || svc.contact_info(bot_id))
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(contact) => Ok(HttpResponse::Ok().json(ContactResponse::from(contact))),
        Err(DomainError::NotFound) => Err(AppError::NotFound),
        Err(e) => {
            log::error!("Error getting contact info for bot {}: {}", bot_id, e);
            Ok(HttpResponse::Ok().json(ContactResponse::from(service.default_contact())))
        }
    }
}

/// POST /api/miniapp/order
///
/// Stores the order as `pending`, then notifies the bot owner on Telegram.
/// Notification problems are logged and never fail the request.
#[utoipa::path(
    post,
    path = "/api/miniapp/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order accepted", body = CreateOrderResponse),
        (status = 400, description = "Missing body or required field", body = ErrorResponse),
        (status = 500, description = "Order could not be stored", body = ErrorResponse),
    ),
    tag = "miniapp"
)]
pub async fn create_order(
    service: web::Data<StorefrontService>,
    body: Option<web::Json<CreateOrderRequest>>,
) -> Result<HttpResponse, AppError> {
    let Some(body) = body else {
        return Err(AppError::Validation(NO_DATA_MESSAGE.to_string()));
    };
    let new_order = body.into_inner().into_new_order()?;

    let svc = service.clone();
    let placed = web::block(move || svc.place_order(new_order))
        .await
        .map_err(|e| AppError::OrderCreation(e.to_string()))?
        .map_err(|e| match e {
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::OrderCreation(other.to_string()),
        })?;

    if let Some(notification) = &placed.notification {
        service.deliver(notification).await;
    }

    log::info!(
        "New order created: #{} for bot {}",
        placed.order.id,
        placed.order.bot_id
    );

    Ok(HttpResponse::Ok().json(CreateOrderResponse {
        success: true,
        order_id: placed.order.id,
        message: ORDER_ACCEPTED_MESSAGE.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateOrderRequest {
        serde_json::from_value(json).unwrap()
    }

    fn complete() -> serde_json::Value {
        serde_json::json!({
            "bot_id": 3,
            "customer_name": "Kamola",
            "customer_phone": "+998901112233",
            "items": [{"id": 1, "name": "Somsa", "price": 7000, "quantity": 4}],
        })
    }

    fn rejection(json: serde_json::Value) -> String {
        match request(json).into_new_order() {
            Err(DomainError::InvalidInput(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn complete_request_converts() {
        let order = request(complete()).into_new_order().unwrap();
        assert_eq!(order.bot_id, 3);
        assert_eq!(order.items.lines().count(), 1);
        assert_eq!(order.total_amount, 0.0);
        assert!(order.telegram_user_id.is_none());
    }

    #[test]
    fn required_fields_are_checked_in_order() {
        assert_eq!(rejection(serde_json::json!({})), "bot_id majburiy");

        let mut json = complete();
        json["bot_id"] = serde_json::json!(0);
        assert_eq!(rejection(json), "bot_id majburiy");

        for bad in [serde_json::json!(""), serde_json::json!("abc"), serde_json::json!("0")] {
            let mut json = complete();
            json["bot_id"] = bad;
            assert_eq!(rejection(json), "bot_id majburiy");
        }

        let mut json = complete();
        json["customer_name"] = serde_json::json!("");
        json["items"] = serde_json::json!([]);
        assert_eq!(rejection(json), "customer_name majburiy");

        let mut json = complete();
        json["customer_phone"] = serde_json::Value::Null;
        assert_eq!(rejection(json), "customer_phone majburiy");

        let mut json = complete();
        json["items"] = serde_json::json!([]);
        assert_eq!(rejection(json), "items majburiy");

        let mut json = complete();
        json["items"] = serde_json::json!({"name": "Somsa"});
        assert_eq!(rejection(json), "items majburiy");
    }

    #[test]
    fn bot_id_accepts_numeric_string() {
        let mut json = complete();
        json["bot_id"] = serde_json::json!("3");
        assert_eq!(request(json).into_new_order().unwrap().bot_id, 3);
    }

    #[test]
    fn items_are_kept_as_sent() {
        let mut json = complete();
        json["items"] = serde_json::json!([
            {"name": "Somsa", "price": 7000, "quantity": "4", "image": "/img/somsa.jpg"}
        ]);
        let order = request(json).into_new_order().unwrap();
        assert_eq!(
            order.items.to_text(),
            r#"[{"name":"Somsa","price":7000,"quantity":"4","image":"/img/somsa.jpg"}]"#
        );
    }

    #[test]
    fn telegram_user_id_accepts_number_or_text() {
        let mut json = complete();
        json["telegram_user_id"] = serde_json::json!(123456789);
        let order = request(json).into_new_order().unwrap();
        assert_eq!(order.telegram_user_id.as_deref(), Some("123456789"));

        let mut json = complete();
        json["telegram_user_id"] = serde_json::json!("987");
        let order = request(json).into_new_order().unwrap();
        assert_eq!(order.telegram_user_id.as_deref(), Some("987"));
    }
}
