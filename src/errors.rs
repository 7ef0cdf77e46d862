use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

pub const NOT_FOUND_MESSAGE: &str = "Bot topilmadi";
pub const SERVER_ERROR_MESSAGE: &str = "Server xatosi";
pub const ORDER_FAILED_MESSAGE: &str = "Buyurtma yaratishda xatolik";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    /// Client-facing validation message, returned verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Order creation failed: {0}")]
    OrderCreation(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": NOT_FOUND_MESSAGE
            })),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::Internal(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": SERVER_ERROR_MESSAGE
                }))
            }
            AppError::OrderCreation(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": ORDER_FAILED_MESSAGE
                }))
            }
        }
    }
}
