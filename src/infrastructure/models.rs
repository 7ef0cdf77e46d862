use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::{bot, knowledge_base, mini_app_order, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub phone: Option<String>,
    pub telegram_id: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bot)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BotRow {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub telegram_token: Option<String>,
    pub business_type: Option<String>,
    pub business_description: Option<String>,
    pub business_logo: Option<String>,
    pub working_hours: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = knowledge_base)]
#[diesel(belongs_to(BotRow, foreign_key = bot_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct KnowledgeEntryRow {
    pub id: i32,
    pub bot_id: i32,
    pub content: String,
    pub content_type: String,
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = mini_app_order)]
#[diesel(belongs_to(BotRow, foreign_key = bot_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub bot_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub note: Option<String>,
    pub items: String,
    pub total_amount: Option<f64>,
    pub telegram_user_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = mini_app_order)]
pub struct NewOrderRow {
    pub bot_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub note: Option<String>,
    pub items: String,
    pub total_amount: Option<f64>,
    pub telegram_user_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
