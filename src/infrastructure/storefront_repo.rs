use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderItems, OrderStatus};
use crate::domain::ports::StorefrontRepository;
use crate::domain::storefront::{Bot, KnowledgeEntry, Owner};
use crate::schema::{bot, knowledge_base, mini_app_order, users};

use super::models::{BotRow, KnowledgeEntryRow, NewOrderRow, OrderRow, UserRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

fn to_bot(row: BotRow, owner: Option<UserRow>) -> Bot {
    Bot {
        id: row.id,
        name: row.name,
        description: row.description,
        telegram_token: row.telegram_token,
        business_type: row.business_type,
        business_description: row.business_description,
        business_logo: row.business_logo,
        working_hours: row.working_hours,
        owner: owner.map(|u| Owner {
            id: u.id,
            username: u.username,
            phone: u.phone,
            telegram_id: u.telegram_id,
        }),
    }
}

fn to_order(row: OrderRow) -> Result<Order, DomainError> {
    let status = match row.status.as_deref() {
        Some(s) => s.parse()?,
        None => OrderStatus::Pending,
    };

    Ok(Order {
        id: row.id,
        bot_id: row.bot_id,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        customer_address: row.customer_address,
        note: row.note,
        items: OrderItems::from_text(&row.items)?,
        total_amount: row.total_amount.unwrap_or_default(),
        telegram_user_id: row.telegram_user_id,
        status,
        created_at: row.created_at.unwrap_or_default(),
        updated_at: row.updated_at.unwrap_or_default(),
    })
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselStorefrontRepository {
    pool: DbPool,
}

impl DieselStorefrontRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StorefrontRepository for DieselStorefrontRepository {
    fn find_bot(&self, id: i32) -> Result<Option<Bot>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = bot::table
            .left_join(users::table)
            .filter(bot::id.eq(id))
            .select((BotRow::as_select(), Option::<UserRow>::as_select()))
            .first::<(BotRow, Option<UserRow>)>(&mut conn)
            .optional()?;

        Ok(row.map(|(bot, owner)| to_bot(bot, owner)))
    }

    fn find_entries(&self, bot_id: i32, content_type: &str) -> Result<Vec<KnowledgeEntry>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = knowledge_base::table
            .filter(knowledge_base::bot_id.eq(bot_id))
            .filter(knowledge_base::content_type.eq(content_type))
            .order(knowledge_base::id.asc())
            .select(KnowledgeEntryRow::as_select())
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|r| KnowledgeEntry {
                id: r.id,
                bot_id: r.bot_id,
                content: r.content,
                content_type: r.content_type,
                source_name: r.source_name,
            })
            .collect())
    }

    fn create_order(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        let row = diesel::insert_into(mini_app_order::table)
            .values(&NewOrderRow {
                bot_id: order.bot_id,
                customer_name: order.customer_name,
                customer_phone: order.customer_phone,
                customer_address: order.customer_address,
                note: order.note,
                items: order.items.to_text(),
                total_amount: Some(order.total_amount),
                telegram_user_id: order.telegram_user_id,
                status: Some(OrderStatus::Pending.as_str().to_string()),
                created_at: Some(now),
                updated_at: Some(now),
            })
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        to_order(row)
    }
}
