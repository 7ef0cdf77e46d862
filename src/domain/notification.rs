//! Owner notification for new Mini App orders.

use serde_json::Value;

use super::order::Order;
use super::storefront::{non_empty, Bot, NOT_SPECIFIED};

/// Chat id and bot token a notification is delivered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub token: String,
    pub chat_id: String,
}

/// Resolve where an order notification goes: the bot needs a token, and the
/// chat is the owner's Telegram id, else the admin fallback. `None` means
/// nothing is sent.
pub fn resolve_destination(bot: &Bot, admin_chat_id: Option<&str>) -> Option<Destination> {
    let token = bot.token()?;
    let chat_id = bot
        .owner
        .as_ref()
        .and_then(|o| non_empty(o.telegram_id.as_deref()))
        .or(non_empty(admin_chat_id))?;

    Some(Destination {
        token: token.to_string(),
        chat_id: chat_id.to_string(),
    })
}

pub fn format_order(order: &Order) -> String {
    let items = order
        .items
        .lines()
        .map(format_item)
        .collect::<Vec<_>>()
        .join("\n");

    let address = non_empty(order.customer_address.as_deref()).unwrap_or(NOT_SPECIFIED);
    let note = non_empty(order.note.as_deref()).unwrap_or("-");

    format!(
        "🛒 Yangi buyurtma #{id}\n\
         \n\
         👤 Mijoz: {name}\n\
         📞 Telefon: {phone}\n\
         📍 Manzil: {address}\n\
         \n\
         📦 Buyurtma:\n\
         {items}\n\
         \n\
         💰 Jami: {total} so'm\n\
         \n\
         📝 Izoh: {note}\n",
        id = order.id,
        name = order.customer_name,
        phone = order.customer_phone,
        address = address,
        items = items,
        total = format_amount(order.total_amount),
        note = note,
    )
}

/// One stored cart line. Fields are read leniently since the items are kept
/// as the client sent them: a missing field prints empty and a price that is
/// not a number prints as sent.
fn format_item(item: &Value) -> String {
    let price = &item["price"];
    let price = match amount_of(price) {
        Some(amount) => format_amount(amount),
        None => text_of(price),
    };
    format!(
        "• {} x{} - {} so'm",
        text_of(&item["name"]),
        text_of(&item["quantity"]),
        price
    )
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn amount_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Format a money amount with `,` thousands separators. Whole amounts have
/// no decimal part; others keep two decimals.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let abs = amount.abs();
    // From 1e15 up an f64 has no cents left to round.
    let rounded = if abs < 1e15 {
        (abs * 100.0).round() / 100.0
    } else {
        abs.trunc()
    };
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * 100.0).round() as u8;

    let digits = format!("{:.0}", whole);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if amount < 0.0 && rounded > 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if cents > 0 {
        grouped.push_str(&format!(".{:02}", cents));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::order::{OrderItems, OrderStatus};
    use crate::domain::storefront::Owner;

    fn order() -> Order {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Order {
            id: 42,
            bot_id: 3,
            customer_name: "Dilshod".to_string(),
            customer_phone: "+998901234567".to_string(),
            customer_address: Some("Toshkent, Chilonzor 5".to_string()),
            note: Some("Tezroq".to_string()),
            items: OrderItems::new(json!([
                {"id": 1, "name": "Osh", "price": 35000, "quantity": 2},
                {"name": "Choy", "price": 5000, "quantity": 1}
            ]))
            .unwrap(),
            total_amount: 75000.0,
            telegram_user_id: None,
            status: OrderStatus::Pending,
            created_at: at,
            updated_at: at,
        }
    }

    fn bot(token: Option<&str>, owner_chat: Option<&str>) -> Bot {
        Bot {
            id: 3,
            name: "Oshxona".to_string(),
            description: None,
            telegram_token: token.map(str::to_string),
            business_type: None,
            business_description: None,
            business_logo: None,
            working_hours: None,
            owner: Some(Owner {
                id: 1,
                username: "owner".to_string(),
                phone: None,
                telegram_id: owner_chat.map(str::to_string),
            }),
        }
    }

    #[test]
    fn formats_full_message() {
        let expected = "🛒 Yangi buyurtma #42\n\
                        \n\
                        👤 Mijoz: Dilshod\n\
                        📞 Telefon: +998901234567\n\
                        📍 Manzil: Toshkent, Chilonzor 5\n\
                        \n\
                        📦 Buyurtma:\n\
                        • Osh x2 - 35,000 so'm\n\
                        • Choy x1 - 5,000 so'm\n\
                        \n\
                        💰 Jami: 75,000 so'm\n\
                        \n\
                        📝 Izoh: Tezroq\n";
        assert_eq!(format_order(&order()), expected);
    }

    #[test]
    fn empty_address_and_note_use_placeholders() {
        let mut order = order();
        order.customer_address = Some(String::new());
        order.note = None;

        let text = format_order(&order);
        assert!(text.contains("📍 Manzil: Ko'rsatilmagan\n"));
        assert!(text.contains("📝 Izoh: -\n"));
    }

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(1500.5), "1,500.50");
        assert_eq!(format_amount(-2500.0), "-2,500");
        assert_eq!(format_amount(0.29), "0.29");
        assert_eq!(format_amount(0.999), "1");
    }

    #[test]
    fn huge_amounts_are_not_truncated() {
        assert_eq!(format_amount(1e20), "100,000,000,000,000,000,000");
        assert_eq!(format_amount(f64::INFINITY), "inf");
    }

    #[test]
    fn loosely_shaped_items_still_format() {
        let mut order = order();
        order.items = OrderItems::new(json!([
            {"name": "Somsa", "price": "7000", "quantity": "3", "image": "/img/somsa.jpg"},
            {"name": "Kompot", "price": "kelishiladi", "quantity": 1},
            {"price": 1500.5}
        ]))
        .unwrap();

        let text = format_order(&order);
        assert!(text.contains("• Somsa x3 - 7,000 so'm\n"));
        assert!(text.contains("• Kompot x1 - kelishiladi so'm\n"));
        assert!(text.contains("•  x - 1,500.50 so'm\n"));
    }

    #[test]
    fn destination_prefers_owner_chat() {
        let dest = resolve_destination(&bot(Some("123:abc"), Some("555")), Some("999")).unwrap();
        assert_eq!(dest.chat_id, "555");
        assert_eq!(dest.token, "123:abc");
    }

    #[test]
    fn destination_falls_back_to_admin_chat() {
        let dest = resolve_destination(&bot(Some("123:abc"), None), Some("999")).unwrap();
        assert_eq!(dest.chat_id, "999");

        let dest = resolve_destination(&bot(Some("123:abc"), Some("")), Some("999")).unwrap();
        assert_eq!(dest.chat_id, "999");
    }

    #[test]
    fn destination_skipped_without_token_or_chat() {
        assert!(resolve_destination(&bot(None, Some("555")), Some("999")).is_none());
        assert!(resolve_destination(&bot(Some(""), Some("555")), None).is_none());
        assert!(resolve_destination(&bot(Some("123:abc"), None), None).is_none());
        assert!(resolve_destination(&bot(Some("123:abc"), None), Some("")).is_none());
    }
}
