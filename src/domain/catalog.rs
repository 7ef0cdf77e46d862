//! Turns free-form knowledge-base text into catalog products.
//!
//! A product entry is a block of lines, each optionally starting with one of
//! the field markers below:
//!
//! ```text
//! Mahsulot: Olma sharbati
//! Narx: 12,000 so'm
//! Tavsif: 1 litr, tabiiy
//! Rasm: https://cdn.example.uz/olma.jpg
//! ```
//!
//! Lines are independent of each other, so a repeated marker simply
//! overwrites the earlier value.

pub const NAME_MARKER: &str = "Mahsulot:";
pub const PRICE_MARKER: &str = "Narx:";
pub const DESCRIPTION_MARKER: &str = "Tavsif:";
pub const IMAGE_MARKER: &str = "Rasm:";

pub const DEFAULT_PRODUCT_NAME: &str = "Mahsulot";
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

/// Parse a product entry. `fallback_name` (usually the entry's source name)
/// is used when the text has no name line.
///
/// Returns `None` when the entry cannot be read, e.g. a price too large to
/// represent; callers skip such entries.
pub fn parse_product(content: &str, id: i32, fallback_name: Option<&str>) -> Option<ProductRecord> {
    let mut name: Option<String> = None;
    let mut price = 0u64;
    let mut description = String::new();
    let mut image: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with(NAME_MARKER) {
            name = Some(field_value(line, NAME_MARKER));
        } else if line.starts_with(PRICE_MARKER) {
            let raw = field_value(line, PRICE_MARKER);
            match parse_price(&raw) {
                Ok(Some(value)) => price = value,
                Ok(None) => {}
                Err(e) => {
                    log::error!("Error parsing product {}: bad price '{}': {}", id, raw, e);
                    return None;
                }
            }
        } else if line.starts_with(DESCRIPTION_MARKER) {
            description = field_value(line, DESCRIPTION_MARKER);
        } else if line.starts_with(IMAGE_MARKER) {
            image = Some(field_value(line, IMAGE_MARKER));
        }
    }

    // An explicit empty name line still counts as a name; an empty image
    // does not.
    let name = name.unwrap_or_else(|| {
        fallback_name
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PRODUCT_NAME)
            .to_string()
    });

    Some(ProductRecord {
        id,
        name,
        price,
        description,
        image: image
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
    })
}

/// Value of a marker line: every occurrence of the marker is removed, not
/// just the leading one, so `Mahsulot: Mahsulot: Non` reads as `Non`.
fn field_value(line: &str, marker: &str) -> String {
    line.replace(marker, "").trim().to_string()
}

/// Keeps only the ASCII digits of `raw` ("12,000 so'm" -> 12000); digits
/// from other scripts are dropped. `Ok(None)` when there are no digits at
/// all.
fn parse_price(raw: &str) -> Result<Option<u64>, std::num::ParseIntError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(None);
    }
    digits.parse().map(Some)
}
