pub const DEFAULT_LOGO: &str = "/static/images/default-logo.png";
pub const DEFAULT_BUSINESS_TYPE: &str = "product";
pub const DEFAULT_WORKING_HOURS: &str = "09:00 - 18:00";
/// Shown wherever an address was not provided.
pub const NOT_SPECIFIED: &str = "Ko'rsatilmagan";

/// Knowledge-base category parsed into catalog products.
pub const PRODUCT_CONTENT_TYPE: &str = "product";

#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: i32,
    pub username: String,
    pub phone: Option<String>,
    pub telegram_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub telegram_token: Option<String>,
    pub business_type: Option<String>,
    pub business_description: Option<String>,
    pub business_logo: Option<String>,
    pub working_hours: Option<String>,
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeEntry {
    pub id: i32,
    pub bot_id: i32,
    pub content: String,
    pub content_type: String,
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessInfo {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub business_type: String,
    pub owner_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInfo {
    pub phone: String,
    pub address: String,
    pub working_hours: String,
    pub telegram: String,
}

/// Support contacts used when a bot carries none of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDefaults {
    pub phone: String,
    pub telegram: String,
}

impl ContactDefaults {
    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            phone: self.phone.clone(),
            address: NOT_SPECIFIED.to_string(),
            working_hours: DEFAULT_WORKING_HOURS.to_string(),
            telegram: self.telegram.clone(),
        }
    }
}

/// Treats empty strings the same as missing values.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Bot {
    pub fn token(&self) -> Option<&str> {
        non_empty(self.telegram_token.as_deref())
    }

    pub fn business_info(&self) -> BusinessInfo {
        let description = non_empty(self.business_description.as_deref())
            .or(non_empty(self.description.as_deref()))
            .unwrap_or_default();

        BusinessInfo {
            id: self.id,
            name: self.name.clone(),
            description: description.to_string(),
            logo: non_empty(self.business_logo.as_deref())
                .unwrap_or(DEFAULT_LOGO)
                .to_string(),
            business_type: non_empty(self.business_type.as_deref())
                .unwrap_or(DEFAULT_BUSINESS_TYPE)
                .to_string(),
            owner_name: self
                .owner
                .as_ref()
                .map(|o| o.username.clone())
                .unwrap_or_default(),
        }
    }

    pub fn contact_info(&self, defaults: &ContactDefaults) -> ContactInfo {
        let mut contact = defaults.contact_info();
        if let Some(phone) = self
            .owner
            .as_ref()
            .and_then(|o| non_empty(o.phone.as_deref()))
        {
            contact.phone = phone.to_string();
        }
        if let Some(hours) = non_empty(self.working_hours.as_deref()) {
            contact.working_hours = hours.to_string();
        }
        contact
    }
}
