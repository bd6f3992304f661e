//! SNS Link Entity
//!
//! A social-media profile link shown in the site header and footer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::entity::{
    field_ms, field_order, field_str, field_str_or_empty, CollectionEntity, DomainError,
    DomainResult,
};

/// An ordered social-media profile link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnsLink {
    pub id: String,
    /// Platform slug, e.g. "instagram" or "youtube"
    pub platform: String,
    /// Profile URL
    pub href: String,
    /// Optional custom icon; the site falls back to a platform default
    pub icon_url: Option<String>,
    pub order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl SnsLink {
    pub fn new(platform: String, href: String) -> Self {
        Self {
            id: String::new(),
            platform,
            href,
            icon_url: None,
            order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl CollectionEntity for SnsLink {
    const COLLECTION: &'static str = "sns_links";
    const LABEL: &'static str = "SNS link";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn stamp_created(&mut self, at_ms: i64) {
        self.created_at = Some(at_ms);
    }

    fn stamp_updated(&mut self, at_ms: i64) {
        self.updated_at = Some(at_ms);
    }

    fn from_document(id: &str, fields: &Value) -> Self {
        Self {
            id: id.to_string(),
            platform: field_str_or_empty(fields, "platform"),
            href: field_str_or_empty(fields, "href"),
            icon_url: field_str(fields, "icon_url"),
            order: field_order(fields),
            created_at: field_ms(fields, "created_at"),
            updated_at: field_ms(fields, "updated_at"),
        }
    }

    fn to_fields(&self) -> Value {
        json!({
            "platform": self.platform,
            "href": self.href,
            "icon_url": self.icon_url,
            "order": self.order,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if self.platform.is_empty() {
            return Err(DomainError::Validation(
                "SNS platform must not be empty".to_string(),
            ));
        }
        if self.href.is_empty() {
            return Err(DomainError::Validation(
                "SNS profile URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sns_link_creation() {
        let link = SnsLink::new("instagram".to_string(), "https://instagram.com/acme".to_string());
        assert!(link.validate().is_ok());
        assert!(link.icon_url.is_none());
    }

    #[test]
    fn test_validate_requires_platform_and_href() {
        assert!(SnsLink::new(String::new(), "https://x.com/acme".to_string())
            .validate()
            .is_err());
        assert!(SnsLink::new("x".to_string(), String::new()).validate().is_err());
    }
}
