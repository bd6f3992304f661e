//! Footer Link Entity
//!
//! A navigation link rendered in the site footer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::entity::{
    field_ms, field_order, field_str_or_empty, CollectionEntity, DomainError, DomainResult,
};
use super::locale::LocalizedText;

/// An ordered footer navigation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    /// Bilingual link label
    pub label: LocalizedText,
    /// Link target (absolute or site-relative)
    pub href: String,
    pub order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl FooterLink {
    pub fn new(label: LocalizedText, href: String) -> Self {
        Self {
            id: String::new(),
            label,
            href,
            order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl CollectionEntity for FooterLink {
    const COLLECTION: &'static str = "footer_links";
    const LABEL: &'static str = "footer link";

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
            label: LocalizedText::normalize(fields.get("label"), &LocalizedText::default()),
            href: field_str_or_empty(fields, "href"),
            order: field_order(fields),
            created_at: field_ms(fields, "created_at"),
            updated_at: field_ms(fields, "updated_at"),
        }
    }

    fn to_fields(&self) -> Value {
        json!({
            "label": self.label,
            "href": self.href,
            "order": self.order,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if self.label.is_empty() {
            return Err(DomainError::Validation(
                "footer link label must be set in at least one language".to_string(),
            ));
        }
        if self.href.is_empty() {
            return Err(DomainError::Validation(
                "footer link target must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_label_and_href() {
        let valid = FooterLink::new(LocalizedText::same("회사소개"), "/about".to_string());
        assert!(valid.validate().is_ok());

        let no_href = FooterLink::new(LocalizedText::same("회사소개"), String::new());
        assert!(no_href.validate().is_err());

        let no_label = FooterLink::new(LocalizedText::default(), "/about".to_string());
        assert!(no_label.validate().is_err());
    }

    #[test]
    fn test_hydrates_missing_href_as_empty() {
        let link = FooterLink::from_document("f-1", &json!({"label": "문의"}));
        assert_eq!(link.href, "");
        assert!(link.validate().is_err());
    }
}
