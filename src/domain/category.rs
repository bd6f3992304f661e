//! Category Entity
//!
//! A product category, shown as a filter tab on the products page.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::entity::{field_ms, field_order, field_str, CollectionEntity, DomainError, DomainResult};
use super::locale::LocalizedText;

/// A product category with a bilingual display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier (empty until first insert)
    pub id: String,
    /// Bilingual display name
    pub name: LocalizedText,
    /// Optional thumbnail shown next to the name
    pub image_url: Option<String>,
    /// Display rank within the category list
    pub order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Category {
    /// Create an unsaved draft. The store assigns the id on insert.
    pub fn new(name: LocalizedText) -> Self {
        Self {
            id: String::new(),
            name,
            image_url: None,
            order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl CollectionEntity for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "category";

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
            name: LocalizedText::normalize(fields.get("name"), &LocalizedText::default()),
            image_url: field_str(fields, "image_url"),
            order: field_order(fields),
            created_at: field_ms(fields, "created_at"),
            updated_at: field_ms(fields, "updated_at"),
        }
    }

    fn to_fields(&self) -> Value {
        json!({
            "name": self.name,
            "image_url": self.image_url,
            "order": self.order,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::Validation(
                "category name must be set in at least one language".to_string(),
            ));
        }
        Ok(())
    }
}
