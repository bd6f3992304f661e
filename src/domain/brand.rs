//! Brand Page Entity
//!
//! A section of the brand story page: a bilingual title and body with
//! optional hero media. Sections are ordered top to bottom.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::entity::{field_ms, field_order, field_str, CollectionEntity, DomainError, DomainResult};
use super::locale::LocalizedText;

/// One ordered section of the brand story page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPage {
    pub id: String,
    /// Bilingual section title
    pub title: LocalizedText,
    /// Bilingual section body (may be empty)
    pub body: LocalizedText,
    pub hero_image_url: Option<String>,
    pub video_url: Option<String>,
    pub order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl BrandPage {
    pub fn new(title: LocalizedText) -> Self {
        Self {
            id: String::new(),
            title,
            body: LocalizedText::default(),
            hero_image_url: None,
            video_url: None,
            order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl CollectionEntity for BrandPage {
    const COLLECTION: &'static str = "brand_pages";
    const LABEL: &'static str = "brand section";

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
            title: LocalizedText::normalize(fields.get("title"), &LocalizedText::default()),
            body: LocalizedText::normalize(fields.get("body"), &LocalizedText::default()),
            hero_image_url: field_str(fields, "hero_image_url"),
            video_url: field_str(fields, "video_url"),
            order: field_order(fields),
            created_at: field_ms(fields, "created_at"),
            updated_at: field_ms(fields, "updated_at"),
        }
    }

    fn to_fields(&self) -> Value {
        json!({
            "title": self.title,
            "body": self.body,
            "hero_image_url": self.hero_image_url,
            "video_url": self.video_url,
            "order": self.order,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if self.title.is_empty() {
            return Err(DomainError::Validation(
                "brand section title must be set in at least one language".to_string(),
            ));
        }
        Ok(())
    }
}
