//! Product Entity
//!
//! A showcased product. Every product belongs to exactly one category and
//! carries bilingual name and description plus optional media URLs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::entity::{
    field_ms, field_order, field_str, field_str_or_empty, CollectionEntity, DomainError,
    DomainResult,
};
use super::locale::LocalizedText;

/// A showcased product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier (empty until first insert)
    pub id: String,
    /// Bilingual product name
    pub name: LocalizedText,
    /// Bilingual long description (may be empty)
    pub description: LocalizedText,
    /// Id of the owning category
    pub category_id: String,
    /// Main product photo
    pub image_url: Option<String>,
    /// Optional promotional clip
    pub video_url: Option<String>,
    /// Display rank within the product list
    pub order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Product {
    /// Create an unsaved draft under the given category.
    pub fn new(name: LocalizedText, category_id: String) -> Self {
        Self {
            id: String::new(),
            name,
            description: LocalizedText::default(),
            category_id,
            image_url: None,
            video_url: None,
            order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl CollectionEntity for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "product";

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
            description: LocalizedText::normalize(
                fields.get("description"),
                &LocalizedText::default(),
            ),
            category_id: field_str_or_empty(fields, "category_id"),
            image_url: field_str(fields, "image_url"),
            video_url: field_str(fields, "video_url"),
            order: field_order(fields),
            created_at: field_ms(fields, "created_at"),
            updated_at: field_ms(fields, "updated_at"),
        }
    }

    fn to_fields(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "category_id": self.category_id,
            "image_url": self.image_url,
            "video_url": self.video_url,
            "order": self.order,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::Validation(
                "product name must be set in at least one language".to_string(),
            ));
        }
        if self.category_id.is_empty() {
            return Err(DomainError::Validation(
                "product must belong to a category".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new(LocalizedText::same("소파"), "cat-1".to_string());
        assert!(product.id.is_empty());
        assert_eq!(product.category_id, "cat-1");
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_hydrates_mixed_legacy_shapes() {
        // Name as bare string, description as partial object: both normalize.
        let fields = json!({
            "name": "책상",
            "description": {"en": "Oak desk"},
            "category_id": "cat-7",
            "order": 2,
        });
        let product = Product::from_document("p-1", &fields);
        assert_eq!(product.name, LocalizedText::same("책상"));
        assert_eq!(product.description, LocalizedText::new("", "Oak desk"));
        assert_eq!(product.category_id, "cat-7");
    }

    #[test]
    fn test_hydrates_corrupt_document() {
        let fields = json!({"name": 42, "order": -3, "category_id": null});
        let product = Product::from_document("p-2", &fields);
        assert!(product.name.is_empty());
        assert_eq!(product.order, 0);
        assert!(product.category_id.is_empty());
    }

    #[test]
    fn test_validate_requires_category() {
        let product = Product::new(LocalizedText::same("소파"), String::new());
        assert!(matches!(
            product.validate(),
            Err(DomainError::Validation(_))
        ));
    }
}
