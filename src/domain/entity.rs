//! Domain Layer - Core Entity Trait
//!
//! This trait defines the contract every managed collection entity fulfils:
//! a store-assigned identifier, an order rank, document (de)hydration and
//! validation. All entities must be thread-safe.

use serde_json::Value;
use thiserror::Error;

/// Core trait for all ordered collection entities.
///
/// Identifiers are strings minted by the document store on insert; they are
/// never reassigned. `order` is the zero-based display rank within the
/// entity's collection.
pub trait CollectionEntity: Sized + Send + Sync + Clone + 'static {
    /// Name of the remote collection this entity type lives in.
    const COLLECTION: &'static str;

    /// Human label used in notifications ("category", "product", ...).
    const LABEL: &'static str;

    /// The entity's unique identifier. Empty until the store assigns one.
    fn id(&self) -> &str;

    /// Record the store-assigned identifier after a successful insert.
    fn set_id(&mut self, id: String);

    /// Display rank within the collection.
    fn order(&self) -> u32;

    fn set_order(&mut self, order: u32);

    /// Record the creation timestamp (epoch milliseconds).
    fn stamp_created(&mut self, at_ms: i64);

    /// Bump the modification timestamp (epoch milliseconds).
    fn stamp_updated(&mut self, at_ms: i64);

    /// Hydrate from a stored document, normalizing every localized attribute
    /// and defaulting missing or malformed scalars. Never fails: a corrupt
    /// document hydrates to a default-shaped entity.
    fn from_document(id: &str, fields: &Value) -> Self;

    /// Full field set for persistence. Overwrite semantics: the returned map
    /// is the complete document body, not a patch.
    fn to_fields(&self) -> Value;

    /// Check required fields before any persistence is attempted.
    fn validate(&self) -> DomainResult<()>;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A read or subscription against the remote store failed. Local state
    /// is untouched; retrying is the caller's decision.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),
    /// A write, update or delete against the remote store failed.
    #[error("could not persist changes: {0}")]
    Persistence(String),
    /// A required field is empty. Raised before any remote call.
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// Field readers used by entity hydration. Missing or mistyped values fall
// back to defaults so that legacy documents always hydrate.

pub(crate) fn field_str(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

pub(crate) fn field_str_or_empty(fields: &Value, key: &str) -> String {
    field_str(fields, key).unwrap_or_default()
}

pub(crate) fn field_order(fields: &Value) -> u32 {
    fields
        .get("order")
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(0)
}

pub(crate) fn field_ms(fields: &Value, key: &str) -> Option<i64> {
    fields.get(key).and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_defaults_for_missing_keys() {
        let fields = json!({});
        assert_eq!(field_order(&fields), 0);
        assert_eq!(field_str(&fields, "image_url"), None);
        assert_eq!(field_str_or_empty(&fields, "href"), "");
        assert_eq!(field_ms(&fields, "created_at"), None);
    }

    #[test]
    fn test_field_defaults_for_mistyped_values() {
        let fields = json!({"order": "three", "href": 7, "created_at": true});
        assert_eq!(field_order(&fields), 0);
        assert_eq!(field_str_or_empty(&fields, "href"), "");
        assert_eq!(field_ms(&fields, "created_at"), None);
    }

    #[test]
    fn test_field_order_ignores_negative() {
        let fields = json!({"order": -4});
        assert_eq!(field_order(&fields), 0);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "invalid input: name is required");
    }
}
