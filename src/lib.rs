//! Showcase Admin Backend
//!
//! Layered architecture:
//! - domain: Core entities, bilingual text, and business rules
//! - repository: Document store access and the ordered collection store
//! - admin: Operation boundary with validation, save tracking, notifications
//!
//! The ports at the edges (`DocumentStore`, `MediaStore`, `NotificationSink`)
//! are what a host application implements; everything in between is the
//! reusable collection engine the five admin surfaces share.

pub mod admin;
pub mod domain;
pub mod media;
pub mod notify;
pub mod repository;

pub use admin::{CollectionAdmin, SaveTracker, SiteAdmin};
pub use domain::{
    BrandPage, Category, CollectionEntity, DomainError, DomainResult, FooterLink, Locale,
    LocalizedText, Product, SnsLink,
};
pub use media::{object_key, timestamped_key, MediaStore, MemoryMediaStore};
pub use notify::{LogNotifier, NoticeKind, NotificationSink};
pub use repository::{
    CollectionStore, Document, DocumentStore, JsonFileStore, MemoryStore, ReorderOperations,
    StoreError, StoreResult, SubscriptionHandle,
};
