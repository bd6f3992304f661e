//! Domain Layer
//!
//! Entities, the bilingual text type, and the error taxonomy shared by the
//! layers above. Nothing in here does I/O; hydration and validation are
//! plain functions over JSON field maps.

mod brand;
mod category;
mod entity;
mod footer;
mod locale;
mod product;
mod sns;

pub use brand::BrandPage;
pub use category::Category;
pub use entity::{now_ms, CollectionEntity, DomainError, DomainResult};
pub use footer::FooterLink;
pub use locale::{Locale, LocalizedText};
pub use product::Product;
pub use sns::SnsLink;
