//! Site Admin
//!
//! The five admin surfaces of the site, wired over one shared document
//! store and one notification sink.

use std::sync::Arc;

use crate::domain::{BrandPage, Category, FooterLink, Product, SnsLink};
use crate::notify::NotificationSink;
use crate::repository::{CollectionStore, DocumentStore};
use super::service::CollectionAdmin;

/// Admin handles for every editable surface of the site
pub struct SiteAdmin {
    pub categories: CollectionAdmin<Category>,
    pub products: CollectionAdmin<Product>,
    pub brand_pages: CollectionAdmin<BrandPage>,
    pub footer_links: CollectionAdmin<FooterLink>,
    pub sns_links: CollectionAdmin<SnsLink>,
}

impl SiteAdmin {
    pub fn new(store: Arc<dyn DocumentStore>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            categories: CollectionAdmin::new(CollectionStore::new(store.clone()), notifier.clone()),
            products: CollectionAdmin::new(CollectionStore::new(store.clone()), notifier.clone()),
            brand_pages: CollectionAdmin::new(CollectionStore::new(store.clone()), notifier.clone()),
            footer_links: CollectionAdmin::new(
                CollectionStore::new(store.clone()),
                notifier.clone(),
            ),
            sns_links: CollectionAdmin::new(CollectionStore::new(store), notifier),
        }
    }
}
