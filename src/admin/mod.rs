//! Admin Layer
//!
//! The operation boundary for the admin UI: validation, per-item save
//! tracking, and notification dispatch. No error leaves this layer
//! unreported.

mod service;
mod site;
mod tracker;


pub use service::CollectionAdmin;
pub use site::SiteAdmin;
pub use tracker::SaveTracker;
