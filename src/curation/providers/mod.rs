//! Concrete curation provider implementations

pub mod catalog;
pub mod releases;

pub use catalog::CatalogProvider;
pub use releases::ReleaseFeedProvider;
