//! Business logic layer between the HTTP handlers and the repositories

pub mod catalog;
pub mod identity;
pub mod seed;
pub mod validation;

pub use catalog::CatalogService;
pub use identity::IdentityService;
