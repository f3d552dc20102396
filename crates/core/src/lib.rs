//! `partsfront-core` — catalog foundation building blocks.
//!
//! This crate contains **pure** primitives shared by the catalog and the HTTP
//! layer (no IO): the category taxonomy, slug sanitization and the domain
//! error model.

pub mod category;
pub mod error;
pub mod slug;

pub use category::Category;
pub use error::{DomainError, DomainResult};
pub use slug::sanitize_slug;
