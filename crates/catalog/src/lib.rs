//! Product catalog backed by markdown content files.
//!
//! This crate turns a directory of markdown documents into typed [`Product`]
//! records and answers the questions the site asks of them: which product
//! does this URL slug name, and which products match this listing filter.
//! Everything except [`loader`] is pure, synchronous logic.

pub mod catalog;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod product;
pub mod query;
pub mod resolve;

pub use catalog::Catalog;
pub use error::LoadError;
pub use loader::{SkippedFile, load_catalog, parse_product};
pub use product::{DEFAULT_AVAILABILITY, Product};
pub use query::{CatalogQuery, SortOrder, filter_products};
pub use resolve::{
    Resolved, ShadowedSlug, SlugCollision, SlugMatch, canonical_slug, find_collisions, find_shadowed_slugs, resolve,
};
