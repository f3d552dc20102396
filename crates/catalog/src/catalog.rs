use partsfront_core::Category;

use crate::loader::SkippedFile;
use crate::product::Product;
use crate::query::{CatalogQuery, filter_products, matches_category};
use crate::resolve::{Resolved, ShadowedSlug, SlugCollision, find_collisions, find_shadowed_slugs, resolve};

/// A loaded set of products plus what the load had to say about them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    skipped: Vec<SkippedFile>,
    collisions: Vec<SlugCollision>,
    shadowed: Vec<ShadowedSlug>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(products: Vec<Product>) -> Self {
        Self::with_skipped(products, Vec::new())
    }

    pub fn with_skipped(products: Vec<Product>, skipped: Vec<SkippedFile>) -> Self {
        let collisions = find_collisions(&products);
        let shadowed = find_shadowed_slugs(&products);
        Self {
            products,
            skipped,
            collisions,
            shadowed,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    /// Filename slugs whose old links now reach another product.
    pub fn shadowed(&self) -> &[ShadowedSlug] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn resolve(&self, slug: &str) -> Option<Resolved<'_>> {
        resolve(slug, &self.products)
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        filter_products(&self.products, query)
    }

    /// Number of products listed under `category`. Agrees with the category
    /// segment of each product's canonical path.
    pub fn count_in(&self, category: Category) -> usize {
        self.products
            .iter()
            .filter(|p| matches_category(p, category.slug()))
            .count()
    }
}
