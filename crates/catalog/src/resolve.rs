//! Canonical slugs and URL slug resolution.
//!
//! A product is addressable by two slugs: its canonical slug (derived from the
//! part number) and its filename slug, which older links still use. Lookups
//! try the canonical form first and only then the filename form; a hit on the
//! filename form must be answered with a permanent redirect.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::product::{Product, product_path};

/// Canonical URL slug of `product`.
pub fn canonical_slug(product: &Product) -> String {
    product.canonical_slug()
}

/// Which slug form a lookup matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugMatch {
    Canonical,
    Legacy,
}

/// A successful slug lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub product: &'a Product,
    pub matched_by: SlugMatch,
    pub canonical_slug: String,
}

impl Resolved<'_> {
    /// Canonical path to redirect to, or `None` when the requested URL
    /// already is canonical. Arguments are the decoded path segments; the
    /// returned path is percent-encoded.
    pub fn redirect_for(&self, requested_category: &str, requested_slug: &str) -> Option<String> {
        let category = self.product.route_category();
        if self.canonical_slug == requested_slug && category.slug() == requested_category {
            return None;
        }
        Some(product_path(category, &self.canonical_slug))
    }
}

/// Find the product a URL slug names.
///
/// Canonical matches win over filename matches across the whole catalog. Among
/// products sharing a slug the first in `products` order wins.
pub fn resolve<'a>(requested: &str, products: &'a [Product]) -> Option<Resolved<'a>> {
    let by_canonical = products.iter().find_map(|product| {
        let canonical = product.canonical_slug();
        (canonical == requested).then(|| Resolved {
            product,
            matched_by: SlugMatch::Canonical,
            canonical_slug: canonical,
        })
    });
    if by_canonical.is_some() {
        return by_canonical;
    }

    products
        .iter()
        .find(|product| product.slug == requested)
        .map(|product| Resolved {
            product,
            matched_by: SlugMatch::Legacy,
            canonical_slug: product.canonical_slug(),
        })
}

/// Two or more products claiming the same canonical slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub canonical_slug: String,
    /// Filename slugs of the colliding products, in catalog order.
    pub products: Vec<String>,
}

/// Canonical slugs shared by more than one product, ordered by slug.
pub fn find_collisions(products: &[Product]) -> Vec<SlugCollision> {
    let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for product in products {
        by_slug
            .entry(product.canonical_slug())
            .or_default()
            .push(product.slug.clone());
    }

    by_slug
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(canonical_slug, products)| SlugCollision {
            canonical_slug,
            products,
        })
        .collect()
}

/// A filename slug that resolves to a different product because that product
/// claims it as its canonical slug. Old links to the file `slug` now land on
/// `canonical_owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowedSlug {
    pub slug: String,
    /// Filename slug of the product that wins the lookup.
    pub canonical_owner: String,
}

/// Filename slugs taken over by another product's canonical slug.
pub fn find_shadowed_slugs(products: &[Product]) -> Vec<ShadowedSlug> {
    let mut canonical_owners: BTreeMap<String, &str> = BTreeMap::new();
    for product in products {
        canonical_owners
            .entry(product.canonical_slug())
            .or_insert(product.slug.as_str());
    }

    products
        .iter()
        .filter(|product| product.canonical_slug() != product.slug)
        .filter_map(|product| {
            canonical_owners.get(&product.slug).map(|owner| ShadowedSlug {
                slug: product.slug.clone(),
                canonical_owner: owner.to_string(),
            })
        })
        .collect()
}
