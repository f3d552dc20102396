//! Public pages worth telling search engines about.

use std::collections::HashSet;

use partsfront_catalog::Catalog;
use partsfront_core::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct SitePage {
    /// Site-relative path; empty for the home page.
    pub path: String,
    pub change_frequency: &'static str,
    pub priority: f32,
}

impl SitePage {
    fn new(path: impl Into<String>, change_frequency: &'static str, priority: f32) -> Self {
        Self {
            path: path.into(),
            change_frequency,
            priority,
        }
    }
}

/// Static pages only; used when the catalog cannot be read.
pub fn static_pages() -> Vec<SitePage> {
    let mut pages = vec![
        SitePage::new("", "weekly", 1.0),
        SitePage::new("/products", "daily", 0.9),
    ];
    pages.extend(
        Category::ALL
            .iter()
            .map(|c| SitePage::new(format!("/products?category={}", c.slug()), "daily", 0.9)),
    );
    pages
}

/// Static pages followed by each product's canonical page. Products sharing
/// a canonical path are listed once.
pub fn site_pages(catalog: &Catalog) -> Vec<SitePage> {
    let mut pages = static_pages();
    let mut seen = HashSet::new();
    for product in catalog.products() {
        let path = product.canonical_path();
        if seen.insert(path.clone()) {
            pages.push(SitePage::new(path, "weekly", 0.8));
        }
    }
    pages
}
