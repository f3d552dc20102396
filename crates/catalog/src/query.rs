//! Listing filter and sort.

use std::cmp::Ordering;

use deunicode::deunicode;
use serde::Deserialize;

use partsfront_core::Category;

use crate::product::Product;

/// Availability filter value that disables the filter.
pub const ALL_AVAILABILITY: &str = "all";

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Manual priority ascending, then title.
    #[default]
    Featured,
    /// Title only.
    Title,
}

/// What a listing page asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Category key (`loader`, `Motor Grader`, ...); `None` lists everything.
    pub category: Option<String>,
    /// Free text; every whitespace-separated word must match.
    pub search: String,
    /// Exact availability; `None` or `"all"` disables the filter.
    pub availability: Option<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Matching products in listing order.
pub fn filter_products<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let words: Vec<String> = query
        .search
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let availability = query
        .availability
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case(ALL_AVAILABILITY));

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| category.is_none_or(|key| matches_category(p, key)))
        .filter(|p| availability.is_none_or(|wanted| p.availability == wanted))
        .filter(|p| matches_search(p, &words))
        .collect();

    match query.sort {
        SortOrder::Featured => matched.sort_by(|a, b| compare_featured(a, b)),
        SortOrder::Title => matched.sort_by(|a, b| compare_titles(a, b)),
    }
    matched
}

/// Routing-bucket equality, falling back to a case-insensitive substring
/// match. Products with an unbucketed label list under `loader`, the same
/// bucket their URLs use.
pub fn matches_category(product: &Product, key: &str) -> bool {
    if Category::from_label(key).is_some_and(|wanted| wanted == product.route_category()) {
        return true;
    }
    product
        .category
        .to_lowercase()
        .contains(&key.trim().to_lowercase())
}

fn matches_search(product: &Product, words: &[String]) -> bool {
    if words.is_empty() {
        return true;
    }
    let haystack = product.searchable_text();
    words.iter().all(|word| haystack.contains(word.as_str()))
}

fn compare_featured(a: &Product, b: &Product) -> Ordering {
    let by_priority = match (a.priority, b.priority) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_priority.then_with(|| compare_titles(a, b))
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    collation_key(&a.title)
        .cmp(&collation_key(&b.title))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.slug.cmp(&b.slug))
}

fn collation_key(title: &str) -> String {
    deunicode(title).to_lowercase()
}
