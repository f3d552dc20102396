use serde::{Deserialize, Serialize};

use partsfront_catalog::markdown::render_html;
use partsfront_catalog::{CatalogQuery, Product, SortOrder};
use partsfront_core::Category;
use partsfront_integrations::{EnquiryReceipt, IndexingOutcome};

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    #[serde(alias = "search")]
    pub q: Option<String>,
    pub availability: Option<String>,
    pub sort: Option<SortOrder>,
}

impl ListProductsParams {
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            search: self.q.clone().unwrap_or_default(),
            availability: self.availability.clone(),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub slug: &'static str,
    pub name: &'static str,
    pub path: String,
    pub count: usize,
}

impl CategoryResponse {
    pub fn new(category: Category, count: usize) -> Self {
        Self {
            slug: category.slug(),
            name: category.display_name(),
            path: format!("/products?category={}", category.slug()),
            count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductSummary {
    /// Canonical slug.
    pub slug: String,
    pub title: String,
    /// Routing bucket slug.
    pub category: &'static str,
    /// Category as authored.
    pub category_label: String,
    pub brands: Vec<String>,
    pub part_numbers: Vec<String>,
    pub sizes: Vec<String>,
    pub image: String,
    pub image_alt: String,
    pub availability: String,
    pub priority: Option<f64>,
    pub path: String,
    pub url: String,
}

impl ProductSummary {
    pub fn from_product(product: &Product, site_url: &str) -> Self {
        let path = product.canonical_path();
        Self {
            slug: product.canonical_slug(),
            title: product.title.clone(),
            category: product.route_category().slug(),
            category_label: product.category.clone(),
            brands: product.brands.clone(),
            part_numbers: product.part_numbers.clone(),
            sizes: product.sizes.clone(),
            image: product.image_url(site_url),
            image_alt: product.alt_text().to_string(),
            availability: product.availability.clone(),
            priority: product.priority,
            url: format!("{site_url}{path}"),
            path,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub total: usize,
    /// Present when the `category` filter names a known bucket.
    pub category: Option<CategoryResponse>,
    pub items: Vec<ProductSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    /// File-name slug, still accepted in URLs.
    pub legacy_slug: String,
    pub sku: String,
    pub content: String,
    pub content_html: String,
}

impl ProductDetail {
    pub fn from_product(product: &Product, site_url: &str) -> Self {
        Self {
            summary: ProductSummary::from_product(product, site_url),
            legacy_slug: product.slug.clone(),
            sku: product.sku(),
            content: product.content.clone(),
            content_html: render_html(&product.content),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnquiryAccepted {
    pub success: bool,
    pub reference: String,
    pub id: String,
}

impl From<EnquiryReceipt> for EnquiryAccepted {
    fn from(receipt: EnquiryReceipt) -> Self {
        Self {
            success: true,
            reference: receipt.reference.to_string(),
            id: receipt.upstream_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndexNowRequest {
    pub urls: Option<Vec<String>>,
    pub all: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndexNowParams {
    pub all: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowResponse {
    pub success: bool,
    pub submitted: usize,
    pub index_now_status: u16,
    pub index_now_status_text: String,
    pub urls: Vec<String>,
}

impl IndexNowResponse {
    pub fn new(outcome: IndexingOutcome, urls: Vec<String>) -> Self {
        Self {
            success: outcome.success,
            submitted: outcome.submitted,
            index_now_status: outcome.status,
            index_now_status_text: outcome.status_text,
            urls,
        }
    }
}
